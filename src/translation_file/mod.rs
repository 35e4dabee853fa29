mod file;
mod io;
mod set;


pub use file::TranslationFile;
pub use set::{EditConfig, FileStats, TranslationFileSet, TranslationSetStats};

use serde::{Deserialize, Serialize};

/// 翻译文件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationFileType {
    /// JSON 翻译文件（每文件一种语言）
    Json,
    /// YAML 翻译文件（每文件一种语言）
    Yaml,
    /// CSV 扁平表（语言按列排布）
    Csv,
}

impl TranslationFileType {
    /// 从文件扩展名获取翻译文件类型
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "json" => Some(TranslationFileType::Json),
            "yaml" | "yml" => Some(TranslationFileType::Yaml),
            "csv" => Some(TranslationFileType::Csv),
            _ => None,
        }
    }

    /// 获取规范文件扩展名
    pub fn to_extension(&self) -> &'static str {
        match self {
            TranslationFileType::Json => "json",
            TranslationFileType::Yaml => "yaml",
            TranslationFileType::Csv => "csv",
        }
    }

    /// 检查是否为多语言格式（一个文件含多个语言列）
    pub fn is_multi_locale(&self) -> bool {
        matches!(self, TranslationFileType::Csv)
    }
}
