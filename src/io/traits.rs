/// IO 抽象层 - trait 定义
///
/// 该模块定义了按文件类型解码/编码翻译树的抽象接口，
/// 支持依赖注入和测试 mock。解码器不做全局注册，
/// 而是通过显式的能力表在构造时传入。

use crate::locale::Locale;
use crate::translation_file::TranslationFileType;
use crate::tree::TreeNode;
use crate::utils::EditError;

use std::collections::HashMap;

/// 翻译文件编解码 trait
///
/// # 职责
/// - 将原始字节解码为通用翻译树
/// - 将翻译树编码回字节
/// - 不负责文件系统访问，仅负责格式
pub trait TranslationCodec {
    /// 文件内容自身声明的语言列表
    ///
    /// 单语言格式（JSON/YAML）返回空，语言由文件名决定；
    /// 多语言格式（CSV）从表头解析
    fn embedded_locales(&self, bytes: &[u8]) -> Result<Vec<Locale>, EditError>;

    /// 解码出指定语言视角下的树
    ///
    /// # 参数
    /// * `bytes` - 文件原始字节
    /// * `locale` - 目标语言（单语言格式忽略）
    fn decode(&self, bytes: &[u8], locale: &Locale) -> Result<TreeNode, EditError>;

    /// 将指定语言的树编码为完整文件字节
    ///
    /// # 参数
    /// * `previous` - 文件当前字节；多语言格式需要它保留其他语言列
    /// * `locale` - 目标语言
    /// * `tree` - 要写入的树
    fn encode(
        &self,
        previous: Option<&[u8]>,
        locale: &Locale,
        tree: &TreeNode,
    ) -> Result<Vec<u8>, EditError>;
}

/// 编解码能力表（文件类型 -> 编解码器）
///
/// 在 FileCollection 构造时显式传入，避免隐藏的全局分发状态
pub struct CodecRegistry {
    codecs: HashMap<TranslationFileType, Box<dyn TranslationCodec>>,
}

impl CodecRegistry {
    /// 创建空能力表
    pub fn new() -> Self {
        Self {
            codecs: HashMap::new(),
        }
    }

    /// 创建包含 JSON/YAML/CSV 默认实现的能力表
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(TranslationFileType::Json, Box::new(super::json::JsonCodec));
        registry.register(TranslationFileType::Yaml, Box::new(super::yaml::YamlCodec));
        registry.register(TranslationFileType::Csv, Box::new(super::csv::CsvCodec));
        registry
    }

    /// 注册编解码器
    pub fn register(&mut self, file_type: TranslationFileType, codec: Box<dyn TranslationCodec>) {
        self.codecs.insert(file_type, codec);
    }

    /// 查找编解码器
    pub fn get(&self, file_type: TranslationFileType) -> Option<&dyn TranslationCodec> {
        self.codecs.get(&file_type).map(|c| c.as_ref())
    }

    /// 查找编解码器，缺失时返回 UnsupportedFileType 错误
    pub fn require(&self, file_type: TranslationFileType) -> Result<&dyn TranslationCodec, EditError> {
        self.get(file_type)
            .ok_or_else(|| EditError::UnsupportedFileType(file_type.to_extension().to_string()))
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_with_defaults() {
        let registry = CodecRegistry::with_defaults();

        assert!(registry.get(TranslationFileType::Json).is_some());
        assert!(registry.get(TranslationFileType::Yaml).is_some());
        assert!(registry.get(TranslationFileType::Csv).is_some());
    }

    #[test]
    fn test_registry_require_missing() {
        let registry = CodecRegistry::new();
        let result = registry.require(TranslationFileType::Json);

        assert!(result.is_err());
    }
}
