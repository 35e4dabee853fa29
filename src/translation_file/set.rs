use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::io::CodecRegistry;
use crate::locale::Locale;

use super::file::TranslationFile;
use super::TranslationFileType;

/// 编辑命令的共享配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditConfig {
    /// 文件类型
    pub file_type: TranslationFileType,
    /// 是否启用命名空间模式
    pub namespaces: bool,
    /// 基准语言（翻译的权威来源）
    pub base_locale: Locale,
    /// 覆盖文件前是否创建备份
    #[serde(default)]
    pub backup: bool,
}

/// 单个文件的统计信息
#[derive(Debug, Clone)]
pub struct FileStats {
    pub path: PathBuf,
    pub locale: Locale,
    pub namespace: Option<String>,
    pub leaf_count: usize,
}

/// 文件集合统计信息
#[derive(Debug, Clone)]
pub struct TranslationSetStats {
    pub file_count: usize,
    pub entries: Vec<FileStats>,
}

impl std::fmt::Display for TranslationSetStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== 翻译文件集合统计 ===")?;
        writeln!(f, "文件记录数: {}", self.file_count)?;
        for entry in &self.entries {
            writeln!(
                f,
                "[{}] {} (命名空间: {}): {} 个条目",
                entry.locale,
                entry.path.display(),
                entry.namespace.as_deref().unwrap_or("-"),
                entry.leaf_count
            )?;
        }
        Ok(())
    }
}

/// 翻译文件集合管理器
///
/// 一次命令调用构造一次，集合本身只读；
/// 变化的只是成员文件在磁盘上的内容。
pub struct TranslationFileSet {
    /// 文件记录（有序）
    pub files: Vec<TranslationFile>,
    /// 共享配置
    pub config: EditConfig,
    /// 编解码能力表（构造时显式注入）
    registry: CodecRegistry,
}

impl TranslationFileSet {
    /// 创建空集合
    pub fn new(config: EditConfig, registry: CodecRegistry) -> Self {
        TranslationFileSet {
            files: Vec::new(),
            config,
            registry,
        }
    }

    /// 扫描目录加载配置类型的所有翻译文件
    ///
    /// 按文件名排序保证迭代顺序稳定；扩展名不匹配的文件跳过，
    /// 匹配但文件名不合约定的文件报错。
    pub fn load_from_directory(
        directory: &Path,
        config: EditConfig,
        registry: CodecRegistry,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        registry.require(config.file_type)?;

        let mut set = TranslationFileSet::new(config, registry);

        let mut paths: Vec<PathBuf> = fs::read_dir(directory)?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .and_then(|s| s.to_str())
                    .and_then(TranslationFileType::from_extension)
                    == Some(set.config.file_type)
            })
            .collect();
        paths.sort();

        for path in paths {
            let records = TranslationFile::from_path(path, set.config.namespaces, &set.registry)?;
            set.files.extend(records);
        }

        Ok(set)
    }

    /// 添加文件记录
    pub fn add_file(&mut self, file: TranslationFile) {
        self.files.push(file);
    }

    /// 获取编解码能力表
    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    /// 文件记录数
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// 检查集合是否为空
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// 获取集合统计信息（逐文件读取并计数叶子）
    pub fn stats(&self) -> Result<TranslationSetStats, Box<dyn std::error::Error>> {
        let mut entries = Vec::with_capacity(self.files.len());

        for file in &self.files {
            let tree = file.read_tree(&self.registry)?;
            entries.push(FileStats {
                path: file.path.clone(),
                locale: file.locale.clone(),
                namespace: file.namespace.clone(),
                leaf_count: tree.leaf_count(),
            });
        }

        Ok(TranslationSetStats {
            file_count: self.files.len(),
            entries,
        })
    }
}
