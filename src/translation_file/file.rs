use std::fs;
use std::path::PathBuf;

use crate::io::CodecRegistry;
use crate::locale::Locale;
use crate::tree::TreeNode;
use crate::utils::create_backup;

use super::io::{parse_csv_filename, parse_filename};
use super::TranslationFileType;

/// 单个物理翻译文件的身份
///
/// 身份不可变；树按需读取，单次命令内每个被触及的文件
/// 恰好经历一次 读取->修改->写回，树不跨操作缓存。
#[derive(Debug, Clone)]
pub struct TranslationFile {
    /// 文件路径
    pub path: PathBuf,
    /// 文件类型
    pub file_type: TranslationFileType,
    /// 语言标识符
    pub locale: Locale,
    /// 所属命名空间（命名空间模式关闭时可为 None）
    pub namespace: Option<String>,
}

impl TranslationFile {
    /// 从文件路径创建翻译文件记录
    ///
    /// 单语言格式返回一条记录；CSV 按语言列展开，
    /// 每列一条记录（共享同一物理路径）。
    pub fn from_path(
        path: PathBuf,
        namespaces: bool,
        registry: &CodecRegistry,
    ) -> Result<Vec<Self>, Box<dyn std::error::Error>> {
        if !path.exists() {
            return Err(format!("翻译文件不存在: {:?}", path).into());
        }

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let file_type = TranslationFileType::from_extension(extension).ok_or("不支持的翻译文件类型")?;

        if file_type.is_multi_locale() {
            let namespace = parse_csv_filename(&path, namespaces)?;
            let codec = registry.require(file_type)?;
            let data = fs::read(&path)?;

            let records = codec
                .embedded_locales(&data)?
                .into_iter()
                .map(|locale| TranslationFile {
                    path: path.clone(),
                    file_type,
                    locale,
                    namespace: namespace.clone(),
                })
                .collect();
            Ok(records)
        } else {
            let (namespace, locale, file_type) = parse_filename(&path, namespaces)?;
            Ok(vec![TranslationFile {
                path,
                file_type,
                locale,
                namespace,
            }])
        }
    }

    /// 读取并解析本记录语言视角下的树
    ///
    /// fs::read 在返回前释放文件句柄，解码失败也不例外
    pub fn read_tree(&self, registry: &CodecRegistry) -> Result<TreeNode, Box<dyn std::error::Error>> {
        let codec = registry.require(self.file_type)?;
        let data = fs::read(&self.path)?;
        Ok(codec.decode(&data, &self.locale)?)
    }

    /// 将树写回文件
    ///
    /// 先在内存缓冲完成序列化再整体覆盖，序列化失败不会留下
    /// 半截文件；多语言格式会并回文件中其他语言列。
    pub fn write_tree(
        &self,
        tree: &TreeNode,
        registry: &CodecRegistry,
        backup: bool,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let codec = registry.require(self.file_type)?;

        let previous = if self.path.exists() {
            Some(fs::read(&self.path)?)
        } else {
            None
        };

        let buffer = codec.encode(previous.as_deref(), &self.locale, tree)?;

        if backup && self.path.exists() {
            let _backup_path = create_backup(&self.path)?;
            #[cfg(debug_assertions)]
            println!("已创建备份: {:?}", _backup_path);
        }

        fs::write(&self.path, buffer)?;
        Ok(())
    }

    /// 命名空间匹配判定
    ///
    /// 命名空间模式关闭时恒为真
    pub fn matches_namespace(&self, namespaces: bool, target: Option<&str>) -> bool {
        if !namespaces {
            return true;
        }
        self.namespace.as_deref() == target
    }

    /// 语言匹配判定（精确标签相等）
    pub fn matches_locale(&self, target: &Locale) -> bool {
        &self.locale == target
    }
}
