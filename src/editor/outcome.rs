/// 变更记录模块
///
/// 记录一次编辑操作触及了哪些文件、做了什么动作，
/// 供命令行层渲染进度行和摘要。

use std::path::PathBuf;

use crate::locale::Locale;

/// 单个文件上施加的动作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeAction {
    /// 原地改键名（值不变）
    Renamed { from: String, to: String },
    /// 删除条目
    Deleted { path: String, removed: bool },
    /// 插入条目
    Inserted { path: String },
    /// 给键打过期标记
    Flagged { path: String },
}

/// 单个文件的变更记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// 文件路径
    pub path: PathBuf,
    /// 文件语言
    pub locale: Locale,
    /// 施加的动作
    pub action: ChangeAction,
}

impl std::fmt::Display for FileChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.action {
            ChangeAction::Renamed { from, to } => {
                write!(f, "[{}] {:?}: 重命名 {} -> {}", self.locale, self.path, from, to)
            }
            ChangeAction::Deleted { path, removed } => {
                if *removed {
                    write!(f, "[{}] {:?}: 删除 {}", self.locale, self.path, path)
                } else {
                    write!(f, "[{}] {:?}: {} 不存在，未删除", self.locale, self.path, path)
                }
            }
            ChangeAction::Inserted { path } => {
                write!(f, "[{}] {:?}: 插入 {}", self.locale, self.path, path)
            }
            ChangeAction::Flagged { path } => {
                write!(f, "[{}] {:?}: 标记过期 {}", self.locale, self.path, path)
            }
        }
    }
}

/// 一次编辑操作的结构化结果
#[derive(Debug, Clone, Default)]
pub struct EditOutcome {
    /// 按发生顺序的变更记录
    changes: Vec<FileChange>,
    /// move/copy 是否在任何文件中找到了源值
    origin_missing: bool,
}

impl EditOutcome {
    /// 创建空结果
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条变更记录
    pub fn add_change(&mut self, change: FileChange) {
        self.changes.push(change);
    }

    /// 标记“未找到源值”（正常结果，不是错误）
    pub fn mark_origin_missing(&mut self) {
        self.origin_missing = true;
    }

    /// 是否未找到源值
    pub fn origin_missing(&self) -> bool {
        self.origin_missing
    }

    /// 变更记录数
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// 检查是否没有任何变更
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// 按发生顺序迭代变更记录
    pub fn iter(&self) -> impl Iterator<Item = &FileChange> {
        self.changes.iter()
    }

    /// 生成变更摘要
    pub fn summary(&self) -> String {
        if self.origin_missing {
            return "未找到源路径的值，没有文件被修改".to_string();
        }
        format!("触及文件 {} 处", self.changes.len())
    }
}
