mod access;

#[cfg(test)]
mod tests;

pub use access::{add_item_to_map, delete_entry, get_value_at_path, update_entry};

use indexmap::IndexMap;

/// 通用翻译树
///
/// 与 JSON/YAML 的文法对应的标签化变体：
/// 标量 / 有序列表 / 保持插入顺序的映射。
/// 文件树的根节点总是映射。
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    /// 标量值（翻译文本）
    Value(String),
    /// 有序列表
    List(Vec<TreeNode>),
    /// 映射（键唯一，保持插入顺序）
    Map(IndexMap<String, TreeNode>),
}

impl TreeNode {
    /// 创建空映射节点
    pub fn empty_map() -> Self {
        TreeNode::Map(IndexMap::new())
    }

    /// 获取标量内容
    pub fn as_value(&self) -> Option<&str> {
        match self {
            TreeNode::Value(text) => Some(text),
            _ => None,
        }
    }

    /// 获取列表引用
    pub fn as_list(&self) -> Option<&[TreeNode]> {
        match self {
            TreeNode::List(items) => Some(items),
            _ => None,
        }
    }

    /// 获取映射引用
    pub fn as_map(&self) -> Option<&IndexMap<String, TreeNode>> {
        match self {
            TreeNode::Map(map) => Some(map),
            _ => None,
        }
    }

    /// 节点类型名（用于错误信息）
    pub fn kind_name(&self) -> &'static str {
        match self {
            TreeNode::Value(_) => "value",
            TreeNode::List(_) => "list",
            TreeNode::Map(_) => "map",
        }
    }

    /// 统计叶子（标量）数量
    pub fn leaf_count(&self) -> usize {
        match self {
            TreeNode::Value(_) => 1,
            TreeNode::List(items) => items.iter().map(TreeNode::leaf_count).sum(),
            TreeNode::Map(map) => map.values().map(TreeNode::leaf_count).sum(),
        }
    }
}
