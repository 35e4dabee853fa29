/// YAML 编解码实现
///
/// serde_yaml 的 Mapping 本身保持插入顺序

use indexmap::IndexMap;

use crate::locale::Locale;
use crate::tree::TreeNode;
use crate::utils::EditError;

use super::traits::TranslationCodec;

/// 默认的 YAML 编解码器
#[derive(Debug, Clone, Default)]
pub struct YamlCodec;

impl TranslationCodec for YamlCodec {
    fn embedded_locales(&self, _bytes: &[u8]) -> Result<Vec<Locale>, EditError> {
        Ok(Vec::new())
    }

    fn decode(&self, bytes: &[u8], _locale: &Locale) -> Result<TreeNode, EditError> {
        let value: serde_yaml::Value = serde_yaml::from_slice(bytes)?;

        match value_to_tree(&value)? {
            root @ TreeNode::Map(_) => Ok(root),
            other => Err(EditError::TypeMismatch(
                "<root>".to_string(),
                format!("translation file root must be a mapping, got {}", other.kind_name()),
            )),
        }
    }

    fn encode(
        &self,
        _previous: Option<&[u8]>,
        _locale: &Locale,
        tree: &TreeNode,
    ) -> Result<Vec<u8>, EditError> {
        let value = tree_to_value(tree);
        let text = serde_yaml::to_string(&value)?;
        Ok(text.into_bytes())
    }
}

/// serde_yaml::Value -> TreeNode
fn value_to_tree(value: &serde_yaml::Value) -> Result<TreeNode, EditError> {
    use serde_yaml::Value;

    match value {
        Value::Mapping(map) => {
            let mut entries = IndexMap::with_capacity(map.len());
            for (key, child) in map {
                let key = key.as_str().ok_or_else(|| {
                    EditError::TypeMismatch(
                        "<root>".to_string(),
                        "mapping keys must be strings".to_string(),
                    )
                })?;
                entries.insert(key.to_string(), value_to_tree(child)?);
            }
            Ok(TreeNode::Map(entries))
        }
        Value::Sequence(items) => {
            let children = items.iter().map(value_to_tree).collect::<Result<_, _>>()?;
            Ok(TreeNode::List(children))
        }
        Value::String(text) => Ok(TreeNode::Value(text.clone())),
        Value::Number(number) => Ok(TreeNode::Value(number.to_string())),
        Value::Bool(flag) => Ok(TreeNode::Value(flag.to_string())),
        Value::Null => Ok(TreeNode::Value(String::new())),
        Value::Tagged(tagged) => value_to_tree(&tagged.value),
    }
}

/// TreeNode -> serde_yaml::Value
fn tree_to_value(tree: &TreeNode) -> serde_yaml::Value {
    use serde_yaml::Value;

    match tree {
        TreeNode::Value(text) => Value::String(text.clone()),
        TreeNode::List(items) => Value::Sequence(items.iter().map(tree_to_value).collect()),
        TreeNode::Map(map) => {
            let mut mapping = serde_yaml::Mapping::new();
            for (key, child) in map {
                mapping.insert(Value::String(key.clone()), tree_to_value(child));
            }
            Value::Mapping(mapping)
        }
    }
}
