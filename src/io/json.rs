/// JSON 编解码实现
///
/// 依赖 serde_json 的 preserve_order 特性保持映射键顺序

use indexmap::IndexMap;

use crate::locale::Locale;
use crate::tree::TreeNode;
use crate::utils::EditError;

use super::traits::TranslationCodec;

/// 默认的 JSON 编解码器
#[derive(Debug, Clone, Default)]
pub struct JsonCodec;

impl TranslationCodec for JsonCodec {
    fn embedded_locales(&self, _bytes: &[u8]) -> Result<Vec<Locale>, EditError> {
        // 单语言格式，语言由文件名决定
        Ok(Vec::new())
    }

    fn decode(&self, bytes: &[u8], _locale: &Locale) -> Result<TreeNode, EditError> {
        let value: serde_json::Value = serde_json::from_slice(bytes)?;

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
        let mut bytes = serde_json::to_vec_pretty(&value)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

/// serde_json::Value -> TreeNode
///
/// 非字符串标量按其文本形式收窄为字符串
pub(crate) fn value_to_tree(value: &serde_json::Value) -> Result<TreeNode, EditError> {
    use serde_json::Value;

    match value {
        Value::Object(map) => {
            let mut entries = IndexMap::with_capacity(map.len());
            for (key, child) in map {
                entries.insert(key.clone(), value_to_tree(child)?);
            }
            Ok(TreeNode::Map(entries))
        }
        Value::Array(items) => {
            let children = items.iter().map(value_to_tree).collect::<Result<_, _>>()?;
            Ok(TreeNode::List(children))
        }
        Value::String(text) => Ok(TreeNode::Value(text.clone())),
        Value::Number(number) => Ok(TreeNode::Value(number.to_string())),
        Value::Bool(flag) => Ok(TreeNode::Value(flag.to_string())),
        Value::Null => Ok(TreeNode::Value(String::new())),
    }
}

/// TreeNode -> serde_json::Value
pub(crate) fn tree_to_value(tree: &TreeNode) -> serde_json::Value {
    use serde_json::Value;

    match tree {
        TreeNode::Value(text) => Value::String(text.clone()),
        TreeNode::List(items) => Value::Array(items.iter().map(tree_to_value).collect()),
        TreeNode::Map(map) => {
            let mut object = serde_json::Map::with_capacity(map.len());
            for (key, child) in map {
                object.insert(key.clone(), tree_to_value(child));
            }
            Value::Object(object)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn en() -> Locale {
        Locale::from_str("en").unwrap()
    }

    #[test]
    fn test_decode_basic() {
        let raw = br#"{"login": {"title": "Login", "buttons": ["OK", "Cancel"]}}"#;
        let tree = JsonCodec.decode(raw, &en()).unwrap();

        let map = tree.as_map().unwrap();
        let login = map.get("login").unwrap().as_map().unwrap();
        assert_eq!(login.get("title").unwrap().as_value(), Some("Login"));
        assert_eq!(login.get("buttons").unwrap().as_list().unwrap().len(), 2);
    }

    #[test]
    fn test_decode_rejects_non_map_root() {
        assert!(JsonCodec.decode(b"[1, 2]", &en()).is_err());
        assert!(JsonCodec.decode(b"\"text\"", &en()).is_err());
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(JsonCodec.decode(b"{not json", &en()).is_err());
    }

    #[test]
    fn test_encode_preserves_key_order() {
        let raw = br#"{"zebra": "z", "apple": "a", "mango": "m"}"#;
        let tree = JsonCodec.decode(raw, &en()).unwrap();
        let bytes = JsonCodec.encode(None, &en(), &tree).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let zebra = text.find("zebra").unwrap();
        let apple = text.find("apple").unwrap();
        let mango = text.find("mango").unwrap();
        assert!(zebra < apple && apple < mango);
    }

    #[test]
    fn test_roundtrip() {
        let raw = br#"{"a": {"b": ["x", "y"], "c": "z"}}"#;
        let tree = JsonCodec.decode(raw, &en()).unwrap();
        let bytes = JsonCodec.encode(None, &en(), &tree).unwrap();
        let reparsed = JsonCodec.decode(&bytes, &en()).unwrap();

        assert_eq!(tree, reparsed);
    }
}
