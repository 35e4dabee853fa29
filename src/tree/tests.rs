use super::*;
use crate::path::KeyPath;

/// 按 (路径, 值) 行构建测试树
fn build_tree(rows: &[(&str, &str)]) -> TreeNode {
    let mut root = TreeNode::empty_map();
    for (raw_path, value) in rows {
        let path = KeyPath::parse(raw_path).unwrap();
        add_item_to_map(&mut root, &path, TreeNode::Value(value.to_string())).unwrap();
    }
    root
}

fn get_text<'a>(root: &'a TreeNode, raw_path: &str) -> Option<&'a str> {
    let path = KeyPath::parse(raw_path).unwrap();
    get_value_at_path(root, &path).and_then(TreeNode::as_value)
}

#[test]
fn test_get_nested_values() {
    let root = build_tree(&[
        ("login.title", "Login"),
        ("login.buttons.0.label", "OK"),
        ("login.buttons.1.label", "Cancel"),
    ]);

    assert_eq!(get_text(&root, "login.title"), Some("Login"));
    assert_eq!(get_text(&root, "login.buttons.0.label"), Some("OK"));
    assert_eq!(get_text(&root, "login.buttons.1.label"), Some("Cancel"));
}

#[test]
fn test_get_absent_is_none() {
    let root = build_tree(&[("login.title", "Login")]);

    // 缺键、越界索引、穿过标量：都是 None 而非错误
    assert_eq!(get_text(&root, "login.missing"), None);
    assert_eq!(get_text(&root, "login.title.deeper"), None);
    assert_eq!(get_text(&root, "login.0"), None);

    let with_list = build_tree(&[("a.0", "first")]);
    assert_eq!(get_text(&with_list, "a.5"), None);
}

#[test]
fn test_add_creates_intermediate_containers() {
    let mut root = TreeNode::empty_map();
    let path = KeyPath::parse("a.b.0.c").unwrap();
    add_item_to_map(&mut root, &path, TreeNode::Value("deep".to_string())).unwrap();

    assert_eq!(get_text(&root, "a.b.0.c"), Some("deep"));

    // 中间容器的类型由后继段决定
    let a = get_value_at_path(&root, &KeyPath::parse("a").unwrap()).unwrap();
    assert!(a.as_map().is_some());
    let b = get_value_at_path(&root, &KeyPath::parse("a.b").unwrap()).unwrap();
    assert!(b.as_list().is_some());
}

#[test]
fn test_add_trailing_index_replace_and_append() {
    let mut root = build_tree(&[("a.0", "first")]);

    // 索引小于长度：替换
    let path = KeyPath::parse("a.0").unwrap();
    add_item_to_map(&mut root, &path, TreeNode::Value("changed".to_string())).unwrap();
    assert_eq!(get_text(&root, "a.0"), Some("changed"));

    // 索引等于长度：追加
    let path = KeyPath::parse("a.1").unwrap();
    add_item_to_map(&mut root, &path, TreeNode::Value("second".to_string())).unwrap();
    assert_eq!(get_text(&root, "a.1"), Some("second"));
}

#[test]
fn test_add_type_mismatch() {
    let mut root = build_tree(&[("a", "scalar")]);

    // 试图穿过标量写入索引
    let path = KeyPath::parse("a.0.title").unwrap();
    let result = add_item_to_map(&mut root, &path, TreeNode::Value("x".to_string()));
    assert!(result.is_err());
}

#[test]
fn test_delete_map_entry_and_list_element() {
    let mut root = build_tree(&[
        ("login.title", "Login"),
        ("login.hint", "Hint"),
        ("items.0", "first"),
        ("items.1", "second"),
    ]);

    assert!(delete_entry(&mut root, &KeyPath::parse("login.title").unwrap()));
    assert_eq!(get_text(&root, "login.title"), None);
    assert_eq!(get_text(&root, "login.hint"), Some("Hint"));

    assert!(delete_entry(&mut root, &KeyPath::parse("items.0").unwrap()));
    // 删除后元素前移
    assert_eq!(get_text(&root, "items.0"), Some("second"));
}

#[test]
fn test_delete_absent_is_noop() {
    let mut root = build_tree(&[("login.title", "Login")]);

    assert!(!delete_entry(&mut root, &KeyPath::parse("login.missing").unwrap()));
    assert!(!delete_entry(&mut root, &KeyPath::parse("other.path").unwrap()));
    assert_eq!(get_text(&root, "login.title"), Some("Login"));
}

#[test]
fn test_delete_preserves_sibling_order() {
    let mut root = build_tree(&[
        ("m.one", "1"),
        ("m.two", "2"),
        ("m.three", "3"),
    ]);

    delete_entry(&mut root, &KeyPath::parse("m.two").unwrap());

    let m = get_value_at_path(&root, &KeyPath::parse("m").unwrap()).unwrap();
    let keys: Vec<&String> = m.as_map().unwrap().keys().collect();
    assert_eq!(keys, ["one", "three"]);
}

#[test]
fn test_update_rename_keeps_position() {
    let mut root = build_tree(&[
        ("m.first", "1"),
        ("m.second", "2"),
        ("m.third", "3"),
    ]);

    let path = KeyPath::parse("m.second").unwrap();
    let renamed = update_entry(&mut root, &path, |_key, value| ("renamed".to_string(), value)).unwrap();
    assert!(renamed);

    let m = get_value_at_path(&root, &KeyPath::parse("m").unwrap()).unwrap();
    let keys: Vec<&String> = m.as_map().unwrap().keys().collect();
    // 重命名保持条目在映射中的位置
    assert_eq!(keys, ["first", "renamed", "third"]);
    assert_eq!(get_text(&root, "m.renamed"), Some("2"));
}

#[test]
fn test_update_wrap_value_same_key() {
    let mut root = build_tree(&[("m.key", "old")]);

    let path = KeyPath::parse("m.key").unwrap();
    update_entry(&mut root, &path, |key, value| {
        let text = value.as_value().unwrap_or_default().to_string();
        (key.to_string(), TreeNode::Value(format!("{}!", text)))
    })
    .unwrap();

    assert_eq!(get_text(&root, "m.key"), Some("old!"));
}

#[test]
fn test_update_absent_returns_false() {
    let mut root = build_tree(&[("m.key", "v")]);

    let path = KeyPath::parse("m.missing").unwrap();
    let updated = update_entry(&mut root, &path, |key, value| (key.to_string(), value)).unwrap();
    assert!(!updated);
}

#[test]
fn test_update_list_element_value_only() {
    let mut root = build_tree(&[("items.0", "first")]);

    // 换值可以
    let path = KeyPath::parse("items.0").unwrap();
    let updated = update_entry(&mut root, &path, |key, _value| {
        (key.to_string(), TreeNode::Value("patched".to_string()))
    })
    .unwrap();
    assert!(updated);
    assert_eq!(get_text(&root, "items.0"), Some("patched"));

    // 换名不行
    let result = update_entry(&mut root, &path, |_key, value| ("9".to_string(), value));
    assert!(result.is_err());
}

#[test]
fn test_leaf_count() {
    let root = build_tree(&[
        ("a.title", "x"),
        ("a.items.0", "y"),
        ("a.items.1", "z"),
    ]);
    assert_eq!(root.leaf_count(), 3);
}
