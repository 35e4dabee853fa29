/// 路径寻址的树访问器
///
/// 四个操作共用同一条下行路线：读取用不可变遍历，
/// 插入/删除/改写先定位末段的父节点，再施加各自的叶子动作。

use crate::path::{KeyPath, PathSegment};
use crate::utils::EditError;

use super::TreeNode;

/// 按路径读取节点
///
/// 任一段无法解析时返回 None；“该语言没有这个键”
/// 是正常结果，不是错误。
pub fn get_value_at_path<'a>(root: &'a TreeNode, path: &KeyPath) -> Option<&'a TreeNode> {
    let mut current = root;

    for segment in path.segments() {
        current = match (current, segment) {
            (TreeNode::Map(map), PathSegment::Key(key)) => map.get(key)?,
            (TreeNode::List(items), PathSegment::Index(index)) => items.get(*index)?,
            _ => return None,
        };
    }

    Some(current)
}

/// 按需创建的空中间容器：下一段是索引则建列表，否则建映射
fn empty_container(next_is_index: bool) -> TreeNode {
    if next_is_index {
        TreeNode::List(Vec::new())
    } else {
        TreeNode::empty_map()
    }
}

/// 下行到末段的父节点
///
/// # 参数
/// * `create` - true 时创建缺失的中间容器（插入路线）；
///   false 时缺失即返回 None（删除/改写路线）
///
/// # 返回
/// 类型冲突在 create 模式下是致命错误；非 create 模式下
/// 视作路径无法解析
fn descend_to_parent<'a>(
    root: &'a mut TreeNode,
    path: &KeyPath,
    create: bool,
) -> Result<Option<&'a mut TreeNode>, EditError> {
    let segments = path.segments();
    let mut current = root;

    for (pos, segment) in path.parent_segments().iter().enumerate() {
        let next_is_index = matches!(segments[pos + 1], PathSegment::Index(_));

        current = match (current, segment) {
            (TreeNode::Map(map), PathSegment::Key(key)) => {
                if !map.contains_key(key) {
                    if !create {
                        return Ok(None);
                    }
                    map.insert(key.clone(), empty_container(next_is_index));
                }
                map.get_mut(key).expect("entry just ensured")
            }
            (TreeNode::List(items), PathSegment::Index(index)) => {
                if *index >= items.len() {
                    if !create {
                        return Ok(None);
                    }
                    // 追加一个空容器；越位索引的校验由解码层负责
                    items.push(empty_container(next_is_index));
                }
                let last = items.len() - 1;
                let slot = (*index).min(last);
                &mut items[slot]
            }
            (node, segment) => {
                if create {
                    return Err(EditError::TypeMismatch(
                        path.to_string(),
                        format!("cannot traverse {} with segment '{}'", node.kind_name(), segment),
                    ));
                }
                return Ok(None);
            }
        };
    }

    Ok(Some(current))
}

/// 在路径处插入节点
///
/// 逐段创建缺失的中间映射/列表；末段为索引时，
/// 小于长度则替换，否则追加（间隙校验在解码层）。
pub fn add_item_to_map(root: &mut TreeNode, path: &KeyPath, item: TreeNode) -> Result<(), EditError> {
    if path.is_empty() {
        return Err(EditError::InvalidPath("<empty>".to_string()));
    }

    let parent = descend_to_parent(root, path, true)?.expect("create mode always yields a parent");

    match (parent, path.last().expect("non-empty path")) {
        (TreeNode::Map(map), PathSegment::Key(key)) => {
            map.insert(key.clone(), item);
            Ok(())
        }
        (TreeNode::List(items), PathSegment::Index(index)) => {
            if *index < items.len() {
                items[*index] = item;
            } else {
                items.push(item);
            }
            Ok(())
        }
        (node, segment) => Err(EditError::TypeMismatch(
            path.to_string(),
            format!("cannot insert segment '{}' into {}", segment, node.kind_name()),
        )),
    }
}

/// 删除路径处的映射条目或列表元素
///
/// # 返回
/// 是否确有删除；路径无法解析时为 false（静默无操作）
pub fn delete_entry(root: &mut TreeNode, path: &KeyPath) -> bool {
    if path.is_empty() {
        return false;
    }

    let parent = match descend_to_parent(root, path, false) {
        Ok(Some(parent)) => parent,
        _ => return false,
    };

    match (parent, path.last().expect("non-empty path")) {
        (TreeNode::Map(map), PathSegment::Key(key)) => map.shift_remove(key).is_some(),
        (TreeNode::List(items), PathSegment::Index(index)) => {
            if *index < items.len() {
                items.remove(*index);
                true
            } else {
                false
            }
        }
        _ => false,
    }
}

/// 改写路径末端的键值对
///
/// 定位末段父节点后，以 `f(当前键, 当前值) -> (新键, 新值)`
/// 替换条目，并保持其在映射中的位置。既用于纯重命名
/// （新键、原值），也用于给值打标记（原键、包装值）。
///
/// # 返回
/// 路径无法解析时返回 Ok(false)；列表元素只能换值不能换名
pub fn update_entry<F>(root: &mut TreeNode, path: &KeyPath, f: F) -> Result<bool, EditError>
where
    F: FnOnce(&str, TreeNode) -> (String, TreeNode),
{
    if path.is_empty() {
        return Ok(false);
    }

    let parent = match descend_to_parent(root, path, false)? {
        Some(parent) => parent,
        None => return Ok(false),
    };

    match (parent, path.last().expect("non-empty path")) {
        (TreeNode::Map(map), PathSegment::Key(key)) => {
            let slot = match map.get_index_of(key.as_str()) {
                Some(slot) => slot,
                None => return Ok(false),
            };

            let (old_key, old_value) = map.shift_remove_index(slot).expect("index just resolved");
            let (new_key, new_value) = f(&old_key, old_value);
            map.shift_insert(slot, new_key, new_value);
            Ok(true)
        }
        (TreeNode::List(items), PathSegment::Index(index)) => {
            if *index >= items.len() {
                return Ok(false);
            }

            let numeral = index.to_string();
            let old_value = std::mem::replace(&mut items[*index], TreeNode::Value(String::new()));
            let (new_key, new_value) = f(&numeral, old_value);

            items[*index] = new_value;

            if new_key != numeral {
                return Err(EditError::TypeMismatch(
                    path.to_string(),
                    "cannot rename a list element".to_string(),
                ));
            }

            Ok(true)
        }
        _ => Ok(false),
    }
}
