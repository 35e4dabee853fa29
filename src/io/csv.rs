/// CSV 编解码实现（扁平路径解码器）
///
/// CSV 是唯一在此层展开结构的格式：表头为 `key,<语言>,<语言>,...`，
/// 每行以点分路径命名一个叶子。每行经由树访问器的插入路线建树，
/// 列表索引必须按 0 起递增连续出现，乱序是硬校验失败而非
/// 静默重排：静默重排会掩盖源文件里的书写错误。

use std::str::FromStr;

use indexmap::IndexMap;

use crate::locale::Locale;
use crate::path::{KeyPath, PathSegment};
use crate::tree::{add_item_to_map, get_value_at_path, TreeNode};
use crate::utils::EditError;

use super::traits::TranslationCodec;

/// 默认的 CSV 编解码器
#[derive(Debug, Clone, Default)]
pub struct CsvCodec;

impl CsvCodec {
    /// 解码整表：每个语言列一棵树
    ///
    /// # 返回
    /// 按列顺序的“语言 -> 树”映射；空表返回空映射
    pub fn decode_table(bytes: &[u8]) -> Result<IndexMap<Locale, TreeNode>, EditError> {
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(IndexMap::new());
        }

        let mut reader = csv::Reader::from_reader(bytes);

        let headers = reader.headers()?.clone();
        let locales: Vec<Locale> = headers
            .iter()
            .skip(1)
            .map(Locale::from_str)
            .collect::<Result<_, _>>()?;

        let mut trees: IndexMap<Locale, TreeNode> = locales
            .iter()
            .map(|locale| (locale.clone(), TreeNode::empty_map()))
            .collect();

        for record in reader.records() {
            let record = record?;
            let raw_path = record
                .get(0)
                .ok_or_else(|| EditError::InvalidPath("<empty row>".to_string()))?;
            let path = KeyPath::parse(raw_path)?;

            for (column, locale) in locales.iter().enumerate() {
                let cell = record.get(column + 1).unwrap_or("");
                if cell.is_empty() {
                    // 空单元格：该语言没有这个条目
                    continue;
                }

                let tree = trees.get_mut(locale).expect("column locale registered");
                check_list_indices(tree, &path)?;
                add_item_to_map(tree, &path, TreeNode::Value(cell.to_string()))?;
            }
        }

        Ok(trees)
    }
}

impl TranslationCodec for CsvCodec {
    fn embedded_locales(&self, bytes: &[u8]) -> Result<Vec<Locale>, EditError> {
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_reader(bytes);
        reader
            .headers()?
            .iter()
            .skip(1)
            .map(Locale::from_str)
            .collect()
    }

    fn decode(&self, bytes: &[u8], locale: &Locale) -> Result<TreeNode, EditError> {
        let mut trees = Self::decode_table(bytes)?;
        Ok(trees
            .shift_remove(locale)
            .unwrap_or_else(TreeNode::empty_map))
    }

    fn encode(
        &self,
        previous: Option<&[u8]>,
        locale: &Locale,
        tree: &TreeNode,
    ) -> Result<Vec<u8>, EditError> {
        let mut tables = match previous {
            Some(bytes) => Self::decode_table(bytes)?,
            None => IndexMap::new(),
        };
        tables.insert(locale.clone(), tree.clone());

        // 把所有语言的结构并成一棵树再展开取行序。
        // 直接按首次出现顺序拼接扁平行会打乱某些语言列的
        // 索引顺序，使写出的文件过不了自己的连续性校验。
        let mut merged = TreeNode::empty_map();
        let mut flats: IndexMap<&Locale, IndexMap<String, String>> = IndexMap::new();

        for (table_locale, table_tree) in &tables {
            let rows: IndexMap<String, String> = flatten(table_tree).into_iter().collect();
            for raw_path in rows.keys() {
                let path = KeyPath::parse(raw_path)?;
                if get_value_at_path(&merged, &path).is_none() {
                    add_item_to_map(&mut merged, &path, TreeNode::Value(String::new()))?;
                }
            }
            flats.insert(table_locale, rows);
        }

        let paths: Vec<String> = flatten(&merged).into_iter().map(|(path, _)| path).collect();

        let mut buffer = Vec::new();
        {
            let mut writer = csv::Writer::from_writer(&mut buffer);

            let mut header = vec!["key".to_string()];
            header.extend(tables.keys().map(|l| l.as_str().to_string()));
            writer.write_record(&header)?;

            for path in &paths {
                let mut row = vec![path.clone()];
                for locale_rows in flats.values() {
                    row.push(locale_rows.get(path).cloned().unwrap_or_default());
                }
                writer.write_record(&row)?;
            }

            writer.flush()?;
        }

        Ok(buffer)
    }
}

/// 列表索引的连续性校验
///
/// 对路径中的每个索引段，要求其父列表里所有更小的索引已经存在
/// （或该索引恰好是下一个待追加位置）。违反即整体解码失败，
/// 不产生可被误用的半成品树。
fn check_list_indices(root: &TreeNode, path: &KeyPath) -> Result<(), EditError> {
    let segments = path.segments();

    for (pos, segment) in segments.iter().enumerate() {
        let index = match segment {
            PathSegment::Index(index) => *index,
            PathSegment::Key(_) => continue,
        };

        let prefix = KeyPath::from_segments(segments[..pos].to_vec());
        let existing_len = match get_value_at_path(root, &prefix) {
            Some(TreeNode::List(items)) => items.len(),
            _ => 0,
        };

        if index > existing_len {
            return Err(EditError::MissingIndices(path.to_string()));
        }
    }

    Ok(())
}

/// 将树展开为 (点分路径, 值) 行，按树序输出
pub fn flatten(tree: &TreeNode) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    flatten_into(tree, String::new(), &mut rows);
    rows
}

fn flatten_into(node: &TreeNode, prefix: String, rows: &mut Vec<(String, String)>) {
    match node {
        TreeNode::Value(text) => rows.push((prefix, text.clone())),
        TreeNode::List(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(child, join_segment(&prefix, &index.to_string()), rows);
            }
        }
        TreeNode::Map(map) => {
            for (key, child) in map {
                flatten_into(child, join_segment(&prefix, key), rows);
            }
        }
    }
}

fn join_segment(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}
