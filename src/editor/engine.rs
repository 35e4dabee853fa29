/// 编辑引擎 - 五个跨文件操作
///
/// 每个操作是对文件集合的一趟遍历，调用间不保留状态。
/// 引擎自身不持有任何树：每个被触及的文件经历一次
/// 读取 -> 变更 -> 写回，然后树被丢弃。

use std::str::FromStr;

use crate::locale::Locale;
use crate::path::KeyPath;
use crate::translation_file::{TranslationFile, TranslationFileSet};
use crate::tree::{add_item_to_map, delete_entry, get_value_at_path, update_entry, TreeNode};
use crate::utils::EditError;

use super::outcome::{ChangeAction, EditOutcome, FileChange};

/// 过期标记：附在键名之后，值保持不动
pub const OUTDATED_MODIFIER: &str = "(OUTDATED)";

/// 判定 move 是否为原地重命名
///
/// 重命名：长度相等、（命名空间模式下）命名空间段相等、
/// 且除末段外所有段两两相等。否则按“搬迁”处理：
/// 从源删除，再插入目标，值可能因此跨文件移动。
pub fn classify_rename(origin: &KeyPath, destination: &KeyPath, namespaces: bool) -> bool {
    if origin.len() != destination.len() {
        return false;
    }

    if namespaces && origin.first_key() != destination.first_key() {
        return false;
    }

    origin.parent_segments() == destination.parent_segments()
}

/// 编辑引擎
///
/// # 核心特性
/// - **单趟**: 每个操作顺序遍历集合，文件逐个读改写
/// - **无副产物**: 只返回结构化结果，进度渲染交给调用方
/// - **容缺**: “某语言没有这个键”是正常结果，整体不报错
pub struct EditEngine<'a> {
    set: &'a TranslationFileSet,
}

impl<'a> EditEngine<'a> {
    /// 创建编辑引擎
    pub fn new(set: &'a TranslationFileSet) -> Self {
        Self { set }
    }

    fn namespaces(&self) -> bool {
        self.set.config.namespaces
    }

    fn backup(&self) -> bool {
        self.set.config.backup
    }

    /// 解析逻辑路径并做命名空间预检
    ///
    /// 命名空间模式下首段即命名空间名，路径必须至少还有
    /// 第二段；不满足属于用法错误，在触碰任何文件前拒绝。
    fn parse_logical_path(&self, raw: &str) -> Result<KeyPath, EditError> {
        let path = KeyPath::parse(raw)?;

        if self.namespaces() && (path.len() < 2 || path.first_key().is_none()) {
            return Err(EditError::MissingNamespace(raw.to_string()));
        }

        Ok(path)
    }

    fn namespace_of<'p>(&self, path: &'p KeyPath) -> Option<&'p str> {
        if self.namespaces() {
            path.first_key()
        } else {
            None
        }
    }

    /// 文件内部解析用的路径（命名空间模式下剥离首段）
    fn strip_namespace(&self, path: &KeyPath) -> KeyPath {
        if self.namespaces() {
            path.strip_first()
        } else {
            path.clone()
        }
    }

    fn record(&self, outcome: &mut EditOutcome, file: &TranslationFile, action: ChangeAction) {
        outcome.add_change(FileChange {
            path: file.path.clone(),
            locale: file.locale.clone(),
            action,
        });
    }

    /// 移动条目：原地重命名或跨命名空间搬迁
    pub fn move_entry(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<EditOutcome, Box<dyn std::error::Error>> {
        let origin_path = self.parse_logical_path(origin)?;
        let destination_path = self.parse_logical_path(destination)?;

        if classify_rename(&origin_path, &destination_path, self.namespaces()) {
            self.rename_in_place(&origin_path, &destination_path)
        } else {
            self.relocate(&origin_path, &destination_path)
        }
    }

    /// 原地重命名：每个命中文件一次树变更、一次写回
    fn rename_in_place(
        &self,
        origin: &KeyPath,
        destination: &KeyPath,
    ) -> Result<EditOutcome, Box<dyn std::error::Error>> {
        let mut outcome = EditOutcome::new();
        let namespace = self.namespace_of(origin);
        let rel = self.strip_namespace(origin);
        let new_key = destination.last().expect("已通过预检的非空路径").to_string();

        for file in &self.set.files {
            if !file.matches_namespace(self.namespaces(), namespace) {
                continue;
            }

            let mut tree = file.read_tree(self.set.registry())?;
            if get_value_at_path(&tree, &rel).is_none() {
                continue;
            }

            update_entry(&mut tree, &rel, |_key, value| (new_key.clone(), value))?;
            file.write_tree(&tree, self.set.registry(), self.backup())?;

            self.record(
                &mut outcome,
                file,
                ChangeAction::Renamed {
                    from: origin.to_string(),
                    to: destination.to_string(),
                },
            );
        }

        if outcome.is_empty() {
            outcome.mark_origin_missing();
        }
        Ok(outcome)
    }

    /// 搬迁：先从源命名空间删除并捕获值，再按语言插入目标文件
    fn relocate(
        &self,
        origin: &KeyPath,
        destination: &KeyPath,
    ) -> Result<EditOutcome, Box<dyn std::error::Error>> {
        let mut outcome = EditOutcome::new();
        let captured = self.capture_origin_values(origin, &mut outcome, true)?;

        if captured.is_empty() {
            outcome.mark_origin_missing();
            return Ok(outcome);
        }

        self.insert_captured(destination, &captured, &mut outcome)?;
        Ok(outcome)
    }

    /// 复制条目：源文件不动，目标文件各得一份独立副本
    pub fn copy_entry(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<EditOutcome, Box<dyn std::error::Error>> {
        let origin_path = self.parse_logical_path(origin)?;
        let destination_path = self.parse_logical_path(destination)?;

        let mut outcome = EditOutcome::new();
        let captured = self.capture_origin_values(&origin_path, &mut outcome, false)?;

        if captured.is_empty() {
            outcome.mark_origin_missing();
            return Ok(outcome);
        }

        self.insert_captured(&destination_path, &captured, &mut outcome)?;
        Ok(outcome)
    }

    /// 第一趟：在源命名空间的文件里捕获源值
    ///
    /// # 参数
    /// * `remove` - true 时同时删除源条目并写回（move 的搬迁分支）
    fn capture_origin_values(
        &self,
        origin: &KeyPath,
        outcome: &mut EditOutcome,
        remove: bool,
    ) -> Result<Vec<(Locale, TreeNode)>, Box<dyn std::error::Error>> {
        let namespace = self.namespace_of(origin);
        let rel = self.strip_namespace(origin);
        let mut captured = Vec::new();

        for file in &self.set.files {
            if !file.matches_namespace(self.namespaces(), namespace) {
                continue;
            }

            let mut tree = file.read_tree(self.set.registry())?;
            let value = match get_value_at_path(&tree, &rel) {
                Some(value) => value.clone(),
                None => continue,
            };

            if remove {
                delete_entry(&mut tree, &rel);
                file.write_tree(&tree, self.set.registry(), self.backup())?;
                self.record(
                    outcome,
                    file,
                    ChangeAction::Deleted {
                        path: origin.to_string(),
                        removed: true,
                    },
                );
            }

            captured.push((file.locale.clone(), value));
        }

        Ok(captured)
    }

    /// 第二趟：把捕获的值插入同语言、目标命名空间的文件
    fn insert_captured(
        &self,
        destination: &KeyPath,
        captured: &[(Locale, TreeNode)],
        outcome: &mut EditOutcome,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let namespace = self.namespace_of(destination);
        let rel = self.strip_namespace(destination);

        for (locale, value) in captured {
            for file in &self.set.files {
                if !file.matches_locale(locale)
                    || !file.matches_namespace(self.namespaces(), namespace)
                {
                    continue;
                }

                let mut tree = file.read_tree(self.set.registry())?;
                // 每个目标各插入一份独立克隆，互不共享结构
                add_item_to_map(&mut tree, &rel, value.clone())?;
                file.write_tree(&tree, self.set.registry(), self.backup())?;

                self.record(
                    outcome,
                    file,
                    ChangeAction::Inserted {
                        path: destination.to_string(),
                    },
                );
            }
        }

        Ok(())
    }

    /// 删除条目：不检查存在性，命中命名空间的文件一律写回
    pub fn delete_path(&self, raw: &str) -> Result<EditOutcome, Box<dyn std::error::Error>> {
        let path = self.parse_logical_path(raw)?;
        let namespace = self.namespace_of(&path);
        let rel = self.strip_namespace(&path);
        let mut outcome = EditOutcome::new();

        for file in &self.set.files {
            if !file.matches_namespace(self.namespaces(), namespace) {
                continue;
            }

            let mut tree = file.read_tree(self.set.registry())?;
            let removed = delete_entry(&mut tree, &rel);
            file.write_tree(&tree, self.set.registry(), self.backup())?;

            self.record(
                &mut outcome,
                file,
                ChangeAction::Deleted {
                    path: raw.to_string(),
                    removed,
                },
            );
        }

        Ok(outcome)
    }

    /// 标记过期：基准语言之外的命中文件，键名追加过期标记
    ///
    /// 基准语言是翻译的权威来源，“过期”对它没有意义，永远跳过
    pub fn flag_outdated(&self, raw: &str) -> Result<EditOutcome, Box<dyn std::error::Error>> {
        let path = self.parse_logical_path(raw)?;
        let namespace = self.namespace_of(&path);
        let rel = self.strip_namespace(&path);
        let mut outcome = EditOutcome::new();

        for file in &self.set.files {
            if file.matches_locale(&self.set.config.base_locale) {
                continue;
            }
            if !file.matches_namespace(self.namespaces(), namespace) {
                continue;
            }

            let mut tree = file.read_tree(self.set.registry())?;
            let flagged = update_entry(&mut tree, &rel, |key, value| {
                if key.ends_with(OUTDATED_MODIFIER) {
                    // 已标记过，保持原样
                    (key.to_string(), value)
                } else {
                    (format!("{}{}", key, OUTDATED_MODIFIER), value)
                }
            })?;

            if !flagged {
                continue;
            }

            file.write_tree(&tree, self.set.registry(), self.backup())?;
            self.record(
                &mut outcome,
                file,
                ChangeAction::Flagged {
                    path: raw.to_string(),
                },
            );
        }

        Ok(outcome)
    }

    /// 新增条目：插入语言和命名空间都命中的文件
    pub fn add_entry(
        &self,
        locale_tag: &str,
        raw: &str,
        value: &str,
    ) -> Result<EditOutcome, Box<dyn std::error::Error>> {
        let locale = Locale::from_str(locale_tag)?;
        let path = self.parse_logical_path(raw)?;
        let namespace = self.namespace_of(&path);
        let rel = self.strip_namespace(&path);
        let mut outcome = EditOutcome::new();

        for file in &self.set.files {
            if !file.matches_locale(&locale)
                || !file.matches_namespace(self.namespaces(), namespace)
            {
                continue;
            }

            let mut tree = file.read_tree(self.set.registry())?;
            add_item_to_map(&mut tree, &rel, TreeNode::Value(value.to_string()))?;
            file.write_tree(&tree, self.set.registry(), self.backup())?;

            self.record(
                &mut outcome,
                file,
                ChangeAction::Inserted {
                    path: raw.to_string(),
                },
            );
        }

        Ok(outcome)
    }
}
