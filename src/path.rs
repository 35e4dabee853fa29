use std::fmt;

use crate::utils::{is_index_segment, is_valid_key, EditError};

/// 路径段：映射键或列表索引
///
/// 数字段在解析时即归类为索引，避免各处重复做字符串转整数
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// 映射键
    Key(String),
    /// 列表索引（非负整数）
    Index(usize),
}

impl PathSegment {
    /// 获取映射键（索引段返回 None）
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathSegment::Key(key) => Some(key),
            PathSegment::Index(_) => None,
        }
    }

    /// 获取列表索引（键段返回 None）
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathSegment::Key(_) => None,
            PathSegment::Index(index) => Some(*index),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// 点分键路径
///
/// 每次操作构造一次后复用，不在调用点重复切分字符串
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    segments: Vec<PathSegment>,
}

impl KeyPath {
    /// 解析点分路径字符串
    ///
    /// # 参数
    /// * `raw` - 点分路径（如 "login.buttons.0.label"）
    ///
    /// # 返回
    /// 段非法（空段、含空白）时返回 InvalidPath
    pub fn parse(raw: &str) -> Result<Self, EditError> {
        if raw.is_empty() {
            return Err(EditError::InvalidPath("<empty>".to_string()));
        }

        let mut segments = Vec::new();
        for part in raw.split('.') {
            if is_index_segment(part) {
                // 纯数字段按列表索引处理
                let index: usize = part
                    .parse()
                    .map_err(|_| EditError::InvalidPath(raw.to_string()))?;
                segments.push(PathSegment::Index(index));
            } else if is_valid_key(part) {
                segments.push(PathSegment::Key(part.to_string()));
            } else {
                return Err(EditError::InvalidPath(raw.to_string()));
            }
        }

        Ok(KeyPath { segments })
    }

    /// 从路径段序列构造
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        KeyPath { segments }
    }

    /// 获取所有路径段
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// 获取路径段数量
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// 检查路径是否为空
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// 获取首段的映射键（命名空间模式下即命名空间名）
    pub fn first_key(&self) -> Option<&str> {
        self.segments.first().and_then(|s| s.as_key())
    }

    /// 获取末段
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// 去掉首段（命名空间段）后的路径
    ///
    /// 文件本身已处于某个命名空间内，解析文件内部路径前须剥离
    pub fn strip_first(&self) -> KeyPath {
        KeyPath {
            segments: self.segments.iter().skip(1).cloned().collect(),
        }
    }

    /// 除末段外的所有路径段
    pub fn parent_segments(&self) -> &[PathSegment] {
        let len = self.segments.len();
        &self.segments[..len.saturating_sub(1)]
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classifies_segments() {
        let path = KeyPath::parse("a.0.title").unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.segments()[0], PathSegment::Key("a".to_string()));
        assert_eq!(path.segments()[1], PathSegment::Index(0));
        assert_eq!(path.segments()[2], PathSegment::Key("title".to_string()));
    }

    #[test]
    fn test_parse_rejects_bad_segments() {
        assert!(KeyPath::parse("").is_err());
        assert!(KeyPath::parse("a..b").is_err());
        assert!(KeyPath::parse("a.b c").is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        let raw = "login.buttons.1.label";
        let path = KeyPath::parse(raw).unwrap();
        assert_eq!(path.to_string(), raw);
    }

    #[test]
    fn test_strip_first() {
        let path = KeyPath::parse("login.title").unwrap();
        let stripped = path.strip_first();
        assert_eq!(stripped.to_string(), "title");
        assert_eq!(path.first_key(), Some("login"));
    }

    #[test]
    fn test_parent_segments() {
        let path = KeyPath::parse("a.b.c").unwrap();
        assert_eq!(path.parent_segments().len(), 2);

        let single = KeyPath::parse("a").unwrap();
        assert!(single.parent_segments().is_empty());
    }
}
