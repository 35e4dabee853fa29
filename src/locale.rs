use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::EditError;

/// 语言标识符（例如 "en"、"de-CH"）
///
/// 不可变的语言标签；相等性为精确匹配，用于区分
/// “同一命名空间的不同语言文件”与“同一语言的不同命名空间文件”。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// 获取语言标签字符串
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 检查标签子段是否合法（ASCII字母数字）
    fn is_valid_subtag(subtag: &str) -> bool {
        !subtag.is_empty()
            && subtag.len() <= 8
            && subtag.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

impl FromStr for Locale {
    type Err = EditError;

    /// 解析语言标签
    ///
    /// 要求首段为2-3位字母，后续子段以 '-' 连接
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let mut subtags = tag.split('-');

        let primary = subtags.next().unwrap_or("");
        let primary_ok = (2..=3).contains(&primary.len())
            && primary.chars().all(|c| c.is_ascii_alphabetic());

        if !primary_ok || !tag.split('-').skip(1).all(Self::is_valid_subtag) {
            return Err(EditError::InvalidLocale(tag.to_string()));
        }

        Ok(Locale(tag.to_string()))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_tags() {
        assert_eq!(Locale::from_str("en").unwrap().as_str(), "en");
        assert_eq!(Locale::from_str("de-CH").unwrap().as_str(), "de-CH");
        assert_eq!(Locale::from_str("zh-Hans-CN").unwrap().as_str(), "zh-Hans-CN");
    }

    #[test]
    fn test_parse_invalid_tags() {
        assert!(Locale::from_str("").is_err());
        assert!(Locale::from_str("e").is_err());
        assert!(Locale::from_str("en_US").is_err());
        assert!(Locale::from_str("en-").is_err());
        assert!(Locale::from_str("1234").is_err());
    }

    #[test]
    fn test_exact_equality() {
        // 相等性为精确匹配，大小写不同视为不同语言
        let a = Locale::from_str("de-CH").unwrap();
        let b = Locale::from_str("de-ch").unwrap();
        assert_ne!(a, b);
    }
}
