use thiserror::Error;
use std::path::Path;

/// 自定义错误类型
#[derive(Error, Debug)]
pub enum EditError {
    #[error("Unsupported file type for editing: {0}")]
    UnsupportedFileType(String),

    #[error("Namespace mode requires a namespaced path, got: {0}")]
    MissingNamespace(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid locale tag: {0}")]
    InvalidLocale(String),

    #[error("Decoding failed at '{0}': missing indices")]
    MissingIndices(String),

    #[error("Type mismatch at '{0}': {1}")]
    TypeMismatch(String, String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// 键段验证函数
///
/// 合法的映射键段：非空、不含控制字符和空白
pub fn is_valid_key(segment: &str) -> bool {
    if segment.is_empty() {
        return false;
    }

    segment
        .chars()
        .all(|c| !c.is_control() && !c.is_whitespace())
}

/// 检查路径段是否为列表索引（纯数字）
pub fn is_index_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit())
}

/// 创建文件备份
pub fn create_backup(file_path: &Path) -> Result<std::path::PathBuf, EditError> {
    if !file_path.exists() {
        return Err(EditError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "原文件不存在"
        )));
    }

    let timestamp = chrono::Local::now().format("%Y-%m-%d-%H-%M-%S");
    let backup_path = file_path.with_extension(format!("{}.bak", timestamp));

    std::fs::copy(file_path, &backup_path)
        .map_err(EditError::IoError)?;

    Ok(backup_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_validation() {
        // 有效键段
        assert!(is_valid_key("title"));
        assert!(is_valid_key("loginPage"));
        assert!(is_valid_key("title(OUTDATED)"));
        assert!(is_valid_key("标题"));

        // 无效键段
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("two words"));
        assert!(!is_valid_key("tab\there"));
    }

    #[test]
    fn test_index_segment() {
        assert!(is_index_segment("0"));
        assert!(is_index_segment("42"));
        assert!(!is_index_segment("4a"));
        assert!(!is_index_segment(""));
        assert!(!is_index_segment("-1"));
    }

    #[test]
    fn test_missing_indices_message() {
        let err = EditError::MissingIndices("a.2.title".to_string());
        assert!(err.to_string().contains("missing indices"));
        assert!(err.to_string().contains("a.2.title"));
    }
}
