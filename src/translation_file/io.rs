use std::path::Path;
use std::str::FromStr;

use crate::locale::Locale;

use super::TranslationFileType;

/// 解析文件名获取命名空间、语言和文件类型
///
/// 约定：`Namespace_Locale.ext`（命名空间模式）或 `Locale.ext`。
/// 在最后一个 '_' 处切分；CSV 文件的语言在列里，不走这里。
pub(crate) fn parse_filename(
    path: &Path,
    namespaces: bool,
) -> Result<(Option<String>, Locale, TranslationFileType), Box<dyn std::error::Error>> {
    let filename = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or("无效的文件名")?;

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or("无效的文件扩展名")?;

    let file_type =
        TranslationFileType::from_extension(extension).ok_or("不支持的翻译文件类型")?;

    let parts: Vec<&str> = filename.rsplitn(2, '_').collect();

    let (namespace, tag) = if parts.len() == 2 {
        (Some(parts[1].to_string()), parts[0])
    } else {
        (None, parts[0])
    };

    if namespaces && namespace.is_none() {
        return Err(format!(
            "文件名格式错误，命名空间模式下应为：Namespace_Locale.{}",
            file_type.to_extension()
        )
        .into());
    }

    let locale = Locale::from_str(tag)?;

    Ok((namespace, locale, file_type))
}

/// 解析 CSV 文件名获取命名空间
///
/// CSV 的文件主干即命名空间名（命名空间模式下）
pub(crate) fn parse_csv_filename(
    path: &Path,
    namespaces: bool,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let filename = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or("无效的文件名")?;

    if namespaces {
        Ok(Some(filename.to_string()))
    } else {
        Ok(None)
    }
}

/// 构造约定文件名
pub(crate) fn build_filename(
    directory: &Path,
    namespace: Option<&str>,
    locale: &Locale,
    file_type: TranslationFileType,
) -> std::path::PathBuf {
    let filename = match namespace {
        Some(namespace) => format!("{}_{}.{}", namespace, locale, file_type.to_extension()),
        None => format!("{}.{}", locale, file_type.to_extension()),
    };
    directory.join(filename)
}
