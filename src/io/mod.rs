/// IO 抽象层
///
/// - **traits**: 编解码 trait 与显式能力表
/// - **json / yaml**: 单语言格式的默认实现
/// - **csv**: 多语言扁平表格式（扁平路径解码器）
pub mod csv;
pub mod json;
pub mod traits;
pub mod yaml;

pub use self::csv::{flatten, CsvCodec};
pub use self::json::JsonCodec;
pub use self::traits::{CodecRegistry, TranslationCodec};
pub use self::yaml::YamlCodec;
