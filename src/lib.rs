pub mod editor;
pub mod io;
pub mod locale;
pub mod path;
pub mod translation_file;
pub mod tree;
pub mod utils;

// 重新导出主要结构
pub use editor::{ChangeAction, EditEngine, EditOutcome, FileChange, OUTDATED_MODIFIER};
pub use io::{CodecRegistry, CsvCodec, JsonCodec, TranslationCodec, YamlCodec};
pub use locale::Locale;
pub use path::{KeyPath, PathSegment};
pub use translation_file::{
    EditConfig, TranslationFile, TranslationFileSet, TranslationFileType, TranslationSetStats,
};
pub use tree::{add_item_to_map, delete_entry, get_value_at_path, update_entry, TreeNode};
pub use utils::{create_backup, is_valid_key, EditError};

// 常量定义
pub const SUPPORTED_EXTENSIONS: &[&str] = &["json", "yaml", "yml", "csv"];
