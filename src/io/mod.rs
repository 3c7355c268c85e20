pub mod fs;
pub mod source;
pub mod writer;

pub use fs::{display_name, expand_path, is_markdown, modified_rfc3339, read_bytes};
pub use source::{path_list, sources_from_args, Source, SourceDocument, STDIN_MARKER};
pub use writer::write_json_line;
