use crate::error::{Fmd2JsonError, Result};
use chrono::{DateTime, Local, SecondsFormat};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// Extensions recognized as markdown content files
pub const MARKDOWN_EXTENSIONS: [&str; 5] = ["md", "markdown", "mdown", "mkd", "mkdn"];

pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| MARKDOWN_EXTENSIONS.iter().any(|m| ext.eq_ignore_ascii_case(m)))
        .unwrap_or(false)
}

/// Base name of `path` with a markdown extension stripped.
///
/// Names without a recognized extension are returned unchanged, and a file
/// named just `.md` becomes the empty string.
pub fn display_name(path: &Path) -> String {
    let base = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let Some((stem, ext)) = base.rsplit_once('.') else {
        return base;
    };
    if MARKDOWN_EXTENSIONS.iter().any(|m| ext.eq_ignore_ascii_case(m)) {
        return stem.to_string();
    }
    base
}

/// Expand a path argument: a directory yields the markdown files below it,
/// sorted by name; anything else is returned as-is and read as a file.
pub fn expand_path(path: &Path) -> Vec<PathBuf> {
    if !path.is_dir() {
        return vec![path.to_path_buf()];
    }
    WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_markdown(e.path()))
        .map(|e| e.into_path())
        .collect()
}

pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Fmd2JsonError::read_file(path, e))
}

/// Modification time of `path` as an RFC 3339 timestamp in local time.
pub fn modified_rfc3339(path: &Path) -> Result<String> {
    let modified = fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|e| Fmd2JsonError::stat(path, e))?;
    Ok(format_rfc3339(modified))
}

pub fn format_rfc3339(time: SystemTime) -> String {
    DateTime::<Local>::from(time).to_rfc3339_opts(SecondsFormat::Secs, true)
}
