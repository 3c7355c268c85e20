//! Input sources
//!
//! A run reads documents from explicit path arguments, from standard input
//! (the `-` argument), or, when no paths are given, from a newline-delimited
//! list of paths read from standard input.

use crate::error::{Fmd2JsonError, Result};
use crate::io::fs::{display_name, expand_path, modified_rfc3339, read_bytes};
use std::io::{BufRead, Read};
use std::path::{Path, PathBuf};

/// Path argument that stands for standard input
pub const STDIN_MARKER: &str = "-";

/// Where a document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    /// Classify one path argument.
    pub fn from_arg(arg: &Path) -> Self {
        if arg.as_os_str() == STDIN_MARKER {
            Source::Stdin
        } else {
            Source::File(arg.to_path_buf())
        }
    }
}

/// Turn path arguments into sources, expanding directories in place.
pub fn sources_from_args(args: &[PathBuf]) -> Vec<Source> {
    args.iter()
        .flat_map(|arg| match Source::from_arg(arg) {
            Source::Stdin => vec![Source::Stdin],
            Source::File(path) => expand_path(&path).into_iter().map(Source::File).collect(),
        })
        .collect()
}

/// Iterator over the paths listed one per line in `reader`.
///
/// Lines are trimmed and blank lines skipped. Every entry is a file path,
/// `-` included.
pub fn path_list<R: BufRead>(reader: R) -> impl Iterator<Item = Result<PathBuf>> {
    reader.lines().filter_map(|line| match line {
        Ok(line) => {
            let line = line.trim();
            (!line.is_empty()).then(|| Ok(PathBuf::from(line)))
        }
        Err(e) => Some(Err(Fmd2JsonError::ReadStdin(e))),
    })
}

/// One input document, read fully into memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Display name, empty for standard input
    pub name: String,
    /// RFC 3339 modification time, `None` for standard input
    pub mtime: Option<String>,
    pub content: Vec<u8>,
}

impl SourceDocument {
    /// Read a file and its modification time.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = read_bytes(path)?;
        let mtime = modified_rfc3339(path)?;
        Ok(Self {
            name: display_name(path),
            mtime: Some(mtime),
            content,
        })
    }

    /// Read a whole document from standard input.
    pub fn from_stdin<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .map_err(Fmd2JsonError::ReadStdin)?;
        Ok(Self {
            name: String::new(),
            mtime: None,
            content,
        })
    }
}
