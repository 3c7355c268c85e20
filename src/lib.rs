//! fmd2json: convert markdown documents with YAML front matter into JSON lines
//!
//! Each document becomes one JSON object holding its front matter properties
//! plus three computed fields:
//!
//! - `filename`: the file's base name without its markdown extension
//!   (empty for standard input)
//! - `body`: everything after the front matter block
//! - `mtime`: the file's modification time as RFC 3339 (files only)
//!
//! The computed fields always override front matter properties of the same
//! name; each such conflict is reported on the diagnostics stream. An optional
//! jq expression can reshape every record before it is written.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fmd2json::{ConvertOptions, Converter, SourceDocument, Result};
//!
//! fn main() -> Result<()> {
//!     let converter = Converter::new(ConvertOptions {
//!         query: Some("{title, filename}".to_string()),
//!         raw_output: false,
//!     })?;
//!
//!     let doc = SourceDocument::from_file("notes/hello.md".as_ref())?;
//!     converter.convert(&doc, &mut std::io::stdout(), &mut std::io::stderr())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Splitting front matter
//!
//! ```rust
//! use fmd2json::core::split;
//!
//! let (front_matter, body) = split("---\ntitle: Hello\n---\n# Hello\n");
//! assert_eq!(front_matter, Some("title: Hello"));
//! assert_eq!(body, "# Hello\n");
//! ```
//!
//! # Architecture
//!
//! - [`core`]: front matter splitting, YAML decoding, record assembly and jq queries
//! - [`io`]: input sources, file access and JSON line output
//! - [`app`]: the per-run driver used by the `fmd2json` binary
//! - [`error`]: error types

// Public API exports
pub use app::{run, ConvertOptions, Converter};
pub use error::{Fmd2JsonError, Result};

pub use crate::core::{JqQuery, Metadata, MetadataDecoder, YamlDecoder};
pub use io::{Source, SourceDocument};

pub mod app;
pub mod args;
pub mod core;
pub mod error;
pub mod io;
