//! Record assembly
//!
//! A record is the decoded front matter plus three computed fields. The
//! computed fields always win over front matter keys of the same name.

use crate::core::value::Metadata;
use serde_json::Value as JsonValue;
use std::io::{self, Write};

/// Field holding the display name of the source file
pub const FILENAME_FIELD: &str = "filename";
/// Field holding the document body
pub const BODY_FIELD: &str = "body";
/// Field holding the RFC 3339 modification time of the source file
pub const MTIME_FIELD: &str = "mtime";

/// Computed fields, in the order conflicts are reported
pub const RESERVED_FIELDS: [&str; 3] = [FILENAME_FIELD, BODY_FIELD, MTIME_FIELD];

/// Reserved field names present in `metadata`, in [`RESERVED_FIELDS`] order.
pub fn conflicts(metadata: Option<&Metadata>) -> Vec<&'static str> {
    let Some(metadata) = metadata else {
        return Vec::new();
    };
    RESERVED_FIELDS
        .into_iter()
        .filter(|name| metadata.contains_key(*name))
        .collect()
}

/// Write one warning line to `sink` for every reserved field set in `metadata`.
pub fn warn_conflicts<W: Write + ?Sized>(metadata: Option<&Metadata>, sink: &mut W) -> io::Result<()> {
    for name in conflicts(metadata) {
        writeln!(
            sink,
            "warning: frontmatter property \"{}\" conflicts with default property, using default value",
            name
        )?;
    }
    Ok(())
}

/// Build the output record for one document.
///
/// `mtime` is `None` for documents read from standard input, in which case
/// the field is left out entirely (a front matter `mtime` is still dropped).
pub fn assemble(metadata: Option<Metadata>, filename: &str, body: &str, mtime: Option<&str>) -> Metadata {
    let mut record: Metadata = metadata
        .into_iter()
        .flatten()
        .filter(|(key, _)| !RESERVED_FIELDS.contains(&key.as_str()))
        .collect();
    record.insert(FILENAME_FIELD.to_string(), JsonValue::from(filename));
    record.insert(BODY_FIELD.to_string(), JsonValue::from(body));
    if let Some(mtime) = mtime {
        record.insert(MTIME_FIELD.to_string(), JsonValue::from(mtime));
    }
    record
}
