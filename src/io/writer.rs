//! Line-delimited JSON output

use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// Serialize `value` as compact JSON followed by a newline.
///
/// `serde_json` never escapes HTML-sensitive characters, so `<`, `>` and `&`
/// are written as-is.
pub fn write_json_line<W, T>(out: &mut W, value: &T) -> Result<()>
where
    W: Write + ?Sized,
    T: Serialize + ?Sized,
{
    serde_json::to_writer(&mut *out, value)?;
    out.write_all(b"\n")?;
    Ok(())
}
