//! Conversion driver
//!
//! [`Converter`] turns one [`SourceDocument`] into its output lines and
//! [`run`] feeds it every document named on the command line, in order.

use crate::args::Cli;
use crate::core::front_matter::{has_opening, split};
use crate::core::query::{project, JqQuery};
use crate::core::record::{assemble, warn_conflicts};
use crate::core::value::{Metadata, MetadataDecoder, YamlDecoder};
use crate::error::Result;
use crate::io::source::{path_list, sources_from_args, Source, SourceDocument};
use crate::io::writer::write_json_line;
use log::{debug, info, warn};
use serde_json::Value as JsonValue;
use std::io::{BufRead, Write};
use std::path::Path;

/// Crate version reported by `--version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Source revision reported by `--version`, taken from `FMD2JSON_REVISION` at build time
pub const REVISION: &str = match option_env!("FMD2JSON_REVISION") {
    Some(revision) => revision,
    None => "HEAD",
};

/// Options that apply to every document of a run
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// jq expression applied to each record
    pub query: Option<String>,
    /// Write scalar query results as raw text
    pub raw_output: bool,
}

impl From<&Cli> for ConvertOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            query: cli.jq.clone(),
            raw_output: cli.raw_output,
        }
    }
}

/// Converts documents into JSON records, one document at a time
#[derive(Debug)]
pub struct Converter<D = YamlDecoder> {
    options: ConvertOptions,
    query: Option<JqQuery>,
    decoder: D,
}

impl Converter<YamlDecoder> {
    /// Create a converter for YAML front matter.
    ///
    /// The query, if any, is compiled here, so a bad expression fails before
    /// any document is read.
    pub fn new(options: ConvertOptions) -> Result<Self> {
        Self::with_decoder(options, YamlDecoder::new())
    }
}

impl<D: MetadataDecoder> Converter<D> {
    /// Create a converter with a custom front matter decoder
    pub fn with_decoder(options: ConvertOptions, decoder: D) -> Result<Self> {
        let query = options.query.as_deref().map(JqQuery::compile).transpose()?;
        Ok(Self {
            options,
            query,
            decoder,
        })
    }

    /// Assemble the record for `doc`, writing conflict warnings to `diag`.
    pub fn record<E: Write + ?Sized>(&self, doc: &SourceDocument, diag: &mut E) -> Result<JsonValue> {
        let content = String::from_utf8_lossy(&doc.content);
        let (front_matter, body) = split(&content);

        if front_matter.is_none() && has_opening(&content) {
            debug!("{}: front matter is never closed, using the whole document as body", label(doc));
        }

        let metadata = match front_matter {
            Some(text) => self.decode(doc, text)?,
            None => None,
        };

        warn_conflicts(metadata.as_ref(), diag)?;
        let record = assemble(metadata, &doc.name, body, doc.mtime.as_deref());
        Ok(JsonValue::Object(record))
    }

    /// Convert `doc` and write its output lines to `out`.
    pub fn convert<W, E>(&self, doc: &SourceDocument, out: &mut W, diag: &mut E) -> Result<()>
    where
        W: Write + ?Sized,
        E: Write + ?Sized,
    {
        let record = self.record(doc, diag)?;
        match &self.query {
            Some(query) => project(query, &record, out, self.options.raw_output),
            None => write_json_line(out, &record),
        }
    }

    /// Read the file at `path` and convert it.
    pub fn convert_file<W, E>(&self, path: &Path, out: &mut W, diag: &mut E) -> Result<()>
    where
        W: Write + ?Sized,
        E: Write + ?Sized,
    {
        debug!("Processing file: {}", path.display());
        let doc = SourceDocument::from_file(path)?;
        self.convert(&doc, out, diag)
    }

    fn decode(&self, doc: &SourceDocument, text: &str) -> Result<Option<Metadata>> {
        match self.decoder.decode(text) {
            Ok(metadata) => Ok(metadata),
            Err(e) if !e.is_fatal() => {
                warn!("{}: ignoring front matter: {}", label(doc), e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

fn label(doc: &SourceDocument) -> &str {
    if doc.name.is_empty() {
        "<stdin>"
    } else {
        &doc.name
    }
}

/// Run the command line described by `cli`.
///
/// Documents are read from the paths in `cli`, or from the path list on
/// `stdin` when there are none. Records go to `out`, conflict warnings to
/// `diag`. The first fatal error ends the run.
pub fn run<R, W, E>(cli: &Cli, stdin: &mut R, out: &mut W, diag: &mut E) -> Result<()>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
    E: Write + ?Sized,
{
    if cli.version {
        return print_version(out);
    }

    let converter = Converter::new(ConvertOptions::from(cli))?;

    if cli.paths.is_empty() {
        info!("Reading file list from standard input");
        for path in path_list(&mut *stdin) {
            converter.convert_file(&path?, out, diag)?;
        }
    } else {
        for source in sources_from_args(&cli.paths) {
            match source {
                Source::Stdin => {
                    debug!("Processing standard input");
                    let doc = SourceDocument::from_stdin(&mut *stdin)?;
                    converter.convert(&doc, out, diag)?;
                }
                Source::File(path) => converter.convert_file(&path, out, diag)?,
            }
        }
    }

    out.flush()?;
    Ok(())
}

/// Write the version line, `fmd2json v<version> (rev:<revision>)`.
pub fn print_version<W: Write + ?Sized>(out: &mut W) -> Result<()> {
    writeln!(out, "fmd2json v{} (rev:{})", VERSION, REVISION)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fmd2JsonError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn stdin_doc(content: &str) -> SourceDocument {
        SourceDocument {
            name: String::new(),
            mtime: None,
            content: content.as_bytes().to_vec(),
        }
    }

    fn convert(converter: &Converter, content: &str) -> (String, String) {
        let mut out = Vec::new();
        let mut diag = Vec::new();
        converter.convert(&stdin_doc(content), &mut out, &mut diag).unwrap();
        (String::from_utf8(out).unwrap(), String::from_utf8(diag).unwrap())
    }

    struct FailingDecoder;

    impl MetadataDecoder for FailingDecoder {
        fn decode(&self, _text: &str) -> Result<Option<Metadata>> {
            Err(Fmd2JsonError::Io(std::io::Error::new(std::io::ErrorKind::Other, "broken")))
        }
    }

    #[test]
    fn test_convert_stdin_document() {
        let converter = Converter::new(ConvertOptions::default()).unwrap();
        let (out, diag) = convert(&converter, "---\nprop1: aaa\n---\nbody body\n");
        assert_eq!(out, "{\"prop1\":\"aaa\",\"filename\":\"\",\"body\":\"body body\\n\"}\n");
        assert_eq!(diag, "");
    }

    #[test]
    fn test_invalid_yaml_is_ignored() {
        let converter = Converter::new(ConvertOptions::default()).unwrap();
        let (out, _) = convert(&converter, "---\n: : [\n---\nbody\n");
        assert_eq!(out, "{\"filename\":\"\",\"body\":\"body\\n\"}\n");
    }

    #[test]
    fn test_conflicts_are_reported() {
        let converter = Converter::new(ConvertOptions::default()).unwrap();
        let (out, diag) = convert(&converter, "---\nbody: fake\nfilename: x\n---\nreal\n");
        assert_eq!(out, "{\"filename\":\"\",\"body\":\"real\\n\"}\n");
        assert_eq!(diag.lines().count(), 2);
        assert!(diag.lines().next().unwrap().contains("\"filename\""));
    }

    #[test]
    fn test_record_with_query() {
        let options = ConvertOptions {
            query: Some(".title, .filename".to_string()),
            raw_output: true,
        };
        let converter = Converter::new(options).unwrap();
        let (out, _) = convert(&converter, "---\ntitle: Hello\n---\n");
        assert_eq!(out, "Hello\n\n");
    }

    #[test]
    fn test_bad_query_fails_on_construction() {
        let options = ConvertOptions {
            query: Some(".foo[".to_string()),
            raw_output: false,
        };
        let err = Converter::new(options).unwrap_err();
        assert!(matches!(err, Fmd2JsonError::QueryCompile { .. }));
    }

    #[test]
    fn test_fatal_decoder_error_propagates() {
        let converter = Converter::with_decoder(ConvertOptions::default(), FailingDecoder).unwrap();
        let mut out = Vec::new();
        let mut diag = Vec::new();
        let result = converter.convert(&stdin_doc("---\na: 1\n---\n"), &mut out, &mut diag);
        assert!(result.is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_record_value() {
        let converter = Converter::new(ConvertOptions::default()).unwrap();
        let mut diag = Vec::new();
        let record = converter.record(&stdin_doc("---\nn: 1.5\n---"), &mut diag).unwrap();
        assert_eq!(record, json!({"n": 1.5, "filename": "", "body": ""}));
    }

    #[test]
    fn test_print_version() {
        let mut out = Vec::new();
        print_version(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("fmd2json v"));
        assert!(text.contains("(rev:"));
    }
}
