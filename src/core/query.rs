//! jq queries over assembled records
//!
//! Expressions are compiled once with `jaq` (jq's standard library included)
//! and then run against every record. A query may produce any number of
//! outputs per record; each is written on its own line, either as compact
//! JSON or, in raw mode, as plain text when the output is a scalar.

use crate::error::{Fmd2JsonError, Result};
use crate::io::writer::write_json_line;
use jaq_core::load::{self, Arena, File, Loader};
use jaq_core::{Compiler, Ctx, Native, RcIter};
use jaq_json::Val;
use serde_json::{Number, Value as JsonValue};
use std::fmt;
use std::io::Write;

type Filter = jaq_core::Filter<Native<Val>>;

/// A compiled jq expression
pub struct JqQuery {
    filter: Filter,
    expr: String,
    // `input`/`inputs` see an exhausted stream
    inputs: RcIter<std::iter::Empty<std::result::Result<Val, String>>>,
}

impl JqQuery {
    /// Parse and compile `expr`.
    ///
    /// Syntax errors and references to undefined filters or variables are
    /// both reported as [`Fmd2JsonError::QueryCompile`].
    pub fn compile(expr: &str) -> Result<Self> {
        let arena = Arena::default();
        let loader = Loader::new(jaq_std::defs().chain(jaq_json::defs()));

        let modules = loader
            .load(&arena, File { code: expr, path: () })
            .map_err(|errs| {
                let reasons: Vec<String> = errs
                    .into_iter()
                    .flat_map(|(_, err)| describe_load_error(err))
                    .collect();
                Fmd2JsonError::query_compile(expr, reasons.join("; "))
            })?;

        let filter = Compiler::default()
            .with_funs(jaq_std::funs().chain(jaq_json::funs()))
            .compile(modules)
            .map_err(|errs| {
                let reasons: Vec<String> = errs
                    .into_iter()
                    .flat_map(|(_, undefined)| undefined)
                    .map(|(name, kind)| format!("undefined {} `{}`", kind.as_str(), name))
                    .collect();
                Fmd2JsonError::query_compile(expr, reasons.join("; "))
            })?;

        Ok(Self {
            filter,
            expr: expr.to_string(),
            inputs: RcIter::new(std::iter::empty()),
        })
    }

    /// The expression this query was compiled from
    pub fn expr(&self) -> &str {
        &self.expr
    }

    /// Run the query against `input`, yielding its outputs lazily in order.
    ///
    /// Runtime errors are yielded as [`Fmd2JsonError::QueryRuntime`]; outputs
    /// before the failing one are still produced.
    pub fn run<'a>(&'a self, input: &JsonValue) -> impl Iterator<Item = Result<JsonValue>> + 'a {
        self.filter
            .run((Ctx::new([], &self.inputs), Val::from(input.clone())))
            .map(|output| {
                output
                    .map(JsonValue::from)
                    .map_err(|e| Fmd2JsonError::query_runtime(e.to_string()))
            })
    }

    /// Hand every output of the query to `f`, in order.
    ///
    /// Stops at the first runtime error or the first error returned by `f`.
    pub fn for_each_output<F>(&self, input: &JsonValue, mut f: F) -> Result<()>
    where
        F: FnMut(JsonValue) -> Result<()>,
    {
        for output in self.run(input) {
            f(output?)?;
        }
        Ok(())
    }
}

impl fmt::Debug for JqQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JqQuery").field("expr", &self.expr).finish()
    }
}

fn describe_load_error(err: load::Error<&str>) -> Vec<String> {
    match err {
        load::Error::Io(errs) => errs
            .into_iter()
            .map(|(path, e)| format!("cannot load `{}`: {}", path, e))
            .collect(),
        load::Error::Lex(errs) => errs
            .into_iter()
            .map(|(expected, found)| unexpected(expected.as_str(), found))
            .collect(),
        load::Error::Parse(errs) => errs
            .into_iter()
            .map(|(expected, found)| unexpected(expected.as_str(), found))
            .collect(),
    }
}

fn unexpected(expected: &str, found: &str) -> String {
    let found: String = found.chars().take(16).collect();
    if found.is_empty() {
        format!("expected {}, found end of input", expected)
    } else {
        format!("expected {}, found `{}`", expected, found)
    }
}

/// Write every output of `query` for `record` to `out`, one per line.
///
/// With `raw_output`, scalar outputs are written as plain text (see
/// [`scalar_to_text`]); arrays and objects are always written as JSON.
pub fn project<W: Write + ?Sized>(
    query: &JqQuery,
    record: &JsonValue,
    out: &mut W,
    raw_output: bool,
) -> Result<()> {
    query.for_each_output(record, |value| write_output(&mut *out, &value, raw_output))
}

/// Compile `expr` and project `record` through it.
///
/// Nothing is written when the expression does not compile.
pub fn apply<W: Write + ?Sized>(expr: &str, record: &JsonValue, out: &mut W, raw_output: bool) -> Result<()> {
    let query = JqQuery::compile(expr)?;
    project(&query, record, out, raw_output)
}

fn write_output<W: Write + ?Sized>(out: &mut W, value: &JsonValue, raw_output: bool) -> Result<()> {
    if raw_output {
        if let Some(text) = scalar_to_text(value) {
            writeln!(out, "{}", text)?;
            return Ok(());
        }
    }
    write_json_line(out, value)
}

/// Render a scalar as raw text, `None` for arrays and objects.
///
/// Strings are returned verbatim and `null` becomes the empty string.
/// Integral floats lose their fractional part, other floats use the shortest
/// representation that reads back to the same value.
pub fn scalar_to_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(number_to_text(n)),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Null => Some(String::new()),
        JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}

fn number_to_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}
