//! Metadata values and YAML decoding
//!
//! Front matter is decoded with `serde_yaml` and converted into `serde_json`
//! values, which is the representation records, the jq engine and the output
//! writer all share. Key order is preserved through the whole pipeline.

use crate::error::{Fmd2JsonError, Result};
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

/// Ordered key/value mapping decoded from a front matter block
pub type Metadata = serde_json::Map<String, JsonValue>;

/// Capability for turning raw front matter text into a [`Metadata`] mapping.
///
/// `Ok(None)` means the header carried no data at all, which is different
/// from an empty mapping.
pub trait MetadataDecoder {
    fn decode(&self, text: &str) -> Result<Option<Metadata>>;
}

/// Decoder for YAML front matter
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlDecoder;

impl YamlDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataDecoder for YamlDecoder {
    fn decode(&self, text: &str) -> Result<Option<Metadata>> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let yaml: YamlValue = serde_yaml::from_str(text)
            .map_err(|e| Fmd2JsonError::decode(format!("YAML parse error: {}", e)))?;

        match YamlJsonConverter::yaml_to_json(&yaml)? {
            JsonValue::Object(map) => Ok(Some(map)),
            JsonValue::Null => Ok(None),
            other => Err(Fmd2JsonError::decode(format!(
                "expected a mapping, found {}",
                json_type_name(&other)
            ))),
        }
    }
}

/// Utilities for converting YAML values into JSON values
pub struct YamlJsonConverter;

impl YamlJsonConverter {
    /// Convert a YAML value into a JSON value.
    ///
    /// Integers stay integers and floats stay floats. Tags are dropped in
    /// favour of the tagged value. Scalar mapping keys are stringified.
    pub fn yaml_to_json(yaml: &YamlValue) -> Result<JsonValue> {
        match yaml {
            YamlValue::Null => Ok(JsonValue::Null),
            YamlValue::Bool(b) => Ok(JsonValue::Bool(*b)),
            YamlValue::Number(n) => Self::number_to_json(n),
            YamlValue::String(s) => Ok(JsonValue::String(s.clone())),
            YamlValue::Sequence(seq) => seq
                .iter()
                .map(Self::yaml_to_json)
                .collect::<Result<Vec<_>>>()
                .map(JsonValue::Array),
            YamlValue::Mapping(map) => {
                let mut object = serde_json::Map::with_capacity(map.len());
                for (k, v) in map {
                    object.insert(Self::key_to_string(k)?, Self::yaml_to_json(v)?);
                }
                Ok(JsonValue::Object(object))
            }
            YamlValue::Tagged(tagged) => Self::yaml_to_json(&tagged.value),
        }
    }

    fn number_to_json(n: &serde_yaml::Number) -> Result<JsonValue> {
        if let Some(i) = n.as_i64() {
            Ok(JsonValue::Number(i.into()))
        } else if let Some(u) = n.as_u64() {
            Ok(JsonValue::Number(u.into()))
        } else if let Some(f) = n.as_f64() {
            serde_json::Number::from_f64(f)
                .map(JsonValue::Number)
                .ok_or_else(|| Fmd2JsonError::decode(format!("cannot represent number {} in JSON", f)))
        } else {
            Err(Fmd2JsonError::decode(format!("unsupported number {}", n)))
        }
    }

    fn key_to_string(key: &YamlValue) -> Result<String> {
        match key {
            YamlValue::String(s) => Ok(s.clone()),
            YamlValue::Number(n) => Ok(n.to_string()),
            YamlValue::Bool(b) => Ok(b.to_string()),
            YamlValue::Null => Ok("null".to_string()),
            YamlValue::Tagged(tagged) => Self::key_to_string(&tagged.value),
            YamlValue::Sequence(_) | YamlValue::Mapping(_) => Err(Fmd2JsonError::decode(
                format!("unsupported mapping key {:?}", key),
            )),
        }
    }
}

/// Human-readable name of a JSON value's type, as jq's `type` would report it
pub fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
