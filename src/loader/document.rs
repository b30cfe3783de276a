//! Document decoding at the transport boundary.
//!
//! The analysis service answers `{"filename": ..., "structure": {...}}`; saved
//! files may hold either that envelope or the bare structure. Syntax errors
//! and non-object documents are loader failures. Everything inside a
//! well-formed object is decoded leniently by
//! [`ProgramStructure::from_value`].

use serde_json::Value;

use crate::error::{P4LensError, Result};
use crate::program::ProgramStructure;

const ENVELOPE_STRUCTURE: &str = "structure";
const ENVELOPE_FILENAME: &str = "filename";

/// Parse document text into a structure.
///
/// `fallback_name` labels the program when neither the envelope nor the
/// `_filename` key names it.
pub fn parse_document(text: &str, fallback_name: Option<&str>) -> Result<ProgramStructure> {
    let value: Value = serde_json::from_str(text)?;

    let (structure_value, envelope_name) = match unwrap_envelope(&value) {
        Some((inner, name)) => (inner, Some(name)),
        None => (&value, None),
    };

    if !(structure_value.is_object() || structure_value.is_null()) {
        return Err(P4LensError::Document(format!(
            "expected a JSON object, found {}",
            json_kind(structure_value)
        )));
    }

    let mut structure = ProgramStructure::from_value(structure_value);
    if let Some(name) = envelope_name {
        structure.filename = Some(name.to_string());
    }
    if structure.filename.is_none() {
        structure.filename = fallback_name.map(str::to_string);
    }
    Ok(structure)
}

/// Recognize `{"filename": "<name>", "structure": ...}` with no other keys.
///
/// Both keys are required and the name must be a string. Stage values are
/// never strings, so a bare structure with a stage named `structure` or
/// `filename` is not mistaken for an envelope.
fn unwrap_envelope(value: &Value) -> Option<(&Value, &str)> {
    let obj = value.as_object()?;
    if obj.len() != 2 {
        return None;
    }
    let inner = obj.get(ENVELOPE_STRUCTURE)?;
    let name = obj.get(ENVELOPE_FILENAME)?.as_str()?;
    Some((inner, name))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
