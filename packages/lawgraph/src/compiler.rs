//! Input loading and the end-to-end compile entry points.

use std::fs;
use std::path::Path;

use serde::de::Error as _;
use serde_json::Value;

use crate::config::CompileOptions;
use crate::error::{LawGraphError, Result};
use crate::graph::{compile, LawGraph};
use crate::row::RawRow;

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse a flat JSON document into rows.
///
/// The document must be a non-empty array of objects. Unknown keys are
/// ignored; scalar values are read as text.
pub fn parse_rows(json: &str) -> Result<Vec<RawRow>> {
    let document: Value = serde_json::from_str(json)?;
    let elements = match document {
        Value::Array(elements) => elements,
        other => {
            return Err(LawGraphError::NotAList {
                found: json_type_name(&other).to_string(),
            })
        }
    };
    if elements.is_empty() {
        return Err(LawGraphError::EmptyInput);
    }

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            if !element.is_object() {
                return Err(LawGraphError::MalformedRow {
                    index,
                    source: serde_json::Error::custom(format!(
                        "expected an object, found {}",
                        json_type_name(&element)
                    )),
                });
            }
            serde_json::from_value(element)
                .map_err(|source| LawGraphError::MalformedRow { index, source })
        })
        .collect()
}

/// Read and parse a flat JSON file.
pub fn load_rows(path: &Path) -> Result<Vec<RawRow>> {
    let json = fs::read_to_string(path)?;
    let rows = parse_rows(&json)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "loaded flat JSON");
    Ok(rows)
}

/// Load a flat JSON file and compile it into a law graph.
///
/// # Arguments
/// * `path` - Flat JSON file: an array of row objects
/// * `options` - Synthetic-context mode and law label fallback
///
/// # Returns
/// The assembled `LawGraph`, with run statistics attached
pub fn compile_file(path: &Path, options: &CompileOptions) -> Result<LawGraph> {
    let rows = load_rows(path)?;
    compile(&rows, options)
}
