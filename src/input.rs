//! JSON input reader.
//!
//! Parses and validates the declarative ISA description into an
//! [`InputModel`]: a word length, a field table, and a format table.
//! Declaration order is preserved in both tables since it governs the
//! priority tie-break in [`crate::priority`] and the `OPCODE` encoding
//! order in [`crate::header`].

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{LayoutError, Result};
use crate::types::{FieldSpec, FormatSpec, InputModel, WordLength};

#[derive(Debug, Deserialize)]
struct RawInput {
    length: u32,
    fields: Vec<HashMap<String, FieldSpecJson>>,
    instructions: Vec<RawFormat>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FieldSpecJson {
    Int(u64),
    Str(String),
}

#[derive(Debug, Deserialize)]
struct RawFormat {
    format: String,
    insns: Vec<String>,
    operands: Vec<String>,
    #[serde(default)]
    comment: String,
}

/// Read and validate an input description from a file path.
pub fn parse_file(path: impl AsRef<Path>) -> Result<InputModel> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path)?;
    tracing::info!(path = %path.display(), "loaded ISA description");
    parse_str(&data)
}

/// Read and validate an input description from a JSON string.
pub fn parse_str(data: &str) -> Result<InputModel> {
    tracing::info!("parsing ISA description");
    let raw: RawInput =
        serde_json::from_str(data).map_err(|e| LayoutError::InputSchema {
            message: e.to_string(),
        })?;
    build_model(raw)
}

fn build_model(raw: RawInput) -> Result<InputModel> {
    if raw.length == 0 {
        return Err(LayoutError::InputSchema {
            message: "length must be a positive integer".into(),
        });
    }
    let length = WordLength(raw.length);

    tracing::info!("parsing fields");
    let mut fields: IndexMap<String, FieldSpec> = IndexMap::new();
    for entry in &raw.fields {
        for (name, spec) in entry {
            let (min, max) = parse_field_spec(spec, raw.length, name)?;
            if fields.insert(name.clone(), FieldSpec::new(name.clone(), min, max)).is_some() {
                return Err(LayoutError::InputSchema {
                    message: format!("field `{name}` declared more than once"),
                });
            }
        }
    }

    tracing::info!("parsing instructions");
    let mut formats: IndexMap<String, FormatSpec> = IndexMap::new();
    for fmt in raw.instructions {
        if fmt.insns.is_empty() {
            return Err(LayoutError::InputSchema {
                message: format!("format `{}` declares no instructions", fmt.format),
            });
        }
        for operand in &fmt.operands {
            if !fields.contains_key(operand) {
                return Err(LayoutError::InputSchema {
                    message: format!(
                        "format `{}` references undeclared field `{operand}`",
                        fmt.format
                    ),
                });
            }
        }
        let spec = FormatSpec {
            name: fmt.format.clone(),
            instructions: fmt.insns,
            operands: fmt.operands,
            comment: fmt.comment,
            bitmask: Vec::new(),
        };
        if formats.insert(fmt.format.clone(), spec).is_some() {
            return Err(LayoutError::InputSchema {
                message: format!("format `{}` declared more than once", fmt.format),
            });
        }
    }

    for name in fields.keys() {
        let referenced = formats.values().any(|f| f.operands.iter().any(|o| o == name));
        if !referenced {
            tracing::warn!(field = %name, "field is never referenced as an operand; it will never be placed");
        }
    }

    Ok(InputModel {
        length,
        fields,
        formats,
    })
}

fn parse_field_spec(spec: &FieldSpecJson, length: u32, name: &str) -> Result<(u32, u32)> {
    match spec {
        FieldSpecJson::Int(n) => {
            let n = u32::try_from(*n).map_err(|_| LayoutError::FieldSpec {
                field: name.into(),
                message: format!("width {n} does not fit in 32 bits"),
            })?;
            validate_bounds(name, n, n, length)?;
            Ok((n, n))
        }
        FieldSpecJson::Str(s) => {
            if let Some(rest) = s.strip_prefix(">=") {
                let min: u32 = rest.parse().map_err(|_| LayoutError::FieldSpec {
                    field: name.into(),
                    message: format!("invalid `>=N` spec: `{s}`"),
                })?;
                validate_bounds(name, min, length, length)?;
                Ok((min, length))
            } else {
                let n: u32 = s.parse().map_err(|_| LayoutError::FieldSpec {
                    field: name.into(),
                    message: format!(
                        "field spec is neither an integer nor a `>=N` string: `{s}`"
                    ),
                })?;
                validate_bounds(name, n, n, length)?;
                Ok((n, n))
            }
        }
    }
}

fn validate_bounds(name: &str, min: u32, max: u32, length: u32) -> Result<()> {
    if min < 1 {
        return Err(LayoutError::FieldSpec {
            field: name.into(),
            message: "width must be at least 1 bit".into(),
        });
    }
    if min > max {
        return Err(LayoutError::FieldSpec {
            field: name.into(),
            message: format!("min ({min}) exceeds max ({max})"),
        });
    }
    if max > length {
        return Err(LayoutError::FieldSpec {
            field: name.into(),
            message: format!("max width ({max}) exceeds word length ({length})"),
        });
    }
    Ok(())
}
