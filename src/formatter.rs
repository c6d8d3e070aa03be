//! Diagrammatic and JSON emitters.
//!
//! [`render_text`] mirrors the reference implementation's `printISA`: one
//! header line of descending bit indices, then one row per format with
//! labeled, width-proportional cells. It is diagnostic output only, never
//! scored. [`build_output`] is the JSON emitter: one entry per
//! instruction, with the `OPCODE` slot specialized to that instruction's
//! own encoding.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{LayoutError, Result};
use crate::types::{FormatSpec, SlotKind, SlotValue};

/// One bit range as it appears in JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotJson {
    pub name: String,
    pub msb: u32,
    pub lsb: u32,
    pub value: String,
}

/// One instruction's complete bit encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionEntry {
    pub insn: String,
    pub fields: Vec<SlotJson>,
}

/// Output file path for a given input file: `output_<input_filename>`
/// alongside the input, matching `out_filename = 'output_' +
/// input_desc_file` in the reference implementation.
pub fn output_path_for(input: &Path) -> PathBuf {
    let dir = input.parent().filter(|p| !p.as_os_str().is_empty());
    let name = input
        .file_name()
        .map(|n| format!("output_{}", n.to_string_lossy()))
        .unwrap_or_else(|| "output_unnamed".to_string());
    match dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// Emit one [`InstructionEntry`] per instruction across every format,
/// reserved-filled bitmask included, `OPCODE` specialized per mnemonic.
///
/// Errors (rather than panics) if a format needing an `OPCODE` slot
/// doesn't carry one, or carries one without an `OpcodeMap` value — both
/// indicate the format never went through `header::place_headers`.
pub fn build_output(formats: &IndexMap<String, FormatSpec>) -> Result<Vec<InstructionEntry>> {
    let mut out = Vec::new();
    for format in formats.values() {
        if format.needs_opcode() {
            let opcode_index = format
                .bitmask
                .iter()
                .position(|slot| slot.kind == SlotKind::Opcode)
                .ok_or_else(|| LayoutError::InvalidFormat {
                    format: format.name.clone(),
                    message: "has more than one instruction but no OPCODE slot".into(),
                })?;
            let opcode_map = match &format.bitmask[opcode_index].value {
                SlotValue::OpcodeMap(map) => map,
                _ => {
                    return Err(LayoutError::InvalidFormat {
                        format: format.name.clone(),
                        message: "OPCODE slot does not carry an OpcodeMap value".into(),
                    })
                }
            };
            for mnemonic in &format.instructions {
                let mut fields = render_fields(format);
                fields[opcode_index].value = opcode_map[mnemonic].clone();
                out.push(InstructionEntry {
                    insn: mnemonic.clone(),
                    fields,
                });
            }
        } else {
            out.push(InstructionEntry {
                insn: format.instructions[0].clone(),
                fields: render_fields(format),
            });
        }
    }
    Ok(out)
}

fn render_fields(format: &FormatSpec) -> Vec<SlotJson> {
    format
        .bitmask
        .iter()
        .map(|slot| SlotJson {
            name: slot.kind.label().to_string(),
            msb: slot.msb,
            lsb: slot.lsb,
            value: slot_value_text(&slot.value),
        })
        .collect()
}

fn slot_value_text(value: &SlotValue) -> String {
    match value {
        SlotValue::Selector(s) => s.clone(),
        SlotValue::OpcodeMap(_) => String::new(),
        SlotValue::Operand => "+".to_string(),
        SlotValue::Reserved => String::new(),
    }
}

const LABEL_PAD: usize = 50;

/// Render a diagnostic diagram of every format's bitmask, prefixed with
/// `msg`, the way the reference implementation's `printISA` does.
pub fn render_text(formats: &IndexMap<String, FormatSpec>, length: u32, msg: &str) -> String {
    let ix_padding = index_padding(length);

    let mut out = String::new();
    out.push_str(msg);
    out.push('\n');
    out.push_str(&" ".repeat(LABEL_PAD));
    out.push('|');
    for i in (0..length).rev() {
        out.push_str(&pad_right(&i.to_string(), ix_padding));
        out.push('|');
    }
    out.push('\n');

    for (name, format) in formats {
        let f_value = format
            .bitmask
            .iter()
            .find(|slot| slot.kind == SlotKind::FormatSelector)
            .and_then(|slot| match &slot.value {
                SlotValue::Selector(v) => Some(v.clone()),
                _ => None,
            })
            .unwrap_or_default();
        let header = format!("F={f_value}, {name}");
        out.push_str(&pad_right(&header, LABEL_PAD.saturating_sub(1)));
        out.push('|');
        for slot in &format.bitmask {
            let width = (slot.width() as usize) * (ix_padding + 1) - 1;
            let label: String = slot.kind.label().chars().take(width).collect();
            out.push_str(&pad_right(&label, width));
            out.push('|');
        }
        out.push('\n');
    }

    out
}

fn index_padding(length: u32) -> usize {
    let max_index = length.saturating_sub(1).max(1) as f64;
    max_index.log10().floor() as usize + 1
}

fn pad_right(s: &str, width: usize) -> String {
    if s.len() >= width {
        s.to_string()
    } else {
        let mut owned = s.to_string();
        owned.push_str(&" ".repeat(width - s.len()));
        owned
    }
}
