//! Header placer.
//!
//! Assigns the top bits of every format to the format selector `F` and,
//! for formats distinguishing more than one instruction, the `OPCODE`
//! slot immediately below it.

use indexmap::IndexMap;

use crate::error::{LayoutError, Result};
use crate::types::{FormatSpec, Slot, SlotKind, SlotValue};

/// Number of bits needed to represent `n` distinct values (`ceil(log2(n))`),
/// with the convention that `n <= 1` needs zero bits.
fn bits_to_represent(n: u32) -> u32 {
    if n <= 1 {
        0
    } else {
        32 - (n - 1).leading_zeros()
    }
}

fn zero_padded_binary(value: u32, width: u32) -> String {
    format!("{:0width$b}", value, width = width as usize)
}

/// Place `F` (when more than one format exists) and `OPCODE` (for formats
/// with more than one instruction) at the top of every format's bitmask.
///
/// A single-format input omits `F` entirely rather than emitting a
/// zero-width placeholder slot (see `SPEC_FULL.md` §9).
pub fn place_headers(formats: &mut IndexMap<String, FormatSpec>, length: u32) -> Result<()> {
    tracing::info!("placing format and opcode");

    let f_bits = bits_to_represent(formats.len() as u32);
    let max_opcode_bits = formats
        .values()
        .map(|f| bits_to_represent(f.instructions.len() as u32))
        .max()
        .unwrap_or(0);

    if f_bits + max_opcode_bits > length {
        return Err(LayoutError::HeaderInfeasible {
            length,
            needed: f_bits + max_opcode_bits,
        });
    }

    for (index, format) in formats.values_mut().enumerate() {
        if f_bits > 0 {
            let msb = length - 1;
            let lsb = length - f_bits;
            format.bitmask.push(Slot {
                kind: SlotKind::FormatSelector,
                msb,
                lsb,
                value: SlotValue::Selector(zero_padded_binary(index as u32, f_bits)),
            });
        }

        if format.needs_opcode() {
            let opcode_bits = bits_to_represent(format.instructions.len() as u32);
            let msb = format
                .bitmask
                .last()
                .map(|f| f.lsb - 1)
                .unwrap_or(length - 1);
            let lsb = msb + 1 - opcode_bits;

            let mut value = indexmap::IndexMap::new();
            for (opcode, mnemonic) in format.instructions.iter().enumerate() {
                value.insert(mnemonic.clone(), zero_padded_binary(opcode as u32, opcode_bits));
            }

            format.bitmask.push(Slot {
                kind: SlotKind::Opcode,
                msb,
                lsb,
                value: SlotValue::OpcodeMap(value),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FormatSpec;

    fn format(name: &str, insns: &[&str]) -> FormatSpec {
        FormatSpec {
            name: name.into(),
            instructions: insns.iter().map(|s| s.to_string()).collect(),
            operands: Vec::new(),
            comment: String::new(),
            bitmask: Vec::new(),
        }
    }

    #[test]
    fn single_format_single_instruction_omits_header() {
        let mut formats = IndexMap::new();
        formats.insert("F0".into(), format("F0", &["nop"]));
        place_headers(&mut formats, 8).unwrap();
        assert!(formats["F0"].bitmask.is_empty());
    }

    #[test]
    fn two_formats_get_one_bit_selector() {
        let mut formats = IndexMap::new();
        formats.insert("F0".into(), format("F0", &["add", "sub"]));
        formats.insert("F1".into(), format("F1", &["ldi"]));
        place_headers(&mut formats, 16).unwrap();

        let f0 = &formats["F0"];
        assert_eq!(f0.bitmask[0].kind, SlotKind::FormatSelector);
        assert_eq!(f0.bitmask[0].msb, 15);
        assert_eq!(f0.bitmask[0].lsb, 15);
        assert_eq!(f0.bitmask[1].kind, SlotKind::Opcode);
        assert_eq!(f0.bitmask[1].msb, 14);
        assert_eq!(f0.bitmask[1].lsb, 14);

        let f1 = &formats["F1"];
        assert_eq!(f1.bitmask.len(), 1);
        assert_eq!(f1.bitmask[0].kind, SlotKind::FormatSelector);
    }

    #[test]
    fn header_infeasible_when_no_room() {
        let mut formats = IndexMap::new();
        formats.insert("F0".into(), format("F0", &["a", "b", "c", "d", "e"]));
        formats.insert("F1".into(), format("F1", &["x"]));
        let err = place_headers(&mut formats, 2).unwrap_err();
        assert!(matches!(err, LayoutError::HeaderInfeasible { .. }));
    }

    #[test]
    fn header_exactly_filling_the_word_is_not_infeasible() {
        // f_bits=1, max_opcode_bits=1, sum == length: every bit is spoken
        // for by the header alone, but that still leaves room for F1's
        // one-bit field once F0's header is accounted for separately.
        let mut formats = IndexMap::new();
        formats.insert("F0".into(), format("F0", &["a", "b"]));
        formats.insert("F1".into(), format("F1", &["c"]));
        place_headers(&mut formats, 2).unwrap();

        let f0 = &formats["F0"];
        assert_eq!(f0.bitmask[0].kind, SlotKind::FormatSelector);
        assert_eq!(f0.bitmask[1].kind, SlotKind::Opcode);
        assert_eq!(f0.bitmask[1].lsb, 0);

        let f1 = &formats["F1"];
        assert_eq!(f1.bitmask.len(), 1);
        assert_eq!(f1.bitmask[0].lsb, 1);
    }
}
