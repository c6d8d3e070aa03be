//! Recursive backtracking search over field placements.
//!
//! Fields are placed one at a time, in descending-priority order
//! ([`crate::priority::placement_order`]), identically across every
//! format that references them as an operand. Each complete placement is
//! handed to [`crate::scorer::score_candidate`]; the engine itself never
//! judges a candidate, it only enumerates legal ones.

pub mod gap;

use indexmap::IndexMap;

use crate::priority::placement_order;
use crate::scorer::{score_candidate, Best};
use crate::search::gap::gap_map;
use crate::types::{FieldSpec, FormatSpec, Slot, SlotKind, SlotValue};

/// Run the full search and return the best layout found, or `None` if no
/// candidate was ever reached (every field turned out to be unplaceable
/// somewhere along the way).
pub fn run_search(
    fields: &IndexMap<String, FieldSpec>,
    formats: &mut IndexMap<String, FormatSpec>,
    length: u32,
) -> Option<IndexMap<String, FormatSpec>> {
    tracing::info!("start finding ISA");
    let order = placement_order(fields);
    let mut best = Best::new();

    match order.split_first() {
        Some((first, rest)) => place_field(fields, first, rest, formats, length, &mut best),
        None => score_candidate(formats, length, &mut best),
    }

    best.formats
}

/// Place one field across every format that uses it, then recurse into
/// the remaining fields (or score, at the base case), backtracking out
/// of every position/width tried.
fn place_field(
    fields: &IndexMap<String, FieldSpec>,
    field: &str,
    remaining: &[String],
    formats: &mut IndexMap<String, FormatSpec>,
    length: u32,
    best: &mut Best,
) {
    tracing::debug!(field, "placing field");
    let spec = &fields[field];

    let mut using = Vec::new();
    let mut maps = Vec::new();
    for (name, format) in formats.iter() {
        if format.operands.iter().any(|o| o == field) {
            using.push(name.clone());
            maps.push(gap_map(&format.bitmask, length, spec.min));
        }
    }
    if using.is_empty() {
        return;
    }

    for msb in (0..length).rev() {
        let feasible = maps.iter().all(|m| m[msb as usize].gap > 0);
        if !feasible {
            continue;
        }
        let max_width = maps.iter().map(|m| m[msb as usize].gap).min().unwrap();

        for width in spec.min..=spec.max.min(max_width) {
            for (i, name) in using.iter().enumerate() {
                let index = maps[i][msb as usize].insertion_index;
                let format = formats.get_mut(name).expect("using format must exist");
                format.bitmask.insert(
                    index,
                    Slot {
                        kind: SlotKind::Field(field.to_string()),
                        msb,
                        lsb: msb + 1 - width,
                        value: SlotValue::Operand,
                    },
                );
            }

            match remaining.split_first() {
                Some((next, rest)) => place_field(fields, next, rest, formats, length, best),
                None => score_candidate(formats, length, best),
            }

            for name in &using {
                let format = formats.get_mut(name).expect("using format must exist");
                format
                    .bitmask
                    .retain(|slot| !matches!(&slot.kind, SlotKind::Field(n) if n == field));
            }
        }
    }
}
