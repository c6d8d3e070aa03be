//! Reserved-fill.
//!
//! Decorates a format's bitmask with `RESERVED` slots covering every gap
//! between placed slots — including above the topmost slot and below the
//! bottommost one — so the bitmask always covers the full word. This is a
//! strict superset of the reference implementation's reserved-fill, which
//! assumes the topmost slot always touches bit `L-1`; filling the gap
//! above the first slot too is what makes the coverage invariant
//! (`SPEC_FULL.md` / `spec.md` §8 property 2) hold unconditionally.

use indexmap::IndexMap;

use crate::types::{FormatSpec, Slot, SlotKind, SlotValue};

/// Insert `RESERVED` slots into every format's bitmask.
pub fn fill_reserved(formats: &mut IndexMap<String, FormatSpec>, length: u32) {
    for format in formats.values_mut() {
        format.bitmask = fill_reserved_one(&format.bitmask, length);
    }
}

fn fill_reserved_one(bitmask: &[Slot], length: u32) -> Vec<Slot> {
    let mut result = Vec::with_capacity(bitmask.len() + 2);
    let mut cursor = length;

    for slot in bitmask {
        if cursor > slot.msb + 1 {
            result.push(Slot {
                kind: SlotKind::Reserved,
                msb: cursor - 1,
                lsb: slot.msb + 1,
                value: SlotValue::Reserved,
            });
        }
        result.push(slot.clone());
        cursor = slot.lsb;
    }

    if cursor > 0 {
        result.push(Slot {
            kind: SlotKind::Reserved,
            msb: cursor - 1,
            lsb: 0,
            value: SlotValue::Reserved,
        });
    }

    result
}

/// Strip every `RESERVED` slot from every format's bitmask, the exact
/// inverse of [`fill_reserved`] on the non-reserved slots.
pub fn strip_reserved(formats: &mut IndexMap<String, FormatSpec>) {
    for format in formats.values_mut() {
        format.bitmask.retain(|slot| slot.kind != SlotKind::Reserved);
    }
}

/// Total width, in bits, of all `RESERVED` slots across every format.
pub fn total_reserved_width(formats: &IndexMap<String, FormatSpec>) -> u32 {
    formats
        .values()
        .flat_map(|f| f.bitmask.iter())
        .filter(|slot| slot.kind == SlotKind::Reserved)
        .map(Slot::width)
        .sum()
}
