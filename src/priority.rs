//! Priority assignment.
//!
//! A field's priority is the number of formats that reference it as an
//! operand. Fields constraining many formats simultaneously are the most
//! globally binding, so the search commits them first to prune early.
//! Unreferenced fields (priority zero) are inert and never placed.

use indexmap::IndexMap;

use crate::types::{FieldSpec, FormatSpec};

/// Increment each field's priority once per format that lists it as an
/// operand.
pub fn assign_priorities(
    fields: &mut IndexMap<String, FieldSpec>,
    formats: &IndexMap<String, FormatSpec>,
) {
    for format in formats.values() {
        for operand in &format.operands {
            if let Some(field) = fields.get_mut(operand) {
                field.priority += 1;
            }
        }
    }
}

/// Field names in placement order: descending priority, ties broken by
/// declaration order. Priority-zero fields are excluded — they are never
/// placed.
pub fn placement_order(fields: &IndexMap<String, FieldSpec>) -> Vec<String> {
    let mut names: Vec<&str> = fields
        .values()
        .filter(|f| f.priority > 0)
        .map(|f| f.name.as_str())
        .collect();
    // `sort_by_key` is a stable sort, so fields with equal priority keep
    // their relative declaration order.
    names.sort_by_key(|name| std::cmp::Reverse(fields[*name].priority));
    names.into_iter().map(str::to_owned).collect()
}
