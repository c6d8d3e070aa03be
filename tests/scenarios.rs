//! End-to-end scenarios driving the full pipeline: parse, assign
//! priorities, place headers, search, reserved-fill.

use std::io::Write;

use isa_layout::{error::LayoutError, header, input, priority, reserved, search};
use pretty_assertions::assert_eq;

fn run_pipeline(json: &str) -> isa_layout::error::Result<isa_layout::InputModel> {
    let mut model = input::parse_str(json)?;
    priority::assign_priorities(&mut model.fields, &model.formats);
    header::place_headers(&mut model.formats, model.length.bits())?;
    let best = search::run_search(&model.fields, &mut model.formats, model.length.bits());
    let mut best_formats = best.ok_or(LayoutError::Infeasibility)?;
    reserved::fill_reserved(&mut best_formats, model.length.bits());
    model.formats = best_formats;
    Ok(model)
}

fn slot_range(model: &isa_layout::InputModel, format: &str, label: &str) -> (u32, u32) {
    let slot = model.formats[format]
        .bitmask
        .iter()
        .find(|s| s.kind.label() == label)
        .unwrap_or_else(|| panic!("no slot `{label}` in format `{format}`"));
    (slot.msb, slot.lsb)
}

#[test]
fn scenario_a_minimal_single_format() {
    let json = r#"{
        "length": 8,
        "fields": [ { "a": 3 }, { "b": 2 } ],
        "instructions": [
            { "format": "F0", "insns": ["nop"], "operands": ["a", "b"], "comment": "" }
        ]
    }"#;
    let model = run_pipeline(json).unwrap();

    assert!(model.formats["F0"].bitmask.iter().all(|s| s.kind.label() != "F"));
    assert_eq!(slot_range(&model, "F0", "a"), (7, 5));
    assert_eq!(slot_range(&model, "F0", "b"), (4, 3));
    assert_eq!(slot_range(&model, "F0", "RESERVED"), (2, 0));

    let used_bits = 8 - reserved::total_reserved_width(&model.formats);
    assert_eq!(used_bits, 5);
}

#[test]
fn scenario_b_two_formats_shared_field() {
    // written to a temp file to exercise the on-disk parse path as well.
    let json = r#"{
        "length": 16,
        "fields": [ { "rd": 4 }, { "rs": 4 }, { "imm": ">=4" } ],
        "instructions": [
            { "format": "F0", "insns": ["add", "sub"], "operands": ["rd", "rs"], "comment": "" },
            { "format": "F1", "insns": ["ldi"], "operands": ["rd", "imm"], "comment": "" }
        ]
    }"#;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    let mut model = input::parse_file(file.path()).unwrap();
    priority::assign_priorities(&mut model.fields, &model.formats);
    header::place_headers(&mut model.formats, model.length.bits()).unwrap();
    let best = search::run_search(&model.fields, &mut model.formats, model.length.bits()).unwrap();
    let mut best_formats = best;
    reserved::fill_reserved(&mut best_formats, model.length.bits());
    model.formats = best_formats;

    assert_eq!(slot_range(&model, "F0", "F"), (15, 15));
    assert_eq!(slot_range(&model, "F0", "OPCODE"), (14, 14));
    assert_eq!(slot_range(&model, "F0", "rd"), (13, 10));
    assert_eq!(slot_range(&model, "F0", "rs"), (9, 6));
    assert_eq!(slot_range(&model, "F1", "rd"), (13, 10));
    assert_eq!(slot_range(&model, "F1", "imm"), (9, 0));
    assert_eq!(slot_range(&model, "F0", "RESERVED"), (5, 0));
}

#[test]
fn scenario_c_infeasible() {
    let json = r#"{
        "length": 4,
        "fields": [ { "a": 3 }, { "b": 3 } ],
        "instructions": [
            { "format": "F0", "insns": ["x"], "operands": ["a", "b"], "comment": "" },
            { "format": "F1", "insns": ["y"], "operands": ["a", "b"], "comment": "" }
        ]
    }"#;
    let err = run_pipeline(json).unwrap_err();
    assert!(matches!(err, LayoutError::Infeasibility));
}

#[test]
fn scenario_d_priority_tie_break_places_shared_field_first() {
    let json = r#"{
        "length": 16,
        "fields": [ { "x": 4 }, { "y": 4 } ],
        "instructions": [
            { "format": "F0", "insns": ["a"], "operands": ["x"], "comment": "" },
            { "format": "F1", "insns": ["b"], "operands": ["x"], "comment": "" },
            { "format": "F2", "insns": ["c"], "operands": ["x", "y"], "comment": "" }
        ]
    }"#;
    let mut model = input::parse_str(json).unwrap();
    priority::assign_priorities(&mut model.fields, &model.formats);
    assert_eq!(model.fields["x"].priority, 3);
    assert_eq!(model.fields["y"].priority, 1);
    assert_eq!(priority::placement_order(&model.fields), vec!["x", "y"]);
}

#[test]
fn scenario_e_unbounded_field_takes_the_widest_feasible_width() {
    let json = r#"{
        "length": 16,
        "fields": [ { "rd": 4 }, { "rs": 4 }, { "imm": ">=4" } ],
        "instructions": [
            { "format": "F0", "insns": ["add", "sub"], "operands": ["rd", "rs"], "comment": "" },
            { "format": "F1", "insns": ["ldi"], "operands": ["rd", "imm"], "comment": "" }
        ]
    }"#;
    let model = run_pipeline(json).unwrap();
    let (msb, lsb) = slot_range(&model, "F1", "imm");
    assert_eq!(msb - lsb + 1, 10, "imm should grow to fill all remaining room in F1");
}
