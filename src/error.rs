//! Error types for the layout engine.
//!
//! This module defines the error taxonomy used throughout the crate:
//! input I/O, schema, and field-spec errors abort before the search ever
//! starts; infeasibility is only ever reported once, after the search has
//! exhausted every candidate.

use thiserror::Error;

/// Primary error type for the layout engine.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The input file is missing, unreadable, or the output file couldn't
    /// be written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input JSON couldn't be parsed, or serializing the output JSON
    /// failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed input: missing keys, wrong types, or a format referencing
    /// a field that was never declared.
    #[error("invalid input schema: {message}")]
    InputSchema {
        /// Human-readable description of what was wrong.
        message: String,
    },

    /// A field's width spec couldn't be parsed, or its bounds are
    /// self-contradictory or exceed the word length.
    #[error("invalid spec for field `{field}`: {message}")]
    FieldSpec {
        /// The offending field's name.
        field: String,
        /// Human-readable description of what was wrong.
        message: String,
    },

    /// The format selector and opcode bits alone already consume the
    /// entire word, before any operand field can be placed.
    #[error(
        "header needs {needed} bits but the word is only {length} bits wide"
    )]
    HeaderInfeasible {
        /// The word length.
        length: u32,
        /// Bits required by `F` plus the widest `OPCODE` slot.
        needed: u32,
    },

    /// The search completed without ever reaching a candidate that used
    /// more than zero bits: no legal layout exists for this description.
    #[error("no legal bit layout exists for this ISA description")]
    Infeasibility,

    /// A format reached an emitter without the `OPCODE` slot its
    /// instruction count requires, or that slot didn't carry an
    /// `OpcodeMap` value. Only reachable if a format's bitmask was built
    /// or edited without going through `header::place_headers`.
    #[error("format `{format}` cannot be emitted: {message}")]
    InvalidFormat {
        /// The offending format's name.
        format: String,
        /// Human-readable description of what was wrong.
        message: String,
    },
}

/// Result type alias for layout engine operations.
pub type Result<T> = std::result::Result<T, LayoutError>;
