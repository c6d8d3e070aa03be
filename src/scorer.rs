//! Candidate scorer.
//!
//! At a fully-placed candidate, temporarily reserved-fills every format,
//! computes the used-bit count, and keeps the best-scoring layout seen so
//! far. A strict `<` comparison means ties keep the first layout reached,
//! matching the reference implementation's `self.bestISA['used_bits'] <
//! used_bits` check. Every improvement is re-emitted as a diagnostic
//! diagram, mirroring `calcScore` calling `self.dumpJson()` (which itself
//! calls `printISA`) on every new best.

use indexmap::IndexMap;

use crate::formatter::render_text;
use crate::reserved::{fill_reserved, strip_reserved, total_reserved_width};
use crate::types::FormatSpec;

/// Best layout found so far.
#[derive(Debug, Default)]
pub struct Best {
    /// Highest `used_bits` score reached.
    pub used_bits: u32,
    /// Snapshot of the formats at that score, `None` until the first
    /// candidate is scored.
    pub formats: Option<IndexMap<String, FormatSpec>>,
}

impl Best {
    /// A fresh, empty best-so-far.
    pub fn new() -> Self {
        Self {
            used_bits: 0,
            formats: None,
        }
    }
}

/// Score one fully-placed candidate, updating `best` if it strictly beats
/// the current best. Leaves `formats` in the same (reserved-stripped)
/// shape it was passed in.
pub fn score_candidate(formats: &mut IndexMap<String, FormatSpec>, length: u32, best: &mut Best) {
    fill_reserved(formats, length);

    let used_bits = length * formats.len() as u32 - total_reserved_width(formats);

    tracing::debug!(used_bits, "generated candidate ISA");

    if best.used_bits < used_bits {
        best.used_bits = used_bits;
        best.formats = Some(formats.clone());
        let diagram = render_text(formats, length, &format!("BEST ISA FOUND, score {used_bits}:"));
        tracing::info!("{diagram}");
    }

    strip_reserved(formats);
}
