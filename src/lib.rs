//! ISA layout search engine.
//!
//! Given a word width, a catalogue of named operand fields, and a set of
//! instruction formats grouping instructions by operand set, searches the
//! space of legal bit assignments and returns the layout that minimizes
//! unused ("reserved") bits across all formats.
//!
//! ```rust,no_run
//! use isa_layout::{header, input, priority, reserved, search};
//!
//! fn main() -> isa_layout::error::Result<()> {
//!     let mut model = input::parse_file("example_input.json")?;
//!     priority::assign_priorities(&mut model.fields, &model.formats);
//!     header::place_headers(&mut model.formats, model.length.bits())?;
//!     if let Some(mut best) = search::run_search(&model.fields, &mut model.formats, model.length.bits()) {
//!         reserved::fill_reserved(&mut best, model.length.bits());
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod formatter;
pub mod header;
pub mod input;
pub mod priority;
pub mod reserved;
pub mod scorer;
pub mod search;
pub mod types;

#[cfg(feature = "cli")]
pub mod logging;

pub use error::{LayoutError, Result};
pub use types::{FieldSpec, FormatSpec, InputModel, Slot, SlotKind, SlotValue, WordLength};
