//! PDF output for the docsplit pipeline using lopdf.
//!
//! A [`PdfDocument`] collects margins, open/closed state and paragraphs while
//! the pipeline runs; the paired [`PdfWriter`] owns the output sink and
//! serializes the document when it is finalized.

mod document;
mod error;
mod layout;
mod writer;

pub use document::{DocumentState, PdfDocument};
pub use error::RenderError;
pub use layout::{Block, FONT_SIZE, LEADING, PlacedLine, paginate, wrap_paragraph};
pub use writer::PdfWriter;
