//! Style primitives for the docsplit pipeline: per-element declarations,
//! dimensions, page sizes and length-to-point conversion.

pub mod declarations;
pub mod dimension;
pub mod parsers;

pub use declarations::StyleDeclarations;
pub use dimension::{Dimension, Margins, PageSize};
pub use parsers::{StyleParseError, to_absolute};
