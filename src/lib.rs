//! Splits one stream of markup events into many PDF documents.
//!
//! A [`DocumentBoundaryStage`] watches for a configurable document element:
//! each time it opens, a fresh document and writer are created from a
//! [`SinkFactory`]; the configured open element supplies page margins from its
//! computed style and opens the document for content; closing the document
//! element finalizes it. See [`pipeline`] for the stage chain.

pub mod error;
pub mod pipeline;

pub use error::PipelineError;
pub use pipeline::{
    ConversionConfig, ConversionContext, ConversionSummary, DocumentBoundaryStage, Event,
    PdfWriterStage, Pipeline, PipelineBuilder, PipelineRunner, Tag, TextStage,
};

pub use docsplit_render_lopdf::{PdfDocument, PdfWriter};
pub use docsplit_resource::{FilesystemSinkFactory, InMemorySinkFactory};
pub use docsplit_style::{Margins, PageSize, StyleDeclarations};
pub use docsplit_traits::{Sink, SinkError, SinkFactory};
