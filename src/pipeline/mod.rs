//! The event-driven stage chain that turns markup events into PDF documents.
//!
//! This module contains the pipeline components:
//!
//! - [`Pipeline`]: The trait every stage implements
//! - [`DocumentBoundaryStage`]: Creates, opens and finalizes one document per boundary element
//! - [`TextStage`]: Turns text content into queued paragraph writes
//! - [`PdfWriterStage`]: Terminal stage owning the document/writer pair and applying queued writes
//! - [`PipelineRunner`]: Drives a sequence of [`Event`]s through a chain
//! - [`PipelineBuilder`]: Fluent builder for the standard chain
//!
//! # Example
//!
//! ```ignore
//! use docsplit::{Event, PipelineBuilder, Tag};
//! use docsplit_resource::FilesystemSinkFactory;
//!
//! let runner = PipelineBuilder::new()
//!     .with_sink_factory(FilesystemSinkFactory::new("out"))
//!     .with_document_tag("book")
//!     .with_open_tag("p")
//!     .build()?;
//!
//! runner.run(vec![
//!     Event::open(Tag::new("book")),
//!     Event::open(Tag::new("p")),
//!     Event::content("Hello"),
//!     Event::close("p"),
//!     Event::close("book"),
//! ])?;
//! ```

pub mod boundary;
mod builder;
pub mod config;
pub mod context;
pub mod queue;
mod runner;
pub mod tag;
pub mod text;
pub mod writer;

pub use boundary::{ApplyMargins, DocumentBoundaryStage, resolve_margins};
pub use builder::PipelineBuilder;
pub use config::ConversionConfig;
pub use context::{ContextError, ConversionContext};
pub use queue::{Paragraph, Writable, WriteQueue};
pub use runner::{ConversionSummary, PipelineRunner};
pub use tag::{Event, Tag};
pub use text::TextStage;
pub use writer::{PdfWriterStage, WriterContext};

use crate::error::PipelineError;
use std::fmt::Debug;

/// One node in a linear chain of stages.
///
/// Stages hold no per-conversion state of their own: anything that must
/// survive between events lives in the [`ConversionContext`]. Each event
/// handler returns the stage that should see the event next, which is always
/// [`Pipeline::next`] unless the handler fails.
pub trait Pipeline: Debug {
    /// The id this stage registers its context under, if it has one.
    fn id(&self) -> &'static str;

    /// Called once per conversion, before the first event.
    fn init(&self, _context: &mut ConversionContext) -> Result<(), PipelineError> {
        Ok(())
    }

    fn open(
        &self,
        _context: &mut ConversionContext,
        _tag: &Tag,
        _queue: &mut WriteQueue,
    ) -> Result<Option<&dyn Pipeline>, PipelineError> {
        Ok(self.next())
    }

    fn content(
        &self,
        _context: &mut ConversionContext,
        _text: &str,
        _queue: &mut WriteQueue,
    ) -> Result<Option<&dyn Pipeline>, PipelineError> {
        Ok(self.next())
    }

    fn close(
        &self,
        _context: &mut ConversionContext,
        _tag: &Tag,
        _queue: &mut WriteQueue,
    ) -> Result<Option<&dyn Pipeline>, PipelineError> {
        Ok(self.next())
    }

    fn next(&self) -> Option<&dyn Pipeline>;
}
