//! The terminal stage: owns the current document/writer pair and applies
//! queued writes to it.

use super::context::{ContextError, ConversionContext};
use super::queue::WriteQueue;
use super::tag::Tag;
use super::Pipeline;
use crate::error::PipelineError;
use docsplit_render_lopdf::{PdfDocument, PdfWriter};
use docsplit_style::PageSize;
use log::{debug, trace};

/// The shared state the [`PdfWriterStage`] registers under its id.
///
/// Holds at most one live document and its writer. Boundary stages publish
/// into it and take back out of it; the writer stage drains queues into it.
#[derive(Debug)]
pub struct WriterContext {
    page_size: PageSize,
    document: Option<PdfDocument>,
    writer: Option<PdfWriter>,
    finalized: usize,
}

impl WriterContext {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            document: None,
            writer: None,
            finalized: 0,
        }
    }

    /// Page size new documents are created with.
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    pub fn document(&self) -> Result<&PdfDocument, ContextError> {
        self.document.as_ref().ok_or(Self::missing("document"))
    }

    pub fn document_mut(&mut self) -> Result<&mut PdfDocument, ContextError> {
        self.document.as_mut().ok_or(Self::missing("document"))
    }

    pub fn writer(&self) -> Result<&PdfWriter, ContextError> {
        self.writer.as_ref().ok_or(Self::missing("writer"))
    }

    /// Makes a new document/writer pair current.
    pub fn publish(&mut self, document: PdfDocument, writer: PdfWriter) {
        self.document = Some(document);
        self.writer = Some(writer);
    }

    /// Removes the current pair, leaving the context empty.
    pub fn take(&mut self) -> Result<(PdfDocument, PdfWriter), ContextError> {
        match (self.document.take(), self.writer.take()) {
            (Some(document), Some(writer)) => Ok((document, writer)),
            (document, writer) => {
                let slot = if document.is_none() { "document" } else { "writer" };
                self.document = document;
                self.writer = writer;
                Err(Self::missing(slot))
            }
        }
    }

    pub fn record_finalized(&mut self) {
        self.finalized += 1;
    }

    /// Number of documents finalized during this conversion.
    pub fn finalized(&self) -> usize {
        self.finalized
    }

    fn missing(slot: &'static str) -> ContextError {
        ContextError::NotFound {
            owner: PdfWriterStage::ID,
            slot,
        }
    }
}

/// Applies every queued write to the current document, in order.
///
/// Must be the last stage of a chain; it registers the [`WriterContext`]
/// other stages depend on.
#[derive(Debug)]
pub struct PdfWriterStage {
    page_size: PageSize,
    next: Option<Box<dyn Pipeline>>,
}

impl PdfWriterStage {
    pub const ID: &'static str = "PdfWriterStage";

    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            next: None,
        }
    }

    fn flush(
        &self,
        context: &mut ConversionContext,
        queue: &mut WriteQueue,
    ) -> Result<(), PipelineError> {
        if queue.is_empty() {
            return Ok(());
        }
        let document = context
            .get_mut::<WriterContext>(Self::ID)?
            .document_mut()?;
        let mut applied = 0;
        while let Some(item) = queue.poll() {
            trace!("Applying {:?}", item);
            item.write(document)?;
            applied += 1;
        }
        debug!("{} applied {} queued write(s)", Self::ID, applied);
        Ok(())
    }
}

impl Default for PdfWriterStage {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl Pipeline for PdfWriterStage {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn init(&self, context: &mut ConversionContext) -> Result<(), PipelineError> {
        context.register(Self::ID, WriterContext::new(self.page_size));
        Ok(())
    }

    fn open(
        &self,
        context: &mut ConversionContext,
        _tag: &Tag,
        queue: &mut WriteQueue,
    ) -> Result<Option<&dyn Pipeline>, PipelineError> {
        self.flush(context, queue)?;
        Ok(self.next())
    }

    fn content(
        &self,
        context: &mut ConversionContext,
        _text: &str,
        queue: &mut WriteQueue,
    ) -> Result<Option<&dyn Pipeline>, PipelineError> {
        self.flush(context, queue)?;
        Ok(self.next())
    }

    fn close(
        &self,
        context: &mut ConversionContext,
        _tag: &Tag,
        queue: &mut WriteQueue,
    ) -> Result<Option<&dyn Pipeline>, PipelineError> {
        self.flush(context, queue)?;
        Ok(self.next())
    }

    fn next(&self) -> Option<&dyn Pipeline> {
        self.next.as_deref()
    }
}
