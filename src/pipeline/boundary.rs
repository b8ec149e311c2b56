//! The document-boundary stage.
//!
//! Lifecycle of one output document, tracked through the writer stage's
//! context rather than in this stage:
//!
//! ```text
//! open(document tag)   Unstarted       -> DocumentCreated   allocate document + writer, publish
//! open(open tag)       DocumentCreated -> ContentOpened     apply margins, open, queue replay
//! close(document tag)  *               -> Closed            finalize and release the sink
//! ```

use super::context::ConversionContext;
use super::queue::{Writable, WriteQueue};
use super::tag::Tag;
use super::writer::{PdfWriterStage, WriterContext};
use super::Pipeline;
use crate::error::PipelineError;
use docsplit_render_lopdf::{PdfDocument, PdfWriter};
use docsplit_style::{Margins, StyleDeclarations, StyleParseError, to_absolute};
use docsplit_traits::SinkFactory;
use log::{debug, info, trace};
use std::sync::Arc;

/// Creates a document when the document tag opens, applies margins and opens
/// it for content when the open tag opens, and finalizes it when the document
/// tag closes.
///
/// The document tag matches case-sensitively; the open tag matches
/// case-insensitively, on the tag name only. Requires a [`PdfWriterStage`]
/// further down the chain.
#[derive(Debug)]
pub struct DocumentBoundaryStage {
    sink_factory: Box<dyn SinkFactory>,
    document_tag: String,
    open_tag: String,
    next: Option<Box<dyn Pipeline>>,
}

impl DocumentBoundaryStage {
    pub const ID: &'static str = "DocumentBoundaryStage";

    pub fn new(
        sink_factory: impl SinkFactory + 'static,
        document_tag: impl Into<String>,
        open_tag: impl Into<String>,
    ) -> Self {
        Self {
            sink_factory: Box::new(sink_factory),
            document_tag: document_tag.into(),
            open_tag: open_tag.into(),
            next: None,
        }
    }

    pub fn with_next(mut self, next: Box<dyn Pipeline>) -> Self {
        self.next = Some(next);
        self
    }

    pub fn document_tag(&self) -> &str {
        &self.document_tag
    }

    pub fn open_tag(&self) -> &str {
        &self.open_tag
    }

    fn writer_context(
        context: &mut ConversionContext,
    ) -> Result<&mut WriterContext, PipelineError> {
        context
            .get_mut::<WriterContext>(PdfWriterStage::ID)
            .map_err(|source| PipelineError::MissingDependency {
                stage: Self::ID,
                dependency: PdfWriterStage::ID,
                source,
            })
    }

    fn create_document(
        &self,
        context: &mut ConversionContext,
        tag: &Tag,
    ) -> Result<(), PipelineError> {
        let slot = Self::writer_context(context)?;
        if slot.has_document() {
            return Err(PipelineError::DocumentAlreadyActive {
                tag: tag.name().to_string(),
            });
        }

        let document = PdfDocument::new(slot.page_size());
        let sink = self
            .sink_factory
            .new_sink()
            .map_err(PipelineError::SinkAcquisition)?;
        slot.publish(document, PdfWriter::new(sink));
        debug!(
            "<{}> created a new document using {}",
            tag.name(),
            self.sink_factory.name()
        );
        Ok(())
    }

    fn open_document(
        &self,
        context: &mut ConversionContext,
        tag: &Tag,
        queue: &mut WriteQueue,
    ) -> Result<(), PipelineError> {
        let document = Self::writer_context(context)?.document_mut()?;
        let margins = apply_margins(document, tag.css())?;
        debug!("<{}> opened the document with margins {:?}", tag.name(), margins);

        // Replayed when the writer stage drains this event's queue.
        queue.add(Box::new(ApplyMargins::new(Arc::clone(tag.css()))));
        Ok(())
    }

    fn finalize_document(
        &self,
        context: &mut ConversionContext,
        tag: &Tag,
    ) -> Result<(), PipelineError> {
        let slot = Self::writer_context(context)?;
        let (mut document, mut writer) = slot.take()?;
        let pages = writer.finish(&mut document)?;
        slot.record_finalized();
        info!("</{}> finalized a document of {} page(s)", tag.name(), pages);
        Ok(())
    }
}

impl Pipeline for DocumentBoundaryStage {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn open(
        &self,
        context: &mut ConversionContext,
        tag: &Tag,
        queue: &mut WriteQueue,
    ) -> Result<Option<&dyn Pipeline>, PipelineError> {
        if tag.name() == self.document_tag {
            self.create_document(context, tag)?;
        }
        if tag.name().eq_ignore_ascii_case(&self.open_tag) {
            self.open_document(context, tag, queue)?;
        }
        trace!("{} forwarding open <{}>", Self::ID, tag.name());
        Ok(self.next())
    }

    fn close(
        &self,
        context: &mut ConversionContext,
        tag: &Tag,
        _queue: &mut WriteQueue,
    ) -> Result<Option<&dyn Pipeline>, PipelineError> {
        if tag.name() == self.document_tag {
            self.finalize_document(context, tag)?;
        }
        trace!("{} forwarding close </{}>", Self::ID, tag.name());
        Ok(self.next())
    }

    fn next(&self) -> Option<&dyn Pipeline> {
        self.next.as_deref()
    }
}

/// Computes box margins from an element's declarations.
///
/// Only `margin-left`, `margin-right`, `margin-top` and `margin-bottom` are
/// read (names compared case-insensitively); missing sides stay 0 and
/// percentages resolve against `page_width`.
pub fn resolve_margins(
    css: &StyleDeclarations,
    page_width: f32,
) -> Result<Margins, StyleParseError> {
    let mut margins = Margins::default();
    for (key, value) in css.entries() {
        let side = if key.eq_ignore_ascii_case("margin-left") {
            &mut margins.left
        } else if key.eq_ignore_ascii_case("margin-right") {
            &mut margins.right
        } else if key.eq_ignore_ascii_case("margin-top") {
            &mut margins.top
        } else if key.eq_ignore_ascii_case("margin-bottom") {
            &mut margins.bottom
        } else {
            continue;
        };
        *side = to_absolute(value, page_width)?;
    }
    Ok(margins)
}

fn apply_margins(
    document: &mut PdfDocument,
    css: &StyleDeclarations,
) -> Result<Margins, PipelineError> {
    let margins = resolve_margins(css, document.page_width())?;
    document.set_margins(margins)?;
    document.open()?;
    Ok(margins)
}

/// Deferred replay of the margins-and-open step, holding only the style
/// snapshot of the element that triggered it.
#[derive(Debug, Clone)]
pub struct ApplyMargins {
    css: Arc<StyleDeclarations>,
}

impl ApplyMargins {
    pub fn new(css: Arc<StyleDeclarations>) -> Self {
        Self { css }
    }
}

impl Writable for ApplyMargins {
    fn write(&self, document: &mut PdfDocument) -> Result<(), PipelineError> {
        apply_margins(document, &self.css).map(|_| ())
    }
}
