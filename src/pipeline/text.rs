use super::context::ConversionContext;
use super::queue::{Paragraph, WriteQueue};
use super::writer::{PdfWriterStage, WriterContext};
use super::Pipeline;
use crate::error::PipelineError;
use log::trace;

/// Turns character content into queued [`Paragraph`] writes.
///
/// Runs of whitespace collapse to a single space and blank content is
/// dropped. Content arriving while no document is open is skipped, since
/// there is nowhere to write it.
#[derive(Debug, Default)]
pub struct TextStage {
    next: Option<Box<dyn Pipeline>>,
}

impl TextStage {
    pub const ID: &'static str = "TextStage";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_next(mut self, next: Box<dyn Pipeline>) -> Self {
        self.next = Some(next);
        self
    }

    fn accepts_content(context: &ConversionContext) -> bool {
        context
            .get::<WriterContext>(PdfWriterStage::ID)
            .ok()
            .and_then(|slot| slot.document().ok())
            .is_some_and(|document| document.is_open())
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl Pipeline for TextStage {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn content(
        &self,
        context: &mut ConversionContext,
        text: &str,
        queue: &mut WriteQueue,
    ) -> Result<Option<&dyn Pipeline>, PipelineError> {
        let text = normalize_whitespace(text);
        if text.is_empty() {
            return Ok(self.next());
        }
        if Self::accepts_content(context) {
            queue.add(Box::new(Paragraph(text)));
        } else {
            trace!("No open document, dropping {} byte(s) of content", text.len());
        }
        Ok(self.next())
    }

    fn next(&self) -> Option<&dyn Pipeline> {
        self.next.as_deref()
    }
}
