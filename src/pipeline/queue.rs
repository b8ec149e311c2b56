//! Deferred writes, queued by stages and applied by the terminal writer stage.

use crate::error::PipelineError;
use docsplit_render_lopdf::PdfDocument;
use std::collections::VecDeque;
use std::fmt::Debug;

/// A unit of work applied to the live document at flush time.
pub trait Writable: Debug {
    fn write(&self, document: &mut PdfDocument) -> Result<(), PipelineError>;
}

/// The per-event queue of deferred writes. Drained strictly in FIFO order.
#[derive(Debug, Default)]
pub struct WriteQueue {
    items: VecDeque<Box<dyn Writable>>,
}

impl WriteQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: Box<dyn Writable>) {
        self.items.push_back(item);
    }

    /// Removes the oldest queued item.
    pub fn poll(&mut self) -> Option<Box<dyn Writable>> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A block of body text.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph(pub String);

impl Writable for Paragraph {
    fn write(&self, document: &mut PdfDocument) -> Result<(), PipelineError> {
        document.add_paragraph(self.0.clone())?;
        Ok(())
    }
}
