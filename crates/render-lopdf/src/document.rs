use crate::error::RenderError;
use crate::layout::Block;
use docsplit_style::{Margins, PageSize};
use log::debug;

/// Lifecycle of a [`PdfDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    /// Allocated, margins may still change, no content accepted yet.
    Created,
    /// Accepting content.
    Open,
    /// Finalized; nothing may change any more.
    Closed,
}

/// An in-progress output document.
///
/// Nothing becomes visible outside the document until its writer finalizes
/// it, so `open` and `set_margins` may be repeated with identical values.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    page_size: PageSize,
    margins: Margins,
    state: DocumentState,
    blocks: Vec<Block>,
}

impl PdfDocument {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            margins: Margins::default(),
            state: DocumentState::Created,
            blocks: Vec::new(),
        }
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Width of the page in points, the basis for percentage margins.
    pub fn page_width(&self) -> f32 {
        self.page_size.width()
    }

    pub fn page_height(&self) -> f32 {
        self.page_size.height()
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Replaces the margins for paragraphs added from now on. Paragraphs
    /// already added keep the margins they were written with.
    pub fn set_margins(&mut self, margins: Margins) -> Result<(), RenderError> {
        if self.state == DocumentState::Closed {
            return Err(RenderError::AlreadyClosed);
        }
        self.margins = margins;
        Ok(())
    }

    /// Opens the document for content. Opening an open document is a no-op.
    pub fn open(&mut self) -> Result<(), RenderError> {
        match self.state {
            DocumentState::Created => {
                debug!("Document opened with margins {:?}", self.margins);
                self.state = DocumentState::Open;
                Ok(())
            }
            DocumentState::Open => Ok(()),
            DocumentState::Closed => Err(RenderError::AlreadyClosed),
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == DocumentState::Open
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    pub fn add_paragraph(&mut self, text: impl Into<String>) -> Result<(), RenderError> {
        match self.state {
            DocumentState::Open => {
                self.blocks.push(Block::new(text, self.margins));
                Ok(())
            }
            DocumentState::Created => Err(RenderError::DocumentNotOpen),
            DocumentState::Closed => Err(RenderError::AlreadyClosed),
        }
    }

    /// Paragraphs in writing order, each with its margins.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn paragraphs(&self) -> Vec<&str> {
        self.blocks.iter().map(|b| b.text.as_str()).collect()
    }

    /// Marks the document finished. Closing twice is an error.
    pub fn close(&mut self) -> Result<(), RenderError> {
        if self.state == DocumentState::Closed {
            return Err(RenderError::AlreadyClosed);
        }
        self.state = DocumentState::Closed;
        Ok(())
    }
}
