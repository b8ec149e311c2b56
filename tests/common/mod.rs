pub mod fixtures;
pub mod pdf_assertions;

use docsplit::{
    ConversionSummary, Event, InMemorySinkFactory, PageSize, PipelineBuilder, PipelineError,
};
use lopdf::Document as LopdfDocument;
use std::sync::Arc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around one produced PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Every string shown on the given page (1-based), in content order
    pub fn page_strings(&self, page: u32) -> Vec<String> {
        pdf_assertions::shown_strings(&self.doc, page)
    }

    /// Every string shown anywhere in the document
    pub fn strings(&self) -> Vec<String> {
        (1..=self.page_count() as u32)
            .flat_map(|page| self.page_strings(page))
            .collect()
    }

    /// Text-space origin of the first line on the given page
    pub fn first_line_origin(&self, page: u32) -> Option<(f32, f32)> {
        pdf_assertions::line_origins(&self.doc, page).into_iter().next()
    }

    /// (width, height) of the first page's media box
    pub fn media_size(&self) -> Option<(f32, f32)> {
        pdf_assertions::media_size(&self.doc, 1)
    }
}

/// Outcome of a conversion into in-memory sinks
pub struct Conversion {
    pub summary: ConversionSummary,
    pub factory: Arc<InMemorySinkFactory>,
}

impl Conversion {
    /// Parse every produced buffer, in creation order
    pub fn pdfs(&self) -> Result<Vec<GeneratedPdf>, Box<dyn std::error::Error>> {
        self.factory
            .buffers()
            .into_iter()
            .map(|buffer| GeneratedPdf::from_bytes(buffer.contents()))
            .collect()
    }
}

/// Run events through the standard chain, splitting on `document_tag` and
/// opening on `open_tag`, writing into memory.
pub fn convert(
    document_tag: &str,
    open_tag: &str,
    events: Vec<Event>,
) -> Result<Conversion, PipelineError> {
    convert_with_page(document_tag, open_tag, PageSize::A4, events)
}

pub fn convert_with_page(
    document_tag: &str,
    open_tag: &str,
    page_size: PageSize,
    events: Vec<Event>,
) -> Result<Conversion, PipelineError> {
    let factory = Arc::new(InMemorySinkFactory::new());
    let runner = PipelineBuilder::new()
        .with_sink_factory(Arc::clone(&factory))
        .with_document_tag(document_tag)
        .with_open_tag(open_tag)
        .with_page_size(page_size)
        .build()?;
    let summary = runner.run(events)?;
    Ok(Conversion { summary, factory })
}
