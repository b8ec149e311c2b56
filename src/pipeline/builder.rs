use super::boundary::DocumentBoundaryStage;
use super::config::ConversionConfig;
use super::runner::PipelineRunner;
use super::text::TextStage;
use super::writer::PdfWriterStage;
use crate::error::PipelineError;
use docsplit_style::PageSize;
use docsplit_traits::SinkFactory;

/// A builder for the standard chain:
/// [`DocumentBoundaryStage`] → [`TextStage`] → [`PdfWriterStage`].
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    sink_factory: Option<Box<dyn SinkFactory>>,
    config: ConversionConfig,
}

impl PipelineBuilder {
    /// Creates a new `PipelineBuilder` with the default configuration.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets where finalized documents are written. Required.
    pub fn with_sink_factory(mut self, factory: impl SinkFactory + 'static) -> Self {
        self.sink_factory = Some(Box::new(factory));
        self
    }

    pub fn with_document_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.document_tag = tag.into();
        self
    }

    pub fn with_open_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.open_tag = tag.into();
        self
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.config.page_size = page_size;
        self
    }

    /// Replaces tags and page size with those of `config`.
    pub fn with_config(mut self, config: ConversionConfig) -> Self {
        self.config = config;
        self
    }

    /// Consumes the builder and wires the chain.
    pub fn build(self) -> Result<PipelineRunner, PipelineError> {
        let sink_factory = self.sink_factory.ok_or_else(|| {
            PipelineError::Config(
                "No sink factory has been configured. Use `with_sink_factory`.".to_string(),
            )
        })?;
        self.config.validate()?;

        log::info!(
            "Splitting on <{}>, opening on <{}>, writing through {}",
            self.config.document_tag,
            self.config.open_tag,
            sink_factory.name()
        );
        let writer = PdfWriterStage::new(self.config.page_size);
        let text = TextStage::new().with_next(Box::new(writer));
        let boundary = DocumentBoundaryStage::new(
            sink_factory,
            self.config.document_tag,
            self.config.open_tag,
        )
        .with_next(Box::new(text));

        Ok(PipelineRunner::new(Box::new(boundary)))
    }
}
