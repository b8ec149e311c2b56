// src/error.rs
use crate::pipeline::context::ContextError;
use docsplit_render_lopdf::RenderError;
use docsplit_style::StyleParseError;
use docsplit_traits::SinkError;
use thiserror::Error;

/// A comprehensive error type for a whole conversion.
///
/// Every stage reports through this type; the runner aborts on the first one.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A stage was wired into a chain that lacks a collaborator it needs.
    #[error("{stage} depends on {dependency}, which is not part of this pipeline")]
    MissingDependency {
        stage: &'static str,
        dependency: &'static str,
        #[source]
        source: ContextError,
    },

    #[error("Context lookup failed: {0}")]
    Context(#[from] ContextError),

    #[error("Could not acquire an output sink: {0}")]
    SinkAcquisition(#[source] SinkError),

    #[error("Style conversion failed: {0}")]
    Style(#[from] StyleParseError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("<{tag}> opened a new document while the previous one is still active")]
    DocumentAlreadyActive { tag: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
