use crate::error::PipelineError;
use docsplit_style::PageSize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings for one document-splitting conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionConfig {
    /// Element that starts a new output document when it opens and
    /// finalizes it when it closes. Matched case-sensitively.
    pub document_tag: String,
    /// Element whose style supplies the margins and which opens the
    /// document for content. Matched case-insensitively.
    pub open_tag: String,
    pub page_size: PageSize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            document_tag: "html".to_string(),
            open_tag: "body".to_string(),
            page_size: PageSize::A4,
        }
    }
}

impl ConversionConfig {
    pub fn from_json(source: &str) -> Result<Self, PipelineError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        Self::from_json(&source)
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.document_tag.trim().is_empty() {
            return Err(PipelineError::Config("documentTag must not be empty".to_string()));
        }
        if self.open_tag.trim().is_empty() {
            return Err(PipelineError::Config("openTag must not be empty".to_string()));
        }
        Ok(())
    }
}
