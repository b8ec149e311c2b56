//! The element model stages see: tags with attributes and their computed
//! style, and the open/content/close events that carry them.

use docsplit_style::StyleDeclarations;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// One markup element instance.
///
/// The computed style is shared behind an `Arc`, so work deferred to a later
/// phase can keep a snapshot of it without copying.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    name: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    attributes: HashMap<String, String>,
    #[serde(default)]
    css: Arc<StyleDeclarations>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_css(mut self, css: StyleDeclarations) -> Self {
        self.css = Arc::new(css);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The computed style declarations of this element.
    pub fn css(&self) -> &Arc<StyleDeclarations> {
        &self.css
    }
}

/// A parser event, delivered to the stage chain in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Event {
    Open(Tag),
    Content(String),
    Close(Tag),
}

impl Event {
    pub fn open(tag: Tag) -> Self {
        Event::Open(tag)
    }

    pub fn content(text: impl Into<String>) -> Self {
        Event::Content(text.into())
    }

    pub fn close(name: impl Into<String>) -> Self {
        Event::Close(Tag::new(name))
    }
}
