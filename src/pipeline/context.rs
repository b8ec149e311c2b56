use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Failure to find shared state in a [`ConversionContext`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// No stage registered a context under this owner, or it has another type.
    #[error("No context registered for '{0}'")]
    Unavailable(&'static str),

    /// The owner's context exists but the requested slot is empty.
    #[error("Context of '{owner}' holds no {slot}")]
    NotFound {
        owner: &'static str,
        slot: &'static str,
    },
}

/// State shared between the stages of one conversion.
///
/// Every stage that publishes state registers one typed value under its own
/// id during `init`; other stages look it up by that id. A context is created
/// per conversion and dropped with it, so nothing leaks between runs.
#[derive(Default)]
pub struct ConversionContext {
    slots: HashMap<&'static str, Box<dyn Any>>,
}

impl ConversionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `value` as the context owned by `owner`, replacing any earlier one.
    pub fn register<T: Any>(&mut self, owner: &'static str, value: T) {
        self.slots.insert(owner, Box::new(value));
    }

    pub fn contains(&self, owner: &'static str) -> bool {
        self.slots.contains_key(owner)
    }

    pub fn get<T: Any>(&self, owner: &'static str) -> Result<&T, ContextError> {
        self.slots
            .get(owner)
            .and_then(|slot| slot.downcast_ref::<T>())
            .ok_or(ContextError::Unavailable(owner))
    }

    pub fn get_mut<T: Any>(&mut self, owner: &'static str) -> Result<&mut T, ContextError> {
        self.slots
            .get_mut(owner)
            .and_then(|slot| slot.downcast_mut::<T>())
            .ok_or(ContextError::Unavailable(owner))
    }
}

impl fmt::Debug for ConversionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionContext")
            .field("owners", &self.slots.keys().collect::<Vec<_>>())
            .finish()
    }
}
