//! SinkFactory trait for abstracting where finished documents are written.
//!
//! The pipeline asks the factory for one fresh sink per document it creates,
//! so a single conversion can emit any number of output documents without
//! being reconfigured.

use std::fmt::Debug;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Error type for sink acquisition.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Refusing to overwrite existing output '{0}'")]
    AlreadyExists(String),

    #[error("Sink factory exhausted after {limit} sinks")]
    Exhausted { limit: usize },
}

/// A byte destination for one serialized document.
pub trait Sink: Write + Send {}

impl<T: Write + Send> Sink for T {}

/// A capability that yields a fresh output sink on demand.
///
/// # Implementations
///
/// - `InMemorySinkFactory`: keeps every produced buffer for later inspection
/// - `FilesystemSinkFactory` (docsplit-resource): numbered files in a directory
pub trait SinkFactory: Send + Sync + Debug {
    /// Creates the sink for the next document.
    fn new_sink(&self) -> Result<Box<dyn Sink>, SinkError>;

    /// Returns a human-readable name for this factory (for logging/debugging).
    fn name(&self) -> &'static str;
}

impl<F: SinkFactory + ?Sized> SinkFactory for Arc<F> {
    fn new_sink(&self) -> Result<Box<dyn Sink>, SinkError> {
        (**self).new_sink()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<F: SinkFactory + ?Sized> SinkFactory for Box<F> {
    fn new_sink(&self) -> Result<Box<dyn Sink>, SinkError> {
        (**self).new_sink()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// A cloneable in-memory byte buffer. All clones share the same bytes.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies out the bytes written so far.
    ///
    /// Returns an empty vector if the lock is poisoned.
    pub fn contents(&self) -> Vec<u8> {
        self.bytes.lock().map(|b| b.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.bytes.lock().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = self
            .bytes
            .lock()
            .map_err(|_| io::Error::other("shared buffer lock poisoned"))?;
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A sink factory handing out in-memory buffers.
///
/// Every buffer it creates is retained, in creation order, so callers can
/// inspect what each document wrote.
#[derive(Debug, Default)]
pub struct InMemorySinkFactory {
    buffers: Mutex<Vec<SharedBuffer>>,
    limit: Option<usize>,
}

impl InMemorySinkFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A factory that fails once `limit` sinks have been handed out.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            buffers: Mutex::new(Vec::new()),
            limit: Some(limit),
        }
    }

    /// The buffers created so far.
    ///
    /// Returns an empty list if the lock is poisoned.
    pub fn buffers(&self) -> Vec<SharedBuffer> {
        self.buffers.lock().map(|b| b.clone()).unwrap_or_default()
    }

    /// Number of sinks handed out so far.
    pub fn created(&self) -> usize {
        self.buffers.lock().map(|b| b.len()).unwrap_or(0)
    }
}

impl SinkFactory for InMemorySinkFactory {
    fn new_sink(&self) -> Result<Box<dyn Sink>, SinkError> {
        let mut buffers = self
            .buffers
            .lock()
            .map_err(|_| io::Error::other("sink registry lock poisoned"))?;
        if let Some(limit) = self.limit
            && buffers.len() >= limit
        {
            return Err(SinkError::Exhausted { limit });
        }
        let buffer = SharedBuffer::new();
        buffers.push(buffer.clone());
        Ok(Box::new(buffer))
    }

    fn name(&self) -> &'static str {
        "InMemorySinkFactory"
    }
}
