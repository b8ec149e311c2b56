//! Filesystem-based sink factory for native platforms.
//!
//! Each call yields a new file named `<prefix>-<n>.<extension>` inside the
//! output directory, with `n` counting from 1.
//!
//! # Safety of existing files
//!
//! Files are opened with `create_new`, so an existing file is never
//! truncated. The prefix may not contain path separators or `..`, which keeps
//! every output inside the configured directory.

use docsplit_traits::{Sink, SinkError, SinkFactory};
use log::debug;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A sink factory producing numbered files in a directory.
#[derive(Debug)]
pub struct FilesystemSinkFactory {
    dir: PathBuf,
    prefix: String,
    extension: String,
    counter: AtomicUsize,
    created: Mutex<Vec<PathBuf>>,
}

impl FilesystemSinkFactory {
    /// Creates a factory writing `document-1.pdf`, `document-2.pdf`, ... into `dir`.
    /// The directory is created on first use if it does not exist.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            prefix: "document".to_string(),
            extension: "pdf".to_string(),
            counter: AtomicUsize::new(0),
            created: Mutex::new(Vec::new()),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Returns the output directory for this factory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths of every file created so far, in creation order.
    ///
    /// Returns an empty list if the lock is poisoned.
    pub fn created_paths(&self) -> Vec<PathBuf> {
        self.created.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn next_path(&self) -> Result<PathBuf, SinkError> {
        if self.prefix.contains(['/', '\\']) || self.prefix.contains("..") {
            return Err(SinkError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("file prefix '{}' must not contain path components", self.prefix),
            )));
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let file_name = if self.extension.is_empty() {
            format!("{}-{}", self.prefix, n)
        } else {
            format!("{}-{}.{}", self.prefix, n, self.extension)
        };
        Ok(self.dir.join(file_name))
    }
}

impl SinkFactory for FilesystemSinkFactory {
    fn new_sink(&self) -> Result<Box<dyn Sink>, SinkError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.next_path()?;

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| {
                if e.kind() == io::ErrorKind::AlreadyExists {
                    SinkError::AlreadyExists(path.display().to_string())
                } else {
                    SinkError::Io(e)
                }
            })?;
        debug!("Opened output sink {}", path.display());

        if let Ok(mut created) = self.created.lock() {
            created.push(path);
        }
        Ok(Box::new(BufWriter::new(file)))
    }

    fn name(&self) -> &'static str {
        "FilesystemSinkFactory"
    }
}
