//! Output sink factories for the docsplit pipeline.
//!
//! This crate provides platform-specific implementations of the
//! `SinkFactory` trait from docsplit-traits.
//!
//! ## Available Factories
//!
//! - [`FilesystemSinkFactory`]: Writes numbered files into a directory
//!
//! ## Re-exports
//!
//! For convenience, we also re-export the in-memory factory from docsplit-traits:
//! - [`InMemorySinkFactory`]: Retains every document in memory

mod filesystem;

pub use filesystem::FilesystemSinkFactory;

pub use docsplit_traits::InMemorySinkFactory;
