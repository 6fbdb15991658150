//! File sources
//!
//! A [`FileSource`] is whatever hands the engine the bytes of an uploaded
//! file: a path on disk, a buffered multipart part, a network stream.
//! Opening may fail independently of classification.

use std::io::{self, Read};

/// Errors raised while opening a file source
#[derive(Debug, thiserror::Error)]
pub enum FileSourceError {
    /// Underlying I/O failure
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// One-shot source was already opened once
    #[error("file source was already consumed")]
    AlreadyConsumed,

    /// Source cannot be opened for another reason
    #[error("file source unavailable: {0}")]
    Unavailable(String),
}

/// The byte stream of an uploaded file.
pub trait FileSource {
    /// Open the file for reading from its first byte.
    fn open(&self) -> Result<Box<dyn Read + '_>, FileSourceError>;

    /// Name supplied by the uploader, if any.
    ///
    /// Used for diagnostics only; it plays no part in authorization.
    fn name(&self) -> Option<&str> {
        None
    }
}

impl<S> FileSource for &S
where
    S: FileSource + ?Sized,
{
    fn open(&self) -> Result<Box<dyn Read + '_>, FileSourceError> {
        (**self).open()
    }

    fn name(&self) -> Option<&str> {
        (**self).name()
    }
}

impl<S> FileSource for Box<S>
where
    S: FileSource + ?Sized,
{
    fn open(&self) -> Result<Box<dyn Read + '_>, FileSourceError> {
        (**self).open()
    }

    fn name(&self) -> Option<&str> {
        (**self).name()
    }
}
