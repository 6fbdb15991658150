//! Scripted collaborators for tests
//!
//! These let engine tests pin the classifier's two signals independently and
//! inject I/O failures at a chosen stage.

use std::io::{self, Read};

use crate::{Category, Classifier, Detection, FileSource, FileSourceError};

/// Classifier returning fixed answers regardless of input
#[derive(Debug, Clone, Default)]
pub struct ScriptedClassifier {
    /// Answer for [`Classifier::classify`]
    pub detection: Option<Detection>,
    /// Categories [`Classifier::matches_category`] answers `true` for
    pub categories: Vec<Category>,
}

impl ScriptedClassifier {
    /// Classifier that recognizes nothing
    pub fn unrecognized() -> Self {
        Self::default()
    }

    /// Classifier detecting `extension` and matching `category`
    pub fn detecting(category: Category, extension: &str) -> Self {
        Self {
            detection: Some(Detection::new(
                Some(category),
                extension,
                "application/octet-stream",
            )),
            categories: vec![category],
        }
    }

    /// Add another category the header claims membership of
    pub fn also_matching(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }
}

impl Classifier for ScriptedClassifier {
    fn classify(&self, _header: &[u8]) -> Option<Detection> {
        self.detection.clone()
    }

    fn matches_category(&self, category: Category, _header: &[u8]) -> bool {
        self.categories.contains(&category)
    }
}

/// Stage at which a [`FailingSource`] fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    /// `open` returns an error
    Open,
    /// `open` succeeds, the first `read` errors
    Read,
}

/// File source that always fails
#[derive(Debug, Clone, Copy)]
pub struct FailingSource(pub FailAt);

struct BrokenReader;

impl Read for BrokenReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "stream reset"))
    }
}

impl FileSource for FailingSource {
    fn open(&self) -> Result<Box<dyn Read + '_>, FileSourceError> {
        match self.0 {
            FailAt::Open => Err(FileSourceError::Unavailable(
                "scripted open failure".to_string(),
            )),
            FailAt::Read => Ok(Box::new(BrokenReader)),
        }
    }

    fn name(&self) -> Option<&str> {
        Some("failing.bin")
    }
}
