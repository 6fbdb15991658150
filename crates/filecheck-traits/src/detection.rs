//! Classifier results

use serde::{Deserialize, Serialize};

use crate::Category;

/// A recognized file signature
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Detection {
    /// Category the signature belongs to, `None` for kinds outside the known
    /// categories (plain text, custom matchers)
    pub category: Option<Category>,
    /// Canonical extension of the detected format, spelled as in the registry
    pub extension: String,
    /// MIME type reported by the classifier
    pub mime_type: String,
}

impl Detection {
    /// Create a new detection
    pub fn new<E, M>(category: Option<Category>, extension: E, mime_type: M) -> Self
    where
        E: Into<String>,
        M: Into<String>,
    {
        Self {
            category,
            extension: extension.into(),
            mime_type: mime_type.into(),
        }
    }
}
