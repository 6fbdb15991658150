//! Content categories

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when a string does not name a [`Category`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(pub String);

/// A content class. Closed set; every registered extension belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Executable or bytecode formats (dex, wasm, ...)
    Application,
    /// Archives and container formats, including pdf
    Archive,
    /// Audio
    Audio,
    /// Office documents
    Documents,
    /// Fonts
    Font,
    /// Images
    Image,
    /// Video
    Video,
}

impl Category {
    /// Every category, in declaration order
    pub const ALL: [Category; 7] = [
        Self::Application,
        Self::Archive,
        Self::Audio,
        Self::Documents,
        Self::Font,
        Self::Image,
        Self::Video,
    ];

    /// Get as `&str`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "Application",
            Self::Archive => "Archive",
            Self::Audio => "Audio",
            Self::Documents => "Documents",
            Self::Font => "Font",
            Self::Image => "Image",
            Self::Video => "Video",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}
