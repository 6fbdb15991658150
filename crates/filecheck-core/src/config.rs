//! Checker configuration

use serde::{Deserialize, Serialize};

use crate::constant::{DEFAULT_HEADER_WINDOW, MAX_HEADER_WINDOW};
use crate::error::Error;

/// Configuration for a [`FileChecker`](crate::FileChecker)
///
/// # Examples
///
/// ```rust
/// use filecheck_core::FileCheckerConfig;
///
/// // Registry defaults, 261-byte header window
/// let config = FileCheckerConfig::default();
///
/// // Allow gif and webp, refuse pdf
/// let config = FileCheckerConfig {
///     authorize: vec!["gif".into(), "webp".into()],
///     deauthorize: vec!["pdf".into()],
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCheckerConfig {
    /// Leading bytes read from each file for classification.
    ///
    /// Default: 261. Must be between 1 and [`MAX_HEADER_WINDOW`] bytes.
    pub header_window: usize,
    /// Extensions granted on construction, after the registry defaults
    pub authorize: Vec<String>,
    /// Extensions revoked on construction, after `authorize`
    pub deauthorize: Vec<String>,
}

impl Default for FileCheckerConfig {
    fn default() -> Self {
        Self {
            header_window: DEFAULT_HEADER_WINDOW,
            authorize: Vec::new(),
            deauthorize: Vec::new(),
        }
    }
}

impl FileCheckerConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), Error> {
        if self.header_window == 0 {
            return Err(Error::InvalidConfig(
                "header_window must be greater than zero".to_string(),
            ));
        }
        if self.header_window > MAX_HEADER_WINDOW {
            return Err(Error::InvalidConfig(format!(
                "header_window must not exceed {MAX_HEADER_WINDOW} bytes, got {}",
                self.header_window
            )));
        }
        Ok(())
    }
}
