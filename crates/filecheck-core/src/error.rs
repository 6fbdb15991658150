//! Filecheck errors

use std::io;

use filecheck_traits::FileSourceError;

/// Crate error, raised while building a checker
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Configuration could not be parsed
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Why a file was not authorized.
///
/// [`FileChecker::is_authorized`](crate::FileChecker::is_authorized) collapses
/// every variant into `false`; [`FileChecker::check`](crate::FileChecker::check)
/// returns it for callers that need diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum Denial {
    /// No file attached to the checker
    #[error("no file attached")]
    NoFile,
    /// File source could not be opened
    #[error("cannot open file: {0}")]
    Open(#[source] FileSourceError),
    /// Header bytes could not be read
    #[error("cannot read file header: {0}")]
    Read(#[source] io::Error),
    /// Header matches no known signature
    #[error("file signature not recognized")]
    Unrecognized,
    /// No authorized category matches the header
    #[error("no authorized category matches the file signature")]
    CategoryNotAuthorized,
    /// Detected extension is untracked or unauthorized
    #[error("detected extension {extension:?} is not authorized")]
    ExtensionNotAuthorized {
        /// Canonical extension reported by the classifier
        extension: String,
    },
}

impl Denial {
    /// `true` for a recognized file refused by policy, `false` for missing
    /// input, I/O failure or an unrecognized signature
    pub fn is_policy_denial(&self) -> bool {
        matches!(
            self,
            Self::CategoryNotAuthorized | Self::ExtensionNotAuthorized { .. }
        )
    }
}
