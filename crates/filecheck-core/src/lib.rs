//! Upload authorization policy engine
//!
//! Decides whether an uploaded file may be accepted by cross-checking its
//! binary signature against a policy of allowed content categories and file
//! extensions.
//!
//! - [`registry()`]: the fixed extension -> category table and its defaults
//!   (`jpg`, `png`, `pdf` are allowed out of the box)
//! - [`PolicyState`]: per-checker extension and category flags
//! - [`FileChecker`]: reads a file's header, classifies it and applies the policy
//!
//! ```rust
//! use filecheck_core::prelude::*;
//! use filecheck_infer::InferClassifier;
//!
//! let mut checker = FileChecker::new(InferClassifier::new());
//! checker.set_file(Some(BytesSource::new(b"GIF89a\x01\x00\x01\x00".to_vec())));
//! assert!(!checker.is_authorized());
//!
//! checker.authorize(["gif"]);
//! assert!(checker.is_authorized());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::bare_urls)]

pub mod checker;
pub mod config;
mod constant;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod registry;
pub mod shared;
pub mod source;
#[cfg(test)]
mod test_util;

pub use self::checker::FileChecker;
pub use self::config::FileCheckerConfig;
pub use self::constant::{DEFAULT_HEADER_WINDOW, MAX_HEADER_WINDOW};
pub use self::error::{Denial, Error};
pub use self::policy::PolicyState;
pub use self::registry::{ExtensionRegistry, RegistryEntry, registry};
pub use self::shared::SharedFileChecker;
pub use self::source::{BytesSource, PathSource, ReaderSource};

// Re-export the seams for convenience
pub use filecheck_traits::{Category, Classifier, Detection, FileSource, FileSourceError};
