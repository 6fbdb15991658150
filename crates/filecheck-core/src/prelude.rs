//! Filecheck Public Prelude
//!
//! The types needed to build a checker and run it. Classifier
//! implementations (such as `filecheck_infer::InferClassifier`) are imported
//! from their own crates.
//!
//! ## Usage
//!
//! ```rust
//! use filecheck_core::prelude::*;
//! use filecheck_infer::InferClassifier;
//!
//! let checker = FileChecker::new(InferClassifier::new());
//! ```

// === Engine ===
pub use crate::checker::FileChecker;
pub use crate::config::FileCheckerConfig;
pub use crate::policy::PolicyState;
pub use crate::registry::{ExtensionRegistry, registry};
pub use crate::shared::SharedFileChecker;

// === Errors ===
pub use crate::error::{Denial, Error};

// === Sources ===
pub use crate::source::{BytesSource, PathSource, ReaderSource};

// === Seams ===
pub use filecheck_traits::{Category, Classifier, Detection, FileSource, FileSourceError};
