//! Filecheck traits - the collaborator seams of the upload policy engine
//!
//! The policy engine never inspects bytes or touches the filesystem itself.
//! It is written against two traits defined here:
//!
//! - [`Classifier`]: turns the header bytes of a file into a [`Detection`]
//!   and answers per-[`Category`] membership questions.
//! - [`FileSource`]: opens the byte stream of an uploaded file.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::bare_urls)]

pub mod category;
pub mod detection;
pub mod source;
#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use self::category::{Category, ParseCategoryError};
pub use self::detection::Detection;
pub use self::source::{FileSource, FileSourceError};

/// Binary-signature classifier.
///
/// Both methods look at the same header bytes but are independent signals:
/// `classify` yields the single best match (category and canonical extension),
/// while `matches_category` answers whether the bytes belong to one category
/// kind at all. Implementations must be pure.
pub trait Classifier {
    /// Match the header against every known signature.
    ///
    /// Returns `None` when the bytes match no signature.
    fn classify(&self, header: &[u8]) -> Option<Detection>;

    /// Returns `true` if the header carries a signature of the given category.
    fn matches_category(&self, category: Category, header: &[u8]) -> bool;
}

impl<C> Classifier for &C
where
    C: Classifier + ?Sized,
{
    fn classify(&self, header: &[u8]) -> Option<Detection> {
        (**self).classify(header)
    }

    fn matches_category(&self, category: Category, header: &[u8]) -> bool {
        (**self).matches_category(category, header)
    }
}

impl<C> Classifier for Box<C>
where
    C: Classifier + ?Sized,
{
    fn classify(&self, header: &[u8]) -> Option<Detection> {
        (**self).classify(header)
    }

    fn matches_category(&self, category: Category, header: &[u8]) -> bool {
        (**self).matches_category(category, header)
    }
}
