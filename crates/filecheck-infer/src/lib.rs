//! Magic-number classifier for filecheck
//!
//! [`InferClassifier`] implements [`Classifier`] on top of the `infer` crate.
//! Detected extensions are rewritten onto the spelling used by the filecheck
//! extension registry, and infer's matcher kinds are folded onto the seven
//! [`Category`] values.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::bare_urls)]

use std::fmt;

use filecheck_traits::{Category, Classifier, Detection};
use infer::{Infer, MatcherType};

/// OLE2 compound document signature shared by legacy Office formats (doc, xls, ppt)
pub const OLE2_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Extension reported for an OLE2 header that infer cannot resolve further
pub const LEGACY_OFFICE_EXTENSION: &str = "doc";

const LEGACY_OFFICE_MIME_TYPE: &str = "application/msword";

/// infer spelling -> registry spelling
const EXTENSION_ALIASES: &[(&str, &str)] = &[
    ("aif", "aiff"),
    ("jpeg", "jpg"),
    ("midi", "mid"),
    ("tiff", "tif"),
    ("zst", "zstd"),
];

/// Map an extension reported by infer onto the registry spelling
pub fn canonical_extension(extension: &str) -> &str {
    EXTENSION_ALIASES
        .iter()
        .find(|(alias, _)| *alias == extension)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(extension)
}

/// Map an infer matcher kind onto a category
pub fn category_of_matcher(matcher: MatcherType) -> Option<Category> {
    match matcher {
        MatcherType::App => Some(Category::Application),
        // epub is registered as an archive
        MatcherType::Archive | MatcherType::Book => Some(Category::Archive),
        MatcherType::Audio => Some(Category::Audio),
        MatcherType::Doc => Some(Category::Documents),
        MatcherType::Font => Some(Category::Font),
        MatcherType::Image => Some(Category::Image),
        MatcherType::Video => Some(Category::Video),
        _ => None,
    }
}

fn is_legacy_office(header: &[u8]) -> bool {
    header.starts_with(&OLE2_SIGNATURE)
}

/// [`Classifier`] backed by [`infer::Infer`]
pub struct InferClassifier {
    infer: Infer,
}

impl InferClassifier {
    /// Classifier with infer's built-in matchers
    pub fn new() -> Self {
        Self {
            infer: Infer::new(),
        }
    }

    /// Classifier with additional custom matchers.
    ///
    /// Custom matches classify with no category, so they can only pass a
    /// policy check whose category gate is satisfied by a built-in signature.
    pub fn with_custom_matchers<F>(setup: F) -> Self
    where
        F: FnOnce(&mut Infer),
    {
        let mut infer = Infer::new();
        setup(&mut infer);
        Self { infer }
    }
}

impl Default for InferClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InferClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferClassifier").finish_non_exhaustive()
    }
}

impl Classifier for InferClassifier {
    fn classify(&self, header: &[u8]) -> Option<Detection> {
        let kind = self.infer.get(header);

        // a header window too short for the compound-file directory leaves
        // infer with the bare OLE2 signature, which it reports as msi
        if is_legacy_office(header) && kind.is_none_or(|kind| kind.extension() == "msi") {
            return Some(Detection::new(
                Some(Category::Documents),
                LEGACY_OFFICE_EXTENSION,
                LEGACY_OFFICE_MIME_TYPE,
            ));
        }

        let Some(kind) = kind else {
            tracing::trace!(
                target: "filecheck_infer::classify",
                "No signature matched {} header bytes",
                header.len()
            );
            return None;
        };

        Some(Detection::new(
            category_of_matcher(kind.matcher_type()),
            canonical_extension(kind.extension()),
            kind.mime_type(),
        ))
    }

    fn matches_category(&self, category: Category, header: &[u8]) -> bool {
        match category {
            Category::Application => self.infer.is_app(header),
            Category::Archive => self.infer.is_archive(header) || self.infer.is_book(header),
            Category::Audio => self.infer.is_audio(header),
            // infer needs a full compound-file sector to tell doc/xls/ppt apart,
            // which a short header window never holds
            Category::Documents => self.infer.is_document(header) || is_legacy_office(header),
            Category::Font => self.infer.is_font(header),
            Category::Image => self.infer.is_image(header),
            Category::Video => self.infer.is_video(header),
        }
    }
}
