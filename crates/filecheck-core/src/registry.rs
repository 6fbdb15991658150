//! Extension registry
//!
//! The process-wide table of every supported extension, its owning
//! [`Category`] and whether it is authorized out of the box. Built once on
//! first access and read-only afterwards; reach it through [`registry()`].

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use filecheck_traits::Category;

/// Extensions grouped by category, with their default authorization flag.
///
/// Case is significant: `Z` (unix compress) is registered uppercase.
const EXTENSIONS: &[(Category, &[(&str, bool)])] = &[
    (
        Category::Application,
        &[("dex", false), ("dey", false), ("wasm", false)],
    ),
    (
        Category::Archive,
        &[
            ("7z", false),
            ("Z", false),
            ("ar", false),
            ("bz2", false),
            ("cab", false),
            ("crx", false),
            ("dcm", false),
            ("deb", false),
            ("elf", false),
            ("eot", false),
            ("epub", false),
            ("exe", false),
            ("gz", false),
            ("iso", false),
            ("lz", false),
            ("nes", false),
            ("pdf", true),
            ("ps", false),
            ("rar", false),
            ("rpm", false),
            ("rtf", false),
            ("sqlite", false),
            ("swf", false),
            ("tar", false),
            ("xz", false),
            ("zip", false),
            ("zstd", false),
        ],
    ),
    (
        Category::Audio,
        &[
            ("aac", false),
            ("aiff", false),
            ("amr", false),
            ("flac", false),
            ("m4a", false),
            ("mid", false),
            ("mp3", false),
            ("ogg", false),
            ("wav", false),
        ],
    ),
    (
        Category::Documents,
        &[
            ("doc", false),
            ("docx", false),
            ("ppt", false),
            ("pptx", false),
            ("xls", false),
            ("xlsx", false),
        ],
    ),
    (
        Category::Font,
        &[
            ("otf", false),
            ("ttf", false),
            ("woff", false),
            ("woff2", false),
        ],
    ),
    (
        Category::Image,
        &[
            ("bmp", false),
            ("cr2", false),
            ("dwg", false),
            ("gif", false),
            ("heif", false),
            ("ico", false),
            ("jpg", true),
            ("jxr", false),
            ("png", true),
            ("psd", false),
            ("tif", false),
            ("webp", false),
        ],
    ),
    (
        Category::Video,
        &[
            ("3gp", false),
            ("avi", false),
            ("flv", false),
            ("m4v", false),
            ("mkv", false),
            ("mov", false),
            ("mp4", false),
            ("mpg", false),
            ("webm", false),
            ("wmv", false),
        ],
    ),
];

/// A registered extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryEntry {
    /// Owning category
    pub category: Category,
    /// Whether the extension is authorized in a freshly created policy
    pub default_authorized: bool,
}

/// Immutable extension -> category table
#[derive(Debug)]
pub struct ExtensionRegistry {
    entries: BTreeMap<&'static str, RegistryEntry>,
}

/// The process-wide registry
pub fn registry() -> &'static ExtensionRegistry {
    static REGISTRY: OnceLock<ExtensionRegistry> = OnceLock::new();
    REGISTRY.get_or_init(ExtensionRegistry::build)
}

impl ExtensionRegistry {
    fn build() -> Self {
        let entries = EXTENSIONS
            .iter()
            .flat_map(|(category, extensions)| {
                extensions.iter().map(move |(extension, default_authorized)| {
                    (
                        *extension,
                        RegistryEntry {
                            category: *category,
                            default_authorized: *default_authorized,
                        },
                    )
                })
            })
            .collect();

        Self { entries }
    }

    /// Category owning `extension`, `None` if unregistered
    pub fn category_of(&self, extension: &str) -> Option<Category> {
        self.entries.get(extension).map(|entry| entry.category)
    }

    /// Registry entry for `extension`
    pub fn get(&self, extension: &str) -> Option<RegistryEntry> {
        self.entries.get(extension).copied()
    }

    /// Whether `extension` is registered
    pub fn is_known(&self, extension: &str) -> bool {
        self.entries.contains_key(extension)
    }

    /// Whether `extension` is authorized by default
    pub fn is_default_authorized(&self, extension: &str) -> bool {
        self.entries
            .get(extension)
            .is_some_and(|entry| entry.default_authorized)
    }

    /// Every registered extension with its entry, sorted by extension
    pub fn extensions(&self) -> impl Iterator<Item = (&'static str, RegistryEntry)> + '_ {
        self.entries.iter().map(|(extension, entry)| (*extension, *entry))
    }

    /// Extensions owned by `category`, sorted
    pub fn extensions_in(&self, category: Category) -> impl Iterator<Item = &'static str> + '_ {
        self.extensions()
            .filter(move |(_, entry)| entry.category == category)
            .map(|(extension, _)| extension)
    }

    /// Extensions authorized by default
    pub fn default_authorized_extensions(&self) -> BTreeSet<&'static str> {
        self.extensions()
            .filter(|(_, entry)| entry.default_authorized)
            .map(|(extension, _)| extension)
            .collect()
    }

    /// Categories owning at least one default-authorized extension
    pub fn default_authorized_categories(&self) -> BTreeSet<Category> {
        self.extensions()
            .filter(|(_, entry)| entry.default_authorized)
            .map(|(_, entry)| entry.category)
            .collect()
    }

    /// Number of registered extensions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no extensions
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
