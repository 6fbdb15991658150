//! Filecheck constants

/// Number of leading bytes handed to the classifier.
///
/// Covers the longest magic prefix of every supported format; see
/// <https://www.garykessler.net/library/file_sigs.html>.
pub const DEFAULT_HEADER_WINDOW: usize = 261;

/// Largest accepted header window (1 MiB)
pub const MAX_HEADER_WINDOW: usize = 1024 * 1024;
