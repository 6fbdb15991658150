//! File sources shipped with the engine
//!
//! - [`PathSource`]: a file on disk, e.g. an upload spooled to a temp dir
//! - [`BytesSource`]: an upload already buffered in memory
//! - [`ReaderSource`]: a one-shot stream

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use filecheck_traits::{FileSource, FileSourceError};
use parking_lot::Mutex;

/// File on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSource {
    path: PathBuf,
    name: Option<String>,
}

impl PathSource {
    /// Source reading `path`; its name is the final path component
    pub fn new<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        let path = path.into();
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_owned);
        Self { path, name }
    }

    /// Path being read
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FileSource for PathSource {
    fn open(&self) -> Result<Box<dyn Read + '_>, FileSourceError> {
        let file = File::open(&self.path)?;
        Ok(Box::new(file))
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// In-memory upload body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BytesSource {
    data: Vec<u8>,
    name: Option<String>,
}

impl BytesSource {
    /// Source over `data`
    pub fn new(data: Vec<u8>) -> Self {
        Self { data, name: None }
    }

    /// Attach the uploader-supplied filename
    pub fn with_name<S>(mut self, name: S) -> Self
    where
        S: Into<String>,
    {
        self.name = Some(name.into());
        self
    }

    /// Buffered bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl From<Vec<u8>> for BytesSource {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for BytesSource {
    fn from(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }
}

impl FileSource for BytesSource {
    fn open(&self) -> Result<Box<dyn Read + '_>, FileSourceError> {
        Ok(Box::new(Cursor::new(self.data.as_slice())))
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// One-shot reader.
///
/// The first `open` hands out the reader; later calls fail with
/// [`FileSourceError::AlreadyConsumed`].
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: Mutex<Option<R>>,
    name: Option<String>,
}

impl<R> ReaderSource<R>
where
    R: Read,
{
    /// Source over `reader`
    pub fn new(reader: R) -> Self {
        Self {
            reader: Mutex::new(Some(reader)),
            name: None,
        }
    }

    /// Attach the uploader-supplied filename
    pub fn with_name<S>(mut self, name: S) -> Self
    where
        S: Into<String>,
    {
        self.name = Some(name.into());
        self
    }

    /// Whether the reader has already been handed out
    pub fn is_consumed(&self) -> bool {
        self.reader.lock().is_none()
    }
}

impl<R> FileSource for ReaderSource<R>
where
    R: Read,
{
    fn open(&self) -> Result<Box<dyn Read + '_>, FileSourceError> {
        let reader = self
            .reader
            .lock()
            .take()
            .ok_or(FileSourceError::AlreadyConsumed)?;
        Ok(Box::new(reader))
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn read_all(source: &dyn FileSource) -> Vec<u8> {
        let mut out = Vec::new();
        source.open().unwrap().read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn test_path_source() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"\x89PNG\r\n").unwrap();

        let source = PathSource::new(file.path());
        assert_eq!(source.path(), file.path());
        assert!(source.name().unwrap().ends_with(".png"));
        assert_eq!(read_all(&source), b"\x89PNG\r\n");
        // re-openable
        assert_eq!(read_all(&source), b"\x89PNG\r\n");
    }

    #[test]
    fn test_path_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = PathSource::new(dir.path().join("missing.jpg"));

        assert!(matches!(source.open(), Err(FileSourceError::Io(_))));
        assert_eq!(source.name(), Some("missing.jpg"));
    }

    #[test]
    fn test_bytes_source() {
        let source = BytesSource::new(b"GIF89a".to_vec()).with_name("cat.gif");

        assert_eq!(source.name(), Some("cat.gif"));
        assert_eq!(source.data(), b"GIF89a");
        assert_eq!(read_all(&source), b"GIF89a");
        assert_eq!(read_all(&source), b"GIF89a");

        let from_slice = BytesSource::from(&b"abc"[..]);
        assert_eq!(from_slice.name(), None);
        assert_eq!(from_slice, BytesSource::from(b"abc".to_vec()));
    }

    #[test]
    fn test_reader_source_is_one_shot() {
        let source = ReaderSource::new(Cursor::new(vec![1u8, 2, 3])).with_name("stream.bin");
        assert!(!source.is_consumed());
        assert_eq!(source.name(), Some("stream.bin"));

        assert_eq!(read_all(&source), vec![1, 2, 3]);
        assert!(source.is_consumed());
        assert!(matches!(
            source.open(),
            Err(FileSourceError::AlreadyConsumed)
        ));
    }
}
