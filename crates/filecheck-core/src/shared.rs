//! Checker handle shared across threads
//!
//! A [`FileChecker`] is single-owner. [`SharedFileChecker`] wraps one in a
//! mutex so several request handlers can consult and update the same policy;
//! every call holds the lock until it returns, including the header read.

use std::sync::Arc;

use filecheck_traits::{Classifier, Detection, FileSource};
use parking_lot::Mutex;

use crate::checker::FileChecker;
use crate::error::Denial;
use crate::policy::PolicyState;

/// Cloneable, lock-protected [`FileChecker`]
pub struct SharedFileChecker<C>
where
    C: Classifier,
{
    inner: Arc<Mutex<FileChecker<C>>>,
}

impl<C> Clone for SharedFileChecker<C>
where
    C: Classifier,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C> From<FileChecker<C>> for SharedFileChecker<C>
where
    C: Classifier,
{
    fn from(checker: FileChecker<C>) -> Self {
        Self::new(checker)
    }
}

impl<C> SharedFileChecker<C>
where
    C: Classifier,
{
    /// Share `checker`
    pub fn new(checker: FileChecker<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(checker)),
        }
    }

    /// Grant extensions
    pub fn authorize<I, S>(&self, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.inner.lock().authorize(extensions);
    }

    /// Revoke extensions
    pub fn deauthorize<I, S>(&self, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.inner.lock().deauthorize(extensions);
    }

    /// Run the decision procedure on `source`
    pub fn check_source<S>(&self, source: &S) -> Result<Detection, Denial>
    where
        S: FileSource + ?Sized,
    {
        self.inner.lock().check_source(source)
    }

    /// Whether `source` is authorized
    pub fn is_source_authorized<S>(&self, source: &S) -> bool
    where
        S: FileSource + ?Sized,
    {
        self.inner.lock().is_source_authorized(source)
    }

    /// Copy of the current policy
    pub fn policy_snapshot(&self) -> PolicyState {
        self.inner.lock().policy().clone()
    }

    /// Run `f` with exclusive access to the checker
    pub fn with_checker<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut FileChecker<C>) -> R,
    {
        f(&mut *self.inner.lock())
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use filecheck_traits::Category;
    use filecheck_traits::test_utils::ScriptedClassifier;

    use super::*;
    use crate::source::BytesSource;

    #[test]
    fn test_shared_checker_sees_updates_from_clones() {
        let shared = SharedFileChecker::new(FileChecker::new(ScriptedClassifier::detecting(
            Category::Image,
            "gif",
        )));
        let source = BytesSource::new(b"GIF89a".to_vec());
        assert!(!shared.is_source_authorized(&source));

        let writer = shared.clone();
        thread::spawn(move || writer.authorize(["gif"]))
            .join()
            .unwrap();

        assert!(shared.is_source_authorized(&source));
        assert!(shared.policy_snapshot().is_extension_authorized("gif"));

        shared.deauthorize(["gif"]);
        assert!(matches!(
            shared.check_source(&source),
            Err(Denial::ExtensionNotAuthorized { .. })
        ));
    }

    #[test]
    fn test_shared_checker_concurrent_checks() {
        let shared: SharedFileChecker<_> =
            FileChecker::new(ScriptedClassifier::detecting(Category::Image, "png")).into();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let source = BytesSource::new(b"\x89PNG".to_vec());
                    (0..16).all(|_| shared.is_source_authorized(&source))
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }

    #[test]
    fn test_with_checker() {
        let shared = SharedFileChecker::new(FileChecker::new(ScriptedClassifier::unrecognized()));
        let window = shared.with_checker(|checker| {
            checker.set_file(Some(BytesSource::new(vec![1, 2, 3])));
            checker.header_window()
        });

        assert_eq!(window, 261);
        assert!(shared.with_checker(|checker| checker.has_file()));
    }
}
