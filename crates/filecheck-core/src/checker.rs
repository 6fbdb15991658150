//! The authorization decision
//!
//! [`FileChecker`] owns a [`PolicyState`], a [`Classifier`] and optionally the
//! file under check. A file is authorized only if every gate passes, in order:
//!
//! 1. a file is attached
//! 2. it opens
//! 3. its header window reads (short files are fine)
//! 4. the classifier recognizes the header
//! 5. some authorized category claims the header
//! 6. the detected extension is authorized
//!
//! Gates 5 and 6 are independent: the detected extension's registry category
//! is not required to be the category that passed gate 5.

use std::io::{self, Read};

use filecheck_traits::{Category, Classifier, Detection, FileSource};

use crate::config::FileCheckerConfig;
use crate::constant::DEFAULT_HEADER_WINDOW;
use crate::error::{Denial, Error};
use crate::policy::PolicyState;

type BoxedSource = Box<dyn FileSource + Send>;

/// Upload policy checker
pub struct FileChecker<C>
where
    C: Classifier,
{
    classifier: C,
    policy: PolicyState,
    header_window: usize,
    file: Option<BoxedSource>,
}

impl<C> FileChecker<C>
where
    C: Classifier,
{
    /// Create a checker with the registry defaults and no file attached
    pub fn new(classifier: C) -> Self {
        Self {
            classifier,
            policy: PolicyState::new(),
            header_window: DEFAULT_HEADER_WINDOW,
            file: None,
        }
    }

    /// Create a checker from a configuration.
    ///
    /// `config.authorize` is applied first, then `config.deauthorize`.
    pub fn with_config(classifier: C, config: FileCheckerConfig) -> Result<Self, Error> {
        config.validate()?;

        let mut checker = Self::new(classifier);
        checker.header_window = config.header_window;
        checker.policy.authorize(&config.authorize);
        if !config.deauthorize.is_empty() {
            checker.policy.deauthorize(&config.deauthorize);
        }

        tracing::debug!(
            target: "filecheck_core::checker",
            "Checker configured: window={} extensions={:?}",
            checker.header_window,
            checker.policy.authorized_extensions()
        );

        Ok(checker)
    }

    /// Attach `file`, replacing any previous one. `None` leaves the current file in place.
    pub fn set_file<F>(&mut self, file: Option<F>)
    where
        F: FileSource + Send + 'static,
    {
        if let Some(file) = file {
            self.file = Some(Box::new(file));
        }
    }

    /// Builder form of [`FileChecker::set_file`]
    pub fn with_file<F>(mut self, file: F) -> Self
    where
        F: FileSource + Send + 'static,
    {
        self.set_file(Some(file));
        self
    }

    /// Whether a file is attached
    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    /// Grant extensions; see [`PolicyState::authorize`]
    pub fn authorize<I, S>(&mut self, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.policy.authorize(extensions);
    }

    /// Revoke extensions; see [`PolicyState::deauthorize`]
    pub fn deauthorize<I, S>(&mut self, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.policy.deauthorize(extensions);
    }

    /// Current policy
    pub fn policy(&self) -> &PolicyState {
        &self.policy
    }

    /// Current policy, mutable
    pub fn policy_mut(&mut self) -> &mut PolicyState {
        &mut self.policy
    }

    /// Classifier in use
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Bytes read from each file for classification
    pub fn header_window(&self) -> usize {
        self.header_window
    }

    /// Whether the attached file is authorized.
    ///
    /// Every failure, from a missing file to a policy refusal, yields `false`.
    /// The reason is emitted as a tracing event only.
    pub fn is_authorized(&self) -> bool {
        let name = self.file.as_ref().and_then(|file| file.name());
        log_outcome(name, self.check())
    }

    /// Run the decision procedure on the attached file, returning the failed gate
    pub fn check(&self) -> Result<Detection, Denial> {
        let file = self.file.as_deref().ok_or(Denial::NoFile)?;
        self.check_source(file)
    }

    /// Whether `source` is authorized, leaving the attached file untouched
    pub fn is_source_authorized<S>(&self, source: &S) -> bool
    where
        S: FileSource + ?Sized,
    {
        log_outcome(source.name(), self.check_source(source))
    }

    /// Run the decision procedure on `source`
    pub fn check_source<S>(&self, source: &S) -> Result<Detection, Denial>
    where
        S: FileSource + ?Sized,
    {
        let reader = source.open().map_err(Denial::Open)?;
        let header = read_header(reader, self.header_window).map_err(Denial::Read)?;

        let detection = self
            .classifier
            .classify(&header)
            .ok_or(Denial::Unrecognized)?;

        if !self.is_type_authorized(&header) {
            return Err(Denial::CategoryNotAuthorized);
        }

        if !self.policy.is_extension_authorized(&detection.extension) {
            return Err(Denial::ExtensionNotAuthorized {
                extension: detection.extension,
            });
        }

        Ok(detection)
    }

    /// Whether any authorized category claims `header`
    pub fn is_type_authorized(&self, header: &[u8]) -> bool {
        Category::ALL.into_iter().any(|category| {
            self.policy.is_category_authorized(category)
                && self.classifier.matches_category(category, header)
        })
    }
}

impl<C> std::fmt::Debug for FileChecker<C>
where
    C: Classifier + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileChecker")
            .field("classifier", &self.classifier)
            .field("policy", &self.policy)
            .field("header_window", &self.header_window)
            .field("has_file", &self.has_file())
            .finish()
    }
}

/// Read up to `window` leading bytes, stopping early at EOF
fn read_header<R>(reader: R, window: usize) -> io::Result<Vec<u8>>
where
    R: Read,
{
    let mut header = Vec::with_capacity(window);
    reader.take(window as u64).read_to_end(&mut header)?;
    Ok(header)
}

fn log_outcome(name: Option<&str>, outcome: Result<Detection, Denial>) -> bool {
    let name = name.unwrap_or("<unnamed>");
    match outcome {
        Ok(detection) => {
            tracing::debug!(
                target: "filecheck_core::checker",
                "Authorized {}: detected {} ({})",
                name,
                detection.extension,
                detection.mime_type
            );
            true
        }
        Err(denial @ (Denial::Open(_) | Denial::Read(_))) => {
            tracing::warn!(target: "filecheck_core::checker", "Denied {}: {}", name, denial);
            false
        }
        Err(denial) => {
            tracing::debug!(target: "filecheck_core::checker", "Denied {}: {}", name, denial);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use filecheck_traits::test_utils::{FailAt, FailingSource, ScriptedClassifier};

    use super::*;
    use crate::source::BytesSource;
    use crate::test_util::{JPEG_HEADER, jpeg_bytes};

    fn checker(classifier: ScriptedClassifier) -> FileChecker<ScriptedClassifier> {
        FileChecker::new(classifier)
    }

    #[test]
    fn test_no_file_is_denied() {
        let checker = checker(ScriptedClassifier::detecting(Category::Image, "jpg"));

        assert!(!checker.has_file());
        assert!(matches!(checker.check(), Err(Denial::NoFile)));
        assert!(!checker.is_authorized());
    }

    #[test]
    fn test_set_file_none_keeps_current_file() {
        let mut checker = checker(ScriptedClassifier::detecting(Category::Image, "jpg"));
        checker.set_file(Some(BytesSource::new(jpeg_bytes())));
        assert!(checker.has_file());

        checker.set_file(None::<BytesSource>);
        assert!(checker.has_file());
        assert!(checker.is_authorized());
    }

    #[test]
    fn test_set_file_replaces_file() {
        let mut checker = checker(ScriptedClassifier::detecting(Category::Image, "jpg"))
            .with_file(FailingSource(FailAt::Open));
        assert!(!checker.is_authorized());

        checker.set_file(Some(BytesSource::new(jpeg_bytes())));
        assert!(checker.is_authorized());
    }

    #[test]
    fn test_open_failure_is_denied() {
        let checker = checker(ScriptedClassifier::detecting(Category::Image, "jpg"))
            .with_file(FailingSource(FailAt::Open));

        assert!(matches!(checker.check(), Err(Denial::Open(_))));
        assert!(!checker.is_authorized());
    }

    #[test]
    fn test_read_failure_is_denied() {
        let checker = checker(ScriptedClassifier::detecting(Category::Image, "jpg"))
            .with_file(FailingSource(FailAt::Read));

        assert!(matches!(checker.check(), Err(Denial::Read(_))));
        assert!(!checker.is_authorized());
    }

    #[test]
    fn test_unrecognized_is_denied() {
        let classifier = ScriptedClassifier::unrecognized().also_matching(Category::Image);
        let checker = checker(classifier).with_file(BytesSource::new(b"nadim".to_vec()));

        assert!(matches!(checker.check(), Err(Denial::Unrecognized)));
    }

    #[test]
    fn test_category_gate() {
        // recognized as jpg, but the header claims no authorized category
        let classifier = ScriptedClassifier {
            categories: vec![Category::Video],
            ..ScriptedClassifier::detecting(Category::Image, "jpg")
        };
        let checker = checker(classifier).with_file(BytesSource::new(jpeg_bytes()));

        assert!(matches!(checker.check(), Err(Denial::CategoryNotAuthorized)));
    }

    #[test]
    fn test_extension_gate() {
        let checker = checker(ScriptedClassifier::detecting(Category::Image, "gif"))
            .with_file(BytesSource::new(b"GIF89a".to_vec()));

        match checker.check() {
            Err(Denial::ExtensionNotAuthorized { extension }) => assert_eq!(extension, "gif"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_gates_are_not_cross_validated() {
        // header passes as Image, detected extension belongs to Archive
        let classifier = ScriptedClassifier {
            categories: vec![Category::Image],
            ..ScriptedClassifier::detecting(Category::Archive, "pdf")
        };
        let checker = checker(classifier).with_file(BytesSource::new(b"%PDF-1.7".to_vec()));

        let detection = checker.check().unwrap();
        assert_eq!(detection.extension, "pdf");
    }

    #[test]
    fn test_untracked_extension_is_denied() {
        let checker = checker(ScriptedClassifier::detecting(Category::Image, "svg"))
            .with_file(BytesSource::new(b"<svg/>".to_vec()));

        assert!(matches!(
            checker.check(),
            Err(Denial::ExtensionNotAuthorized { .. })
        ));
    }

    #[test]
    fn test_deauthorize_extension_denies_even_if_category_remains() {
        let mut checker = checker(ScriptedClassifier::detecting(Category::Image, "jpg"))
            .with_file(BytesSource::new(jpeg_bytes()));
        assert!(checker.is_authorized());

        checker.deauthorize(["jpg"]);
        assert!(checker.policy().is_category_authorized(Category::Image));
        assert!(!checker.is_authorized());

        checker.authorize(["jpg"]);
        assert!(checker.is_authorized());
    }

    #[test]
    fn test_is_type_authorized() {
        let checker = checker(ScriptedClassifier::detecting(Category::Documents, "xls"));
        assert!(!checker.is_type_authorized(&JPEG_HEADER));

        let mut checker = checker;
        checker.authorize(["xls"]);
        assert!(checker.is_type_authorized(&JPEG_HEADER));

        checker.deauthorize(["xls"]);
        assert!(!checker.is_type_authorized(&JPEG_HEADER));
    }

    #[test]
    fn test_is_type_authorized_ignores_explicit_false() {
        let mut checker = checker(ScriptedClassifier::detecting(Category::Image, "jpg"));
        checker.deauthorize(["jpg", "png"]);

        assert_eq!(checker.policy().category_flag(Category::Image), Some(false));
        assert!(!checker.is_type_authorized(&JPEG_HEADER));
    }

    #[test]
    fn test_check_source_leaves_attached_file() {
        let checker = checker(ScriptedClassifier::detecting(Category::Image, "png"));
        let source = BytesSource::new(b"\x89PNG".to_vec()).with_name("a.png");

        assert!(checker.is_source_authorized(&source));
        assert!(!checker.has_file());
        assert!(!checker.is_source_authorized(&FailingSource(FailAt::Read)));
    }

    #[test]
    fn test_header_window_limits_read() {
        struct LenClassifier;

        impl Classifier for LenClassifier {
            fn classify(&self, header: &[u8]) -> Option<Detection> {
                Some(Detection::new(
                    Some(Category::Image),
                    format!("len{}", header.len()),
                    "test/len",
                ))
            }

            fn matches_category(&self, category: Category, _header: &[u8]) -> bool {
                category == Category::Image
            }
        }

        let checker = FileChecker::new(LenClassifier);
        let long = BytesSource::new(vec![0u8; 4096]);
        let short = BytesSource::new(vec![0u8; 10]);

        match checker.check_source(&long) {
            Err(Denial::ExtensionNotAuthorized { extension }) => assert_eq!(extension, "len261"),
            other => panic!("unexpected outcome: {other:?}"),
        }
        match checker.check_source(&short) {
            Err(Denial::ExtensionNotAuthorized { extension }) => assert_eq!(extension, "len10"),
            other => panic!("unexpected outcome: {other:?}"),
        }

        let config = FileCheckerConfig {
            header_window: 16,
            ..Default::default()
        };
        let checker = FileChecker::with_config(LenClassifier, config).unwrap();
        assert_eq!(checker.header_window(), 16);
        match checker.check_source(&long) {
            Err(Denial::ExtensionNotAuthorized { extension }) => assert_eq!(extension, "len16"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_with_config_applies_authorize_then_deauthorize() {
        let config = FileCheckerConfig {
            authorize: vec!["gif".to_string(), "mp4".to_string()],
            deauthorize: vec!["mp4".to_string(), "pdf".to_string()],
            ..Default::default()
        };
        let checker = FileChecker::with_config(ScriptedClassifier::unrecognized(), config).unwrap();

        let policy = checker.policy();
        assert!(policy.is_extension_authorized("gif"));
        assert!(!policy.is_extension_authorized("mp4"));
        assert!(!policy.is_extension_authorized("pdf"));
        assert!(!policy.is_category_authorized(Category::Video));
        assert!(!policy.is_category_authorized(Category::Archive));
        assert!(policy.is_category_authorized(Category::Image));
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = FileCheckerConfig {
            header_window: 0,
            ..Default::default()
        };
        assert!(matches!(
            FileChecker::with_config(ScriptedClassifier::unrecognized(), config),
            Err(Error::InvalidConfig(_))
        ));

        let config = FileCheckerConfig {
            header_window: usize::MAX,
            ..Default::default()
        };
        assert!(matches!(
            FileChecker::with_config(ScriptedClassifier::unrecognized(), config),
            Err(Error::InvalidConfig(_))
        ));
    }
}
