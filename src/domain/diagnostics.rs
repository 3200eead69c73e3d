//! Classification of the capture process's diagnostic output

/// How a diagnostic line should be treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// Progress, banners, warnings: only echoed in verbose mode
    Ordinary,
    /// The line signals a failure and is reported as an error
    Failure,
}

/// Decides whether a stderr line from the capture process reports a failure
pub trait DiagnosticClassifier: Send + Sync {
    fn classify(&self, line: &str) -> Diagnostic;
}

/// Phrases FFmpeg uses when something went wrong
const FAILURE_MARKERS: &[&str] = &[
    "error",
    "failed",
    "could not",
    "cannot",
    "invalid argument",
    "no such file",
    "permission denied",
    "unknown encoder",
    "unknown input format",
    "not found",
];

/// Case-insensitive keyword matcher
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    markers: Vec<String>,
}

impl KeywordClassifier {
    /// Classifier with the built-in FFmpeg failure phrases
    pub fn new() -> Self {
        Self::with_markers(FAILURE_MARKERS.iter().copied())
    }

    /// Classifier with a custom marker set
    pub fn with_markers<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            markers: markers
                .into_iter()
                .map(|m| m.as_ref().to_lowercase())
                .collect(),
        }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticClassifier for KeywordClassifier {
    fn classify(&self, line: &str) -> Diagnostic {
        let lower = line.to_lowercase();
        // FFmpeg's build banner lists flags like --enable-error-resilience
        if lower.trim_start().starts_with("configuration:") {
            return Diagnostic::Ordinary;
        }
        if self.markers.iter().any(|m| lower.contains(m.as_str())) {
            Diagnostic::Failure
        } else {
            Diagnostic::Ordinary
        }
    }
}
