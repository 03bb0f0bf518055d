// file: src/models/source.rs
// description: input source selection and acquired report content
// reference: internal data structures

use std::fmt;
use std::path::PathBuf;

pub const DIRECT_TEXT_REFERENCE: &str = "direct text";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Url,
    File,
    Text,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Url => "url",
            SourceKind::File => "file",
            SourceKind::Text => "text",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
    Text(String),
}

impl Source {
    /// Builds a source from the three mutually exclusive CLI inputs.
    pub fn from_inputs(
        url: Option<String>,
        file: Option<PathBuf>,
        text: Option<String>,
    ) -> crate::Result<Self> {
        match (url, file, text) {
            (Some(url), None, None) => Ok(Source::Url(url)),
            (None, Some(path), None) => Ok(Source::File(path)),
            (None, None, Some(text)) => Ok(Source::Text(text)),
            (None, None, None) => Err(crate::TtpError::Configuration(
                "one of --url, --file or --text is required".to_string(),
            )),
            _ => Err(crate::TtpError::Configuration(
                "--url, --file and --text are mutually exclusive".to_string(),
            )),
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            Source::Url(_) => SourceKind::Url,
            Source::File(_) => SourceKind::File,
            Source::Text(_) => SourceKind::Text,
        }
    }

    /// Origin recorded in the layer for traceability.
    pub fn reference(&self) -> String {
        match self {
            Source::Url(url) => url.clone(),
            Source::File(path) => path.display().to_string(),
            Source::Text(_) => DIRECT_TEXT_REFERENCE.to_string(),
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Source::Url(url) => Some(url),
            _ => None,
        }
    }
}

/// Report body after acquisition, paired with where it came from.
#[derive(Debug, Clone)]
pub struct AcquiredContent {
    pub source: Source,
    pub body: String,
}

impl AcquiredContent {
    pub fn new(source: Source, body: String) -> Self {
        Self { source, body }
    }

    pub fn kind(&self) -> SourceKind {
        self.source.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_references() {
        assert_eq!(
            Source::Url("https://example.org/report".into()).reference(),
            "https://example.org/report"
        );
        assert_eq!(Source::File(PathBuf::from("reports/apt.txt")).reference(), "reports/apt.txt");
        assert_eq!(Source::Text("T1566".into()).reference(), "direct text");
    }

    #[test]
    fn test_from_inputs_requires_exactly_one() {
        assert!(matches!(
            Source::from_inputs(None, None, Some("x".into())),
            Ok(Source::Text(_))
        ));
        assert!(matches!(
            Source::from_inputs(None, None, None),
            Err(crate::TtpError::Configuration(_))
        ));
        assert!(matches!(
            Source::from_inputs(Some("https://a".into()), None, Some("x".into())),
            Err(crate::TtpError::Configuration(_))
        ));
    }
}
