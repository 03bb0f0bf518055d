// file: src/extractor/mode.rs
// description: chooses between hyperlink-aware html parsing and plain regex scanning
// reference: content sniffing heuristics

use crate::error::{Result, TtpError};
use crate::extractor::patterns::{BODY_MARKER, HTML_MARKER, RECOGNIZED_TAG};
use crate::models::SourceKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recognized tags needed to call a body markup without html/body markers.
pub const TAG_DENSITY_THRESHOLD: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    Html,
    Text,
}

impl ParseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::Html => "html",
            ParseMode::Text => "text",
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of a body as far as markup detection cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentSignature {
    pub has_html_marker: bool,
    pub has_body_marker: bool,
    pub tag_count: usize,
}

impl ContentSignature {
    pub fn of(content: &str) -> Self {
        Self {
            has_html_marker: HTML_MARKER.is_match(content),
            has_body_marker: BODY_MARKER.is_match(content),
            tag_count: RECOGNIZED_TAG.find_iter(content).count(),
        }
    }

    pub fn looks_like_markup(&self) -> bool {
        self.has_html_marker || self.has_body_marker || self.tag_count >= TAG_DENSITY_THRESHOLD
    }
}

pub struct ModeSelector;

impl ModeSelector {
    pub fn check_overrides(force_html: bool, force_text: bool) -> Result<()> {
        if force_html && force_text {
            return Err(TtpError::Configuration(
                "--force-html-mode and --force-text-mode are mutually exclusive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn select(
        content: &str,
        source_kind: SourceKind,
        force_html: bool,
        force_text: bool,
    ) -> Result<ParseMode> {
        Self::check_overrides(force_html, force_text)?;

        if force_html {
            return Ok(ParseMode::Html);
        }
        if force_text {
            return Ok(ParseMode::Text);
        }

        Ok(Self::detect(&ContentSignature::of(content), source_kind))
    }

    /// Only fetched web documents are sniffed; files and literal text are text.
    pub fn detect(signature: &ContentSignature, source_kind: SourceKind) -> ParseMode {
        match source_kind {
            SourceKind::Url if signature.looks_like_markup() => ParseMode::Html,
            _ => ParseMode::Text,
        }
    }
}
