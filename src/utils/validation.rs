// file: src/utils/validation.rs
// description: input validation run before any network activity
// reference: input validation patterns

use crate::error::{Result, TtpError};
use std::fs;
use std::path::Path;

pub const MIN_SCORE: i64 = 0;
pub const MAX_SCORE: i64 = 100;

pub struct Validator;

impl Validator {
    pub fn validate_score(score: i64) -> Result<u8> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(TtpError::Validation(format!(
                "Score must be between {} and {}, got {}",
                MIN_SCORE, MAX_SCORE, score
            )));
        }
        u8::try_from(score).map_err(|e| TtpError::Validation(e.to_string()))
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(TtpError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_file_path(path: &Path) -> Result<()> {
        let canonical = fs::canonicalize(path).map_err(|e| {
            TtpError::Validation(format!(
                "Cannot canonicalize path {}: {}",
                path.display(),
                e
            ))
        })?;

        if !canonical.is_file() {
            return Err(TtpError::Validation(format!(
                "Path is not a file: {}",
                canonical.display()
            )));
        }

        Ok(())
    }

    /// Accepts `17`, `v17`, `16.1`.
    pub fn validate_attack_version(version: &str) -> Result<()> {
        let trimmed = version.trim().trim_start_matches(['v', 'V']);
        let well_formed = !trimmed.is_empty()
            && trimmed
                .split('.')
                .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));

        if !well_formed {
            return Err(TtpError::Validation(format!(
                "Invalid ATT&CK version: {:?}",
                version
            )));
        }
        Ok(())
    }

    pub fn validate_output_path(path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(TtpError::Validation("Output path is empty".to_string()));
        }

        if path.is_dir() {
            return Err(TtpError::Validation(format!(
                "Output path is a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((end, _)) => format!("{}...", &text[..end]),
            None => text.to_string(),
        }
    }
}
