// file: src/extractor/patterns.rs
// description: compiled regex patterns for ATT&CK identifier extraction
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Free-text scanning; no word boundaries so "xT1566" still yields T1566
    pub static ref TECHNIQUE_ID: Regex = Regex::new(
        r"(?i)T\d{4}(?:\.\d{3})?"
    ).expect("TECHNIQUE_ID regex is valid");

    pub static ref TACTIC_ID: Regex = Regex::new(
        r"(?i)TA\d{4}"
    ).expect("TACTIC_ID regex is valid");

    // URL tokens are delimited, so IDs must stand alone there
    pub static ref TECHNIQUE_TOKEN: Regex = Regex::new(
        r"(?i)\bT\d{4}(?:\.\d{3})?\b"
    ).expect("TECHNIQUE_TOKEN regex is valid");

    pub static ref TACTIC_TOKEN: Regex = Regex::new(
        r"(?i)\bTA\d{4}\b"
    ).expect("TACTIC_TOKEN regex is valid");

    // Whole-string classification of a single candidate
    pub static ref TECHNIQUE_EXACT: Regex = Regex::new(
        r"^T\d{4}(?:\.\d{3})?$"
    ).expect("TECHNIQUE_EXACT regex is valid");

    pub static ref TACTIC_EXACT: Regex = Regex::new(
        r"^TA\d{4}$"
    ).expect("TACTIC_EXACT regex is valid");

    // attack.mitre.org reference paths, e.g. /techniques/T1566/001/ or
    // /techniques/T1566.001; the ID must end at a path delimiter
    pub static ref TECHNIQUE_PATH: Regex = Regex::new(
        r"(?i)/techniques/(T\d{4})(?:[./](\d{3}))?(?:[/?#]|$)"
    ).expect("TECHNIQUE_PATH regex is valid");

    pub static ref TACTIC_PATH: Regex = Regex::new(
        r"(?i)/tactics/(TA\d{4})(?:[/?#]|$)"
    ).expect("TACTIC_PATH regex is valid");

    // Markup shape detection
    pub static ref HTML_MARKER: Regex = Regex::new(
        r"(?i)<html[\s>]"
    ).expect("HTML_MARKER regex is valid");

    pub static ref BODY_MARKER: Regex = Regex::new(
        r"(?i)<body[\s>]"
    ).expect("BODY_MARKER regex is valid");

    pub static ref RECOGNIZED_TAG: Regex = Regex::new(
        r"(?i)<(?:a|p|div|span|h[1-6]|head|title|meta|link|script|style|table|tr|td|ul|ol|li|br|img|article|section|nav|footer|header)[\s/>]"
    ).expect("RECOGNIZED_TAG regex is valid");
}

pub fn is_technique_id(candidate: &str) -> bool {
    TECHNIQUE_EXACT.is_match(candidate)
}

pub fn is_tactic_id(candidate: &str) -> bool {
    TACTIC_EXACT.is_match(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_technique_pattern() {
        assert!(TECHNIQUE_ID.is_match("T1566"));
        assert!(TECHNIQUE_ID.is_match("t1566.001"));
        assert_eq!(TECHNIQUE_ID.find("use T1566.001 now").unwrap().as_str(), "T1566.001");
        assert!(!TECHNIQUE_ID.is_match("TA0001"));
    }

    #[test]
    fn test_tactic_pattern() {
        assert!(TACTIC_ID.is_match("TA0001"));
        assert!(TACTIC_ID.is_match("ta0043"));
        assert!(!TACTIC_ID.is_match("T1566"));
    }

    #[test]
    fn test_token_patterns() {
        assert_eq!(
            TECHNIQUE_TOKEN.find("/blog/t1059.001-powershell").unwrap().as_str(),
            "t1059.001"
        );
        assert!(!TECHNIQUE_TOKEN.is_match("/T15661/"));
        assert!(TACTIC_TOKEN.is_match("?tactic=TA0005"));
        assert!(!TACTIC_TOKEN.is_match("/TA00051"));
    }

    #[test]
    fn test_exact_patterns() {
        assert!(is_technique_id("T1059.001"));
        assert!(!is_technique_id("T1059.01"));
        assert!(!is_technique_id("xT1059"));
        assert!(is_tactic_id("TA0010"));
        assert!(!is_tactic_id("TA00100"));
    }

    #[test]
    fn test_reference_paths() {
        let caps = TECHNIQUE_PATH
            .captures("https://attack.mitre.org/techniques/T1566/001/")
            .unwrap();
        assert_eq!(&caps[1], "T1566");
        assert_eq!(caps.get(2).map(|m| m.as_str()), Some("001"));

        let caps = TECHNIQUE_PATH
            .captures("https://attack.mitre.org/techniques/T1566.001")
            .unwrap();
        assert_eq!(&caps[1], "T1566");
        assert_eq!(caps.get(2).map(|m| m.as_str()), Some("001"));

        let caps = TACTIC_PATH
            .captures("https://attack.mitre.org/tactics/TA0001/")
            .unwrap();
        assert_eq!(&caps[1], "TA0001");
    }

    #[test]
    fn test_reference_paths_require_delimiter() {
        assert!(!TECHNIQUE_PATH.is_match("https://attack.mitre.org/techniques/T15661/"));
        assert!(TECHNIQUE_PATH.is_match("https://attack.mitre.org/techniques/T1566?lang=en"));
        assert!(TECHNIQUE_PATH.is_match("https://attack.mitre.org/techniques/T1566#usage"));
        assert!(!TACTIC_PATH.is_match("https://attack.mitre.org/tactics/TA00012"));
    }

    #[test]
    fn test_markup_markers() {
        assert!(HTML_MARKER.is_match("<!DOCTYPE html><HTML lang=\"en\">"));
        assert!(BODY_MARKER.is_match("<body>"));
        assert!(!BODY_MARKER.is_match("<bodyguard>"));
        assert_eq!(RECOGNIZED_TAG.find_iter("<p>a</p><div class=x><br/>").count(), 3);
    }
}
