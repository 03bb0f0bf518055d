// file: src/extractor/identifiers.rs
// description: ATT&CK technique and tactic identifier extraction with taxonomy validation
// reference: https://attack.mitre.org/resources/

use crate::extractor::mode::ParseMode;
use crate::extractor::patterns::{
    TACTIC_ID, TACTIC_PATH, TACTIC_TOKEN, TECHNIQUE_ID, TECHNIQUE_PATH, TECHNIQUE_TOKEN,
};
use crate::models::{AttackId, ExtractedId, Taxonomy, TaxonomyEntry};
use crate::parser::{HtmlDocument, Hyperlink};
use std::collections::HashSet;
use tracing::{debug, warn};

/// A candidate confirmed present in the taxonomy.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedId {
    pub candidate: ExtractedId,
    pub entry: TaxonomyEntry,
}

impl ValidatedId {
    pub fn id(&self) -> &str {
        &self.entry.id
    }

    pub fn name(&self) -> &str {
        &self.entry.name
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    pub mode: ParseMode,
    pub techniques: Vec<ValidatedId>,
    pub tactics: Vec<ValidatedId>,
    /// Pattern matches before validation, duplicates included.
    pub candidates_seen: usize,
    /// Html mode found no hyperlink candidates and scanned plain text only.
    pub fallback_engaged: bool,
}

impl ExtractionResult {
    fn new(mode: ParseMode) -> Self {
        Self {
            mode,
            techniques: Vec::new(),
            tactics: Vec::new(),
            candidates_seen: 0,
            fallback_engaged: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.techniques.is_empty() && self.tactics.is_empty()
    }

    pub fn technique_ids(&self) -> Vec<&str> {
        self.techniques.iter().map(ValidatedId::id).collect()
    }

    pub fn tactic_ids(&self) -> Vec<&str> {
        self.tactics.iter().map(ValidatedId::id).collect()
    }
}

pub struct IdentifierExtractor<'a> {
    taxonomy: &'a Taxonomy,
    seen_ids: HashSet<String>,
}

impl<'a> IdentifierExtractor<'a> {
    pub fn new(taxonomy: &'a Taxonomy) -> Self {
        Self {
            taxonomy,
            seen_ids: HashSet::new(),
        }
    }

    pub fn extract(&mut self, content: &str, mode: ParseMode) -> ExtractionResult {
        self.reset();
        let mut result = ExtractionResult::new(mode);

        match mode {
            ParseMode::Text => {
                let candidates = scan_text(content);
                self.accept_all(candidates, &mut result);
            }
            ParseMode::Html => self.extract_html(content, &mut result),
        }

        debug!(
            "{} mode: {} candidates, {} techniques, {} tactics",
            mode,
            result.candidates_seen,
            result.techniques.len(),
            result.tactics.len()
        );

        result
    }

    fn extract_html(&mut self, content: &str, result: &mut ExtractionResult) {
        let document = HtmlDocument::parse(content);
        let links = document.extract_hyperlinks();
        let link_candidates: Vec<ExtractedId> = links.iter().flat_map(scan_hyperlink).collect();
        let plain_text = document.extract_plain_text();

        if link_candidates.is_empty() {
            debug!(
                "No identifiers in {} hyperlinks, falling back to plain text scanning",
                links.len()
            );
            result.fallback_engaged = true;
        } else {
            debug!(
                "{} identifier candidates from {} hyperlinks",
                link_candidates.len(),
                links.len()
            );
            self.accept_all(link_candidates, result);
        }

        self.accept_all(scan_text(&plain_text), result);
    }

    fn accept_all(&mut self, candidates: Vec<ExtractedId>, result: &mut ExtractionResult) {
        result.candidates_seen += candidates.len();
        for candidate in candidates {
            self.accept(candidate, result);
        }
    }

    fn accept(&mut self, candidate: ExtractedId, result: &mut ExtractionResult) {
        let Some(entry) = self.taxonomy.lookup(&candidate.id) else {
            return;
        };

        if !self.seen_ids.insert(entry.id.clone()) {
            return;
        }

        if entry.is_retired() {
            warn!(
                "{} ({}) is revoked or deprecated in ATT&CK v{}",
                entry.id,
                entry.name,
                self.taxonomy.version()
            );
        }

        let is_tactic = matches!(candidate.id, AttackId::Tactic(_));
        let validated = ValidatedId {
            entry: entry.clone(),
            candidate,
        };

        if is_tactic {
            result.tactics.push(validated);
        } else {
            result.techniques.push(validated);
        }
    }

    pub fn reset(&mut self) {
        self.seen_ids.clear();
    }
}

/// Extracts and validates identifiers from `content` in one call.
pub fn extract(content: &str, mode: ParseMode, taxonomy: &Taxonomy) -> ExtractionResult {
    IdentifierExtractor::new(taxonomy).extract(content, mode)
}

/// Technique matches in order of position, then tactic matches. Spans index
/// into `text`.
fn scan_text(text: &str) -> Vec<ExtractedId> {
    TECHNIQUE_ID
        .find_iter(text)
        .chain(TACTIC_ID.find_iter(text))
        .map(|m| ExtractedId::new(m.as_str(), m.range()))
        .collect()
}

/// Like [`scan_text`], but an ID must stand alone as a URL token.
fn scan_url_tokens(href: &str) -> Vec<ExtractedId> {
    TECHNIQUE_TOKEN
        .find_iter(href)
        .chain(TACTIC_TOKEN.find_iter(href))
        .map(|m| ExtractedId::new(m.as_str(), m.range()))
        .collect()
}

/// ATT&CK reference paths in the href win over a token scan of the href, so
/// `/techniques/T1566/001/` yields only `T1566.001`. Href spans index into
/// `link.href`, link text spans into `link.text`.
fn scan_hyperlink(link: &Hyperlink) -> Vec<ExtractedId> {
    let mut candidates: Vec<ExtractedId> = TECHNIQUE_PATH
        .captures_iter(&link.href)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let id = match caps.get(2) {
                Some(sub) => format!("{}.{}", &caps[1], sub.as_str()),
                None => caps[1].to_string(),
            };
            Some(ExtractedId::new(&id, whole.range()))
        })
        .chain(TACTIC_PATH.captures_iter(&link.href).filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(ExtractedId::new(&caps[1], whole.range()))
        }))
        .collect();

    if candidates.is_empty() {
        candidates = scan_url_tokens(&link.href);
    }

    candidates.extend(scan_text(&link.text));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::stix::tests::sample_taxonomy;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_mode_extracts_and_validates() {
        let taxonomy = sample_taxonomy();
        let result = extract("Actor used T1566.001 and TA0001 in campaign", ParseMode::Text, &taxonomy);

        assert_eq!(result.technique_ids(), vec!["T1566.001"]);
        assert_eq!(result.tactic_ids(), vec!["TA0001"]);
        assert!(!result.fallback_engaged);
    }

    #[test]
    fn test_deduplicates_regardless_of_case() {
        let taxonomy = sample_taxonomy();
        let text = "t1059.001 then T1059.001, again T1059.001 and T1566 plus t1566";
        let result = extract(text, ParseMode::Text, &taxonomy);

        assert_eq!(result.technique_ids(), vec!["T1059.001", "T1566"]);
        assert_eq!(result.candidates_seen, 5);
    }

    #[test]
    fn test_first_occurrence_orders_results() {
        let taxonomy = sample_taxonomy();
        let result = extract("T1078 T1566 T1078 T1059.001", ParseMode::Text, &taxonomy);
        assert_eq!(result.technique_ids(), vec!["T1078", "T1566", "T1059.001"]);
    }

    #[test]
    fn test_unknown_ids_are_dropped() {
        let taxonomy = sample_taxonomy();
        let result = extract("T9999 and TA0099 and T1566.999", ParseMode::Text, &taxonomy);

        assert!(result.is_empty());
        assert_eq!(result.candidates_seen, 3);
    }

    #[test]
    fn test_no_ids() {
        let taxonomy = sample_taxonomy();
        let result = extract("no attack codes here", ParseMode::Text, &taxonomy);
        assert!(result.is_empty());
        assert_eq!(result.candidates_seen, 0);
    }

    #[test]
    fn test_html_mode_uses_reference_links() {
        let taxonomy = sample_taxonomy();
        let html = r#"<html><body>
            <p>Initial access via <a href="https://attack.mitre.org/techniques/T1566/001/">spearphishing</a>
            in the <a href="https://attack.mitre.org/tactics/TA0001/">initial access</a> phase.</p>
            <p>Execution relied on T1059.001.</p>
        </body></html>"#;

        let result = extract(html, ParseMode::Html, &taxonomy);

        assert_eq!(result.technique_ids(), vec!["T1566.001", "T1059.001"]);
        assert_eq!(result.tactic_ids(), vec!["TA0001"]);
        assert!(!result.fallback_engaged);
    }

    #[test]
    fn test_html_mode_reads_anchor_text() {
        let taxonomy = sample_taxonomy();
        let html = r#"<html><body><a href="/blog/post">Valid Accounts (T1078)</a></body></html>"#;
        let result = extract(html, ParseMode::Html, &taxonomy);

        assert_eq!(result.technique_ids(), vec!["T1078"]);
        assert!(!result.fallback_engaged);
    }

    #[test]
    fn test_html_without_links_falls_back_to_text() {
        let taxonomy = sample_taxonomy();
        let html = "<html><body><p>Observed T1566 and T1059.001</p><a href=\"/about\">About</a></body></html>";
        let result = extract(html, ParseMode::Html, &taxonomy);

        assert!(result.fallback_engaged);
        assert_eq!(result.technique_ids(), vec!["T1566", "T1059.001"]);
    }

    #[test]
    fn test_html_mode_ignores_script_content() {
        let taxonomy = sample_taxonomy();
        let html = "<html><head><script>track('T1078')</script></head><body>T1566</body></html>";
        let result = extract(html, ParseMode::Html, &taxonomy);

        assert_eq!(result.technique_ids(), vec!["T1566"]);
    }

    #[test]
    fn test_extractor_is_reusable() {
        let taxonomy = sample_taxonomy();
        let mut extractor = IdentifierExtractor::new(&taxonomy);

        let first = extractor.extract("T1566", ParseMode::Text);
        let second = extractor.extract("T1566", ParseMode::Text);
        assert_eq!(first.technique_ids(), second.technique_ids());
    }

    #[test]
    fn test_scan_hyperlink_prefers_reference_path() {
        let link = Hyperlink {
            text: "link".to_string(),
            href: "https://attack.mitre.org/techniques/T1566/001/".to_string(),
        };
        let ids: Vec<String> = scan_hyperlink(&link)
            .into_iter()
            .filter_map(|c| c.id.as_str().map(str::to_string))
            .collect();
        assert_eq!(ids, vec!["T1566.001"]);
    }

    #[test]
    fn test_dotted_reference_path_keeps_sub_technique() {
        let taxonomy = sample_taxonomy();
        let html = r#"<p>See <a href="https://attack.mitre.org/techniques/T1566.001">this technique</a></p>"#;
        let result = extract(html, ParseMode::Html, &taxonomy);

        assert_eq!(result.technique_ids(), vec!["T1566.001"]);
    }

    #[test]
    fn test_overlong_reference_path_is_not_truncated() {
        let taxonomy = sample_taxonomy();
        let html = r#"<p>See <a href="https://attack.mitre.org/techniques/T15661/">this technique</a></p>"#;
        let result = extract(html, ParseMode::Html, &taxonomy);

        assert!(result.technique_ids().is_empty());
    }

    #[test]
    fn test_href_token_scan_requires_whole_id() {
        let link = Hyperlink {
            text: "write-up".to_string(),
            href: "https://example.com/reports/T15661-and-t1078".to_string(),
        };
        let ids: Vec<String> = scan_hyperlink(&link)
            .into_iter()
            .filter_map(|c| c.id.as_str().map(str::to_string))
            .collect();
        assert_eq!(ids, vec!["T1078"]);
    }

    #[test]
    fn test_link_text_spans_index_into_text() {
        let link = Hyperlink {
            text: "Phishing (T1566)".to_string(),
            href: "https://example.com/blog/post".to_string(),
        };
        let candidates = scan_hyperlink(&link);

        assert_eq!(candidates.len(), 1);
        assert_eq!(&link.text[candidates[0].span.clone()], "T1566");
    }
}
