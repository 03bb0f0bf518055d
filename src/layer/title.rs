// file: src/layer/title.rs
// description: layer title resolution from explicit overrides or source content

use crate::models::Source;
use crate::parser::HtmlDocument;
use tracing::debug;

pub const DIRECT_TEXT_TITLE: &str = "Direct Text Input";

/// Never fails: an explicit title wins, URL sources try the document title,
/// everything else falls back to a label derived from the source.
pub fn resolve_title(content: &str, source: &Source, explicit_title: Option<&str>) -> String {
    if let Some(title) = explicit_title {
        return title.to_string();
    }

    match source {
        Source::Url(url) => match HtmlDocument::parse(content).title() {
            Some(title) => title,
            None => {
                debug!("No title element in {}, using the URL", url);
                url.clone()
            }
        },
        Source::File(path) => path.display().to_string(),
        Source::Text(_) => DIRECT_TEXT_TITLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_explicit_title_is_verbatim() {
        let source = Source::Url("https://example.org".into());
        let html = "<html><head><title>Ignored</title></head></html>";
        assert_eq!(resolve_title(html, &source, Some("  My Layer ")), "  My Layer ");
    }

    #[test]
    fn test_url_uses_document_title() {
        let source = Source::Url("https://example.org/apt".into());
        let html = "<html><head><title>APT41 Returns</title></head><body></body></html>";
        assert_eq!(resolve_title(html, &source, None), "APT41 Returns");
    }

    #[test]
    fn test_url_falls_back_to_url() {
        let source = Source::Url("https://example.org/feed.txt".into());
        assert_eq!(resolve_title("T1566 plain", &source, None), "https://example.org/feed.txt");
    }

    #[test]
    fn test_file_and_text_labels() {
        let file = Source::File(PathBuf::from("reports/q3.txt"));
        assert_eq!(resolve_title("<title>x</title>", &file, None), "reports/q3.txt");

        let text = Source::Text("T1566".into());
        assert_eq!(resolve_title("T1566", &text, None), "Direct Text Input");
    }
}
