// file: src/parser/normalizer.rs
// description: whitespace normalization for text recovered from markup
// reference: html text extraction

pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Trims every line, drops blank lines, splits phrases separated by runs
    /// of spaces and rejoins everything with single spaces.
    pub fn normalize(&self, content: &str) -> String {
        content
            .lines()
            .map(str::trim)
            .flat_map(|line| line.split("  "))
            .map(str::trim)
            .filter(|chunk| !chunk.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn collapse_whitespace(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lines() {
        let normalizer = TextNormalizer::new();
        let content = "  Title  \n\n\n   body   text  \nend";
        assert_eq!(normalizer.normalize(content), "Title body text end");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(TextNormalizer::collapse_whitespace("a \t b\n\nc"), "a b c");
        assert_eq!(TextNormalizer::collapse_whitespace("   "), "");
    }
}
