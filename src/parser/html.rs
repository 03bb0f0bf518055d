// file: src/parser/html.rs
// description: html document parsing with scraper for link harvesting and text extraction
// reference: https://docs.rs/scraper

use crate::parser::normalizer::TextNormalizer;
use lazy_static::lazy_static;
use scraper::{Html, Node, Selector};

lazy_static! {
    static ref ANCHOR: Selector = Selector::parse("a[href]").expect("anchor selector is valid");
    static ref TITLE: Selector = Selector::parse("title").expect("title selector is valid");
    static ref HEADING: Selector = Selector::parse("h1").expect("heading selector is valid");
}

/// Elements whose text never reaches the reader.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyperlink {
    pub text: String,
    pub href: String,
}

pub struct HtmlDocument {
    document: Html,
}

impl HtmlDocument {
    pub fn parse(content: &str) -> Self {
        Self {
            document: Html::parse_document(content),
        }
    }

    /// Every `<a href>` in document order.
    pub fn extract_hyperlinks(&self) -> Vec<Hyperlink> {
        self.document
            .select(&ANCHOR)
            .filter_map(|anchor| {
                let href = anchor.value().attr("href")?.trim().to_string();
                let text = TextNormalizer::collapse_whitespace(&anchor.text().collect::<String>());
                Some(Hyperlink { text, href })
            })
            .collect()
    }

    /// Visible text with markup, scripts and styles removed.
    pub fn extract_plain_text(&self) -> String {
        let mut text = String::new();

        for node in self.document.tree.root().descendants() {
            let Node::Text(fragment) = node.value() else {
                continue;
            };

            let hidden = node.ancestors().any(|ancestor| {
                matches!(ancestor.value(), Node::Element(element) if HIDDEN_ELEMENTS.contains(&element.name()))
            });

            if !hidden {
                text.push_str(fragment);
                text.push(' ');
            }
        }

        TextNormalizer::new().normalize(&text)
    }

    /// `<title>` text, falling back to the first `<h1>`.
    pub fn title(&self) -> Option<String> {
        [&*TITLE, &*HEADING].into_iter().find_map(|selector| {
            self.document
                .select(selector)
                .map(|element| TextNormalizer::collapse_whitespace(&element.text().collect::<String>()))
                .find(|text| !text.is_empty())
        })
    }
}
