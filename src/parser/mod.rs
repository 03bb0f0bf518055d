// file: src/parser/mod.rs
// description: report parsing module exports
// reference: internal module structure

pub mod html;
pub mod normalizer;

pub use html::{HtmlDocument, Hyperlink};
pub use normalizer::TextNormalizer;
