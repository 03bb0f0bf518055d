// file: src/extractor/mod.rs
// description: identifier extraction module exports
// reference: internal module structure

pub mod identifiers;
pub mod mode;
pub mod patterns;

pub use identifiers::{ExtractionResult, IdentifierExtractor, ValidatedId, extract};
pub use mode::{ContentSignature, ModeSelector, ParseMode};
