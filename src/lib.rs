// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod layer;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod source;
pub mod taxonomy;
pub mod utils;

pub use config::{Config, FetchConfig, LayerConfig, TaxonomyConfig};
pub use error::{Result, TtpError};
pub use exporter::LayerWriter;
pub use extractor::{
    ContentSignature, ExtractionResult, IdentifierExtractor, ModeSelector, ParseMode, ValidatedId,
};
pub use layer::{LayerBuilder, resolve_title};
pub use models::{
    AcquiredContent, AttackId, EntryKind, ExtractedId, LayerEntry, NavigatorLayer, Source,
    SourceKind, Taxonomy, TaxonomyEntry,
};
pub use parser::{HtmlDocument, Hyperlink, TextNormalizer};
pub use pipeline::{FetchSpinner, LayerPipeline, LayerRequest, PipelineReport};
pub use source::SourceFetcher;
pub use taxonomy::TaxonomyLoader;
pub use utils::Validator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        let _builder = LayerBuilder::new(&config.layer);
        let _taxonomy = Taxonomy::new(config.taxonomy.attack_version.as_str());
    }
}
