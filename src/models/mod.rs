// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod attack_id;
pub mod layer;
pub mod source;
pub mod taxonomy;

pub use attack_id::{AttackId, ExtractedId};
pub use layer::{
    Gradient, LayerEntry, LayerFilters, LayerLayout, LayerLink, LayerVersions, LegendItem,
    MetadataItem, NavigatorLayer,
};
pub use source::{AcquiredContent, Source, SourceKind, DIRECT_TEXT_REFERENCE};
pub use taxonomy::{EntryKind, Taxonomy, TaxonomyEntry};
