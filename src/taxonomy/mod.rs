// file: src/taxonomy/mod.rs
// description: ATT&CK taxonomy loading module exports
// reference: internal module structure

pub mod loader;
pub mod stix;

pub use loader::{TaxonomyLoader, expand_version};
pub use stix::parse_bundle;
