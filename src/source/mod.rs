// file: src/source/mod.rs
// description: content acquisition module exports
// reference: internal module structure

pub mod fetcher;

pub use fetcher::SourceFetcher;
