// file: src/exporter/mod.rs
// description: layer export module exports
// reference: internal module structure

pub mod json;

pub use json::LayerWriter;
