// file: src/layer/mod.rs
// description: navigator layer assembly module exports
// reference: internal module structure

pub mod builder;
pub mod title;

pub use builder::LayerBuilder;
pub use title::resolve_title;
