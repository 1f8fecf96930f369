//! Catalog content: built-in data, extension packs, aggregate surface

pub mod builtin;
pub mod catalogs;
pub mod loader;

pub use catalogs::Catalogs;
pub use loader::PackSummary;
