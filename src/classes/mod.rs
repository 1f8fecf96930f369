//! Player classes: categories, definitions, catalog and conflict rules

pub mod catalog;
pub mod category;
pub mod conflict;
pub mod definition;

pub use catalog::ClassCatalog;
pub use category::Category;
pub use conflict::{ConflictKind, ConflictRegistry};
pub use definition::ClassDefinition;
