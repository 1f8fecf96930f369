//! Immutable class definitions

use crate::classes::category::Category;
use crate::core::types::ClassId;
use serde::{Deserialize, Serialize};

/// Immutable description of a player class
///
/// Definitions are registration-time data. The serde shape doubles as the
/// `[[classes]]` record in extension pack TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub id: ClassId,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
}

impl ClassDefinition {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            id: ClassId::new(id),
            display_name: display_name.into(),
            description: String::new(),
            category,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let def = ClassDefinition::new("werewolf", "Werewolf", Category::Transformation)
            .with_description("Transforms under the full moon");
        assert_eq!(def.id.as_str(), "werewolf");
        assert_eq!(def.category, Category::Transformation);
        assert_eq!(def.description, "Transforms under the full moon");
    }

    #[test]
    fn test_toml_record_shape() {
        let toml_str = r#"
id = "auror"
display_name = "Auror"
category = "role"
"#;
        let def: ClassDefinition = toml::from_str(toml_str).unwrap();
        assert_eq!(def.id, ClassId::from("auror"));
        assert_eq!(def.category, Category::Role);
        assert!(def.description.is_empty());
    }
}
