//! Class category rules

use serde::{Deserialize, Serialize};

/// Broad grouping a class belongs to
///
/// Categories carry two rules: whether they are singleton (at most one
/// held class from the category at a time) and where they sit in the
/// primary-class precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Base,
    Transformation,
    Role,
    Organization,
    BloodStatus,
    Alignment,
}

impl Category {
    /// Returns true if this category allows at most one held class
    pub fn is_singleton(&self) -> bool {
        matches!(self, Category::Organization | Category::BloodStatus)
    }

    /// Fixed precedence used when deriving a primary class from a
    /// multi-class holding. Earlier entries win.
    pub fn priority_order() -> [Category; 6] {
        [
            Category::Base,
            Category::Role,
            Category::Transformation,
            Category::Alignment,
            Category::Organization,
            Category::BloodStatus,
        ]
    }

    /// Parse the snake_case name used by console commands. Pack files
    /// deserialize categories through serde instead.
    pub fn parse(name: &str) -> Option<Category> {
        match name {
            "base" => Some(Category::Base),
            "transformation" => Some(Category::Transformation),
            "role" => Some(Category::Role),
            "organization" => Some(Category::Organization),
            "blood_status" => Some(Category::BloodStatus),
            "alignment" => Some(Category::Alignment),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singleton_flags() {
        assert!(Category::Organization.is_singleton());
        assert!(Category::BloodStatus.is_singleton());
        assert!(!Category::Base.is_singleton());
        assert!(!Category::Transformation.is_singleton());
        assert!(!Category::Role.is_singleton());
        assert!(!Category::Alignment.is_singleton());
    }

    #[test]
    fn test_priority_order_covers_every_category() {
        let order = Category::priority_order();
        assert_eq!(order.len(), 6);
        assert_eq!(order[0], Category::Base);
        assert_eq!(order[1], Category::Role);
        assert_eq!(order[5], Category::BloodStatus);
    }

    #[test]
    fn test_parse_round_trip() {
        for category in Category::priority_order() {
            let name = match category {
                Category::Base => "base",
                Category::Transformation => "transformation",
                Category::Role => "role",
                Category::Organization => "organization",
                Category::BloodStatus => "blood_status",
                Category::Alignment => "alignment",
            };
            assert_eq!(Category::parse(name), Some(category));
        }
        assert_eq!(Category::parse("house"), None);
    }
}
