use serde::Serialize;
use std::collections::BTreeMap;

/// Category used when a message is added without one.
pub const DEFAULT_CATEGORY: &str = "default";

/// A category-sorted collection of error messages.
///
/// Messages are kept in insertion order inside a category. Adding a message
/// that is already present in the same category is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorManager {
    sections: BTreeMap<String, Vec<String>>,
}

impl Default for ErrorManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorManager {
    pub fn new() -> Self {
        let mut manager = Self {
            sections: BTreeMap::new(),
        };
        manager.reset();
        manager
    }

    /// Adds a message to the default category.
    pub fn add(&mut self, message: impl Into<String>) -> bool {
        self.add_to(DEFAULT_CATEGORY, message)
    }

    /// Adds a message to `category`, creating the category when missing.
    ///
    /// Returns `false` when the category already holds that exact message.
    pub fn add_to(&mut self, category: &str, message: impl Into<String>) -> bool {
        let message = message.into();
        let section = self.sections.entry(category.to_string()).or_default();
        if section.contains(&message) {
            return false;
        }
        tracing::trace!(category, %message, "Error recorded.");
        section.push(message);
        true
    }

    pub fn add_section(&mut self, category: &str) {
        self.sections.entry(category.to_string()).or_default();
    }

    /// Total number of messages across all categories.
    pub fn count(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Every message, category by category, in insertion order within each.
    pub fn all(&self) -> Vec<&str> {
        self.sections
            .values()
            .flat_map(|messages| messages.iter().map(String::as_str))
            .collect()
    }

    /// Non-empty categories with their messages.
    pub fn by_category(&self) -> BTreeMap<&str, &[String]> {
        self.sections
            .iter()
            .filter(|(_, messages)| !messages.is_empty())
            .map(|(category, messages)| (category.as_str(), messages.as_slice()))
            .collect()
    }

    /// Messages of a single category.
    pub fn category(&self, category: &str) -> &[String] {
        self.sections.get(category).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.sections.contains_key(category)
    }

    /// Drops every message and category, leaving an empty default category.
    pub fn reset(&mut self) {
        self.sections.clear();
        self.sections.insert(DEFAULT_CATEGORY.to_string(), Vec::new());
    }

    /// Re-adds every message of `other` into `self`, category by category.
    ///
    /// Empty categories of `other` are not carried over.
    pub fn merge(&mut self, other: &ErrorManager) {
        for (category, messages) in other.by_category() {
            for message in messages {
                self.add_to(category, message.as_str());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_dropped_per_category() {
        let mut errors = ErrorManager::new();
        assert!(errors.add_to("cat", "x"));
        assert!(!errors.add_to("cat", "x"));
        assert_eq!(errors.count(), 1);

        assert!(errors.add_to("cat", "y"));
        assert_eq!(errors.count(), 2);

        // The same text in another category is a different message.
        assert!(errors.add("x"));
        assert_eq!(errors.count(), 3);
    }

    #[test]
    fn reset_leaves_only_empty_default() {
        let mut errors = ErrorManager::new();
        errors.add_to("cat", "x");
        errors.add_to("cat", "y");
        errors.reset();

        assert_eq!(errors.count(), 0);
        assert!(errors.by_category().is_empty());
        assert!(errors.has_category(DEFAULT_CATEGORY));
        assert!(!errors.has_category("cat"));
    }

    #[test]
    fn all_flattens_in_category_order() {
        let mut errors = ErrorManager::new();
        errors.add_to("zeta", "late");
        errors.add("first");
        errors.add_to("alpha", "one");
        errors.add_to("alpha", "two");

        assert_eq!(errors.all(), vec!["one", "two", "first", "late"]);
    }

    #[test]
    fn by_category_skips_empty_sections() {
        let mut errors = ErrorManager::new();
        errors.add_section("empty");
        errors.add_section("empty");
        errors.add_to("filled", "x");

        let grouped = errors.by_category();
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped["filled"], ["x".to_string()]);
        assert!(errors.has_category("empty"));
        assert!(errors.category("missing").is_empty());
    }

    #[test]
    fn merge_suppresses_duplicates_and_lazy_sections() {
        let mut left = ErrorManager::new();
        left.add_to("form", "a");

        let mut right = ErrorManager::new();
        right.add_to("form", "a");
        right.add_to("form", "b");
        right.add_section("unused");

        left.merge(&right);
        assert_eq!(left.category("form"), ["a".to_string(), "b".to_string()]);
        assert!(!left.has_category("unused"));
        assert_eq!(left.count(), 2);
    }
}
