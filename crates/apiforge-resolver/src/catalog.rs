// crates/apiforge-resolver/src/catalog.rs
// ============================================================================
// Module: Entity Catalogs
// Description: Entity identifier → short type name lookups.
// Purpose: Feed naming defaults without depending on a persistence layer.
// Dependencies: Standard library.
// ============================================================================

//! ## Overview
//! [`ClassPathCatalog`] derives the short name from the identifier itself
//! (`App\Entity\Book`, `app::entity::Book`, `app.entity.Book`).
//! [`StaticCatalog`] only knows explicitly registered entities, so an
//! unregistered identifier is reported as unresolvable.

use std::collections::BTreeMap;

use crate::interfaces::EntityCatalog;

// ============================================================================
// SECTION: Class Path Catalog
// ============================================================================

/// Catalog that reads the last path segment of the identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassPathCatalog;

impl EntityCatalog for ClassPathCatalog {
    fn short_name(&self, entity: &str) -> Option<String> {
        let short = entity.rsplit(['\\', ':', '.', '/']).next()?.trim();
        is_identifier(short).then(|| short.to_string())
    }
}

// ============================================================================
// SECTION: Static Catalog
// ============================================================================

/// Catalog backed by an explicit registry of known entities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticCatalog {
    /// Entity identifier → short name.
    entities: BTreeMap<String, String>,
}

impl StaticCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
        }
    }

    /// Registers an entity with an explicit short name.
    #[must_use]
    pub fn with(mut self, entity: impl Into<String>, short_name: impl Into<String>) -> Self {
        self.entities.insert(entity.into(), short_name.into());
        self
    }

    /// Registers an entity whose short name follows its class path.
    #[must_use]
    pub fn with_entity(self, entity: &str) -> Self {
        match ClassPathCatalog.short_name(entity) {
            Some(short) => self.with(entity, short),
            None => self,
        }
    }
}

impl EntityCatalog for StaticCatalog {
    fn short_name(&self, entity: &str) -> Option<String> {
        self.entities.get(entity).cloned()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns true for a non-empty identifier starting with a letter or `_`.
fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    chars.next().is_some_and(|first| first.is_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_alphanumeric() || ch == '_')
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_paths_resolve_to_last_segment() {
        let catalog = ClassPathCatalog;
        assert_eq!(catalog.short_name("App\\Entity\\Book").as_deref(), Some("Book"));
        assert_eq!(catalog.short_name("app::entity::Author").as_deref(), Some("Author"));
        assert_eq!(catalog.short_name("Category").as_deref(), Some("Category"));
    }

    #[test]
    fn invalid_identifiers_are_unresolvable() {
        let catalog = ClassPathCatalog;
        assert_eq!(catalog.short_name("App\\Entity\\"), None);
        assert_eq!(catalog.short_name("App\\Entity\\9Lives"), None);
        assert_eq!(catalog.short_name("App\\Entity\\Bad Name"), None);
    }

    #[test]
    fn static_catalog_only_knows_registered_entities() {
        let catalog = StaticCatalog::new().with_entity("App\\Entity\\Book").with("legacy", "Tome");
        assert_eq!(catalog.short_name("App\\Entity\\Book").as_deref(), Some("Book"));
        assert_eq!(catalog.short_name("legacy").as_deref(), Some("Tome"));
        assert_eq!(catalog.short_name("App\\Entity\\Author"), None);
    }
}
