// crates/apiforge-config/src/accessor.rs
// ============================================================================
// Module: Tree Accessor
// Description: Safe navigation over the provider/segment/collection/endpoint tree.
// Purpose: Give resolvers and runtime services one lookup path with no panics.
// Dependencies: crate::model
// ============================================================================

//! ## Overview
//! A [`Scope`] addresses one node of the configuration tree. Lookups never
//! fail on missing keys: absent nodes read as [`Node::Missing`], and
//! [`ApiConfig::is_enabled`] walks endpoint → collection → provider and falls
//! back to `false`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::model::ApiConfig;
use crate::model::CollectionConfig;
use crate::model::EndpointConfig;
use crate::model::ProviderConfig;
use crate::model::Segment;
use crate::named_map::NamedMap;

// ============================================================================
// SECTION: Scope
// ============================================================================

/// Address of a node in the configuration tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope<'a> {
    /// Provider name.
    pub provider: &'a str,
    /// Segment, when addressing below the provider.
    pub segment: Option<Segment>,
    /// Collection key, when addressing a collection or endpoint.
    pub collection: Option<&'a str>,
    /// Endpoint action, when addressing an endpoint.
    pub endpoint: Option<&'a str>,
}

impl<'a> Scope<'a> {
    /// Addresses a provider.
    #[must_use]
    pub const fn provider(provider: &'a str) -> Self {
        Self {
            provider,
            segment: None,
            collection: None,
            endpoint: None,
        }
    }

    /// Narrows the scope to a segment.
    #[must_use]
    pub const fn segment(mut self, segment: Segment) -> Self {
        self.segment = Some(segment);
        self
    }

    /// Narrows the scope to a collection.
    #[must_use]
    pub const fn collection(mut self, collection: &'a str) -> Self {
        self.collection = Some(collection);
        self
    }

    /// Narrows the scope to an endpoint action.
    #[must_use]
    pub const fn endpoint(mut self, endpoint: &'a str) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Shorthand for a collections-segment endpoint.
    #[must_use]
    pub const fn resource(provider: &'a str, collection: &'a str, endpoint: &'a str) -> Self {
        Self {
            provider,
            segment: Some(Segment::Collections),
            collection: Some(collection),
            endpoint: Some(endpoint),
        }
    }
}

// ============================================================================
// SECTION: Nodes
// ============================================================================

/// Node found at a [`Scope`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    /// Provider node.
    Provider(&'a ProviderConfig),
    /// Segment map.
    Segment(&'a NamedMap<CollectionConfig>),
    /// Collection node.
    Collection(&'a CollectionConfig),
    /// Endpoint node.
    Endpoint(&'a EndpointConfig),
    /// Nothing is configured at the scope.
    Missing,
}

/// Nodes on the path from a provider down to the addressed scope.
#[derive(Debug, Clone, Copy)]
pub struct Lineage<'a> {
    /// Owning provider.
    pub provider: &'a ProviderConfig,
    /// Collection, when the scope addresses one and it exists.
    pub collection: Option<&'a CollectionConfig>,
    /// Endpoint, when the scope addresses one and it exists.
    pub endpoint: Option<&'a EndpointConfig>,
}

// ============================================================================
// SECTION: Accessors
// ============================================================================

impl ApiConfig {
    /// Returns the provider named `name`.
    #[must_use]
    pub fn provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers.get(name)
    }

    /// Returns a collection of a provider segment.
    #[must_use]
    pub fn collection(
        &self,
        provider: &str,
        segment: Segment,
        collection: &str,
    ) -> Option<&CollectionConfig> {
        self.provider(provider)?.segment(segment).get(collection)
    }

    /// Returns an endpoint of a provider collection.
    #[must_use]
    pub fn endpoint(
        &self,
        provider: &str,
        segment: Segment,
        collection: &str,
        endpoint: &str,
    ) -> Option<&EndpointConfig> {
        self.collection(provider, segment, collection)?.endpoints.get(endpoint)
    }

    /// Returns the node addressed by `scope`.
    #[must_use]
    pub fn node(&self, scope: &Scope<'_>) -> Node<'_> {
        let Some(provider) = self.provider(scope.provider) else {
            return Node::Missing;
        };
        let Some(segment) = scope.segment else {
            return Node::Provider(provider);
        };
        let collections = provider.segment(segment);
        let Some(collection_key) = scope.collection else {
            return Node::Segment(collections);
        };
        let Some(collection) = collections.get(collection_key) else {
            return Node::Missing;
        };
        let Some(endpoint_key) = scope.endpoint else {
            return Node::Collection(collection);
        };
        collection.endpoints.get(endpoint_key).map_or(Node::Missing, Node::Endpoint)
    }

    /// Returns true when a node exists at `scope`.
    #[must_use]
    pub fn exists(&self, scope: &Scope<'_>) -> bool {
        !matches!(self.node(scope), Node::Missing)
    }

    /// Returns the provider, collection and endpoint along `scope`.
    ///
    /// Returns `None` only when the provider itself is missing.
    #[must_use]
    pub fn lineage(&self, scope: &Scope<'_>) -> Option<Lineage<'_>> {
        let provider = self.provider(scope.provider)?;
        let collection = scope
            .segment
            .zip(scope.collection)
            .and_then(|(segment, key)| provider.segment(segment).get(key));
        let endpoint = collection
            .zip(scope.endpoint)
            .and_then(|(collection, action)| collection.endpoints.get(action));
        Some(Lineage {
            provider,
            collection,
            endpoint,
        })
    }

    /// Returns the enablement at `scope`, falling back endpoint → collection →
    /// provider → false.
    #[must_use]
    pub fn is_enabled(&self, scope: &Scope<'_>) -> bool {
        let Some(lineage) = self.lineage(scope) else {
            return false;
        };
        lineage
            .endpoint
            .and_then(|endpoint| endpoint.enabled)
            .or_else(|| lineage.collection.and_then(|collection| collection.enabled))
            .or(lineage.provider.enabled)
            .unwrap_or(false)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit unwraps for clarity."
    )]

    use super::*;

    fn fixture() -> ApiConfig {
        let mut collection = CollectionConfig::default();
        collection.endpoints.insert(
            "show",
            EndpointConfig {
                enabled: Some(false),
                ..EndpointConfig::default()
            },
        );
        collection.endpoints.insert("index", EndpointConfig::default());
        let mut provider = ProviderConfig {
            enabled: Some(true),
            ..ProviderConfig::default()
        };
        provider.collections.insert("Book", collection);
        let mut config = ApiConfig::default();
        config.providers.insert("v1", provider);
        config
    }

    #[test]
    fn missing_nodes_never_panic() {
        let config = fixture();
        assert_eq!(config.node(&Scope::provider("nope")), Node::Missing);
        assert!(!config.exists(&Scope::resource("v1", "Magazine", "index")));
        assert!(!config.exists(&Scope::resource("v1", "Book", "purge")));
        assert!(config.exists(&Scope::resource("v1", "Book", "index")));
        assert!(matches!(
            config.node(&Scope::provider("v1").segment(Segment::Authentication)),
            Node::Segment(map) if map.is_empty()
        ));
    }

    #[test]
    fn enablement_falls_back_up_the_tree() {
        let config = fixture();
        assert!(!config.is_enabled(&Scope::resource("v1", "Book", "show")));
        assert!(config.is_enabled(&Scope::resource("v1", "Book", "index")));
        assert!(config.is_enabled(&Scope::resource("v1", "Book", "missing")));
        assert!(!config.is_enabled(&Scope::provider("unknown")));
    }
}
