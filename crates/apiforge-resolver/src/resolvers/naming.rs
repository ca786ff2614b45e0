// crates/apiforge-resolver/src/resolvers/naming.rs
// ============================================================================
// Module: Naming Resolver
// Description: Derives collection names from entity identifiers.
// Purpose: Provide `{collection}` values before routing runs.
// Dependencies: apiforge-config, tracing
// ============================================================================

//! ## Overview
//! A collection without a name (or with an empty one) is named after the
//! short name of its entity: lower-cased and pluralized in the collections
//! segment, lower-cased singular in the authentication segment. Entities the
//! catalog cannot resolve keep an unset name.

use std::sync::Arc;

use apiforge_config::ApiConfig;
use apiforge_config::Segment;

use crate::error::ResolveError;
use crate::inflector::pluralize;
use crate::interfaces::EntityCatalog;
use crate::interfaces::Resolver;

/// Fills unset collection names.
pub struct NamingResolver {
    /// Entity short-name lookup.
    catalog: Arc<dyn EntityCatalog>,
}

impl NamingResolver {
    /// Creates the resolver over an entity catalog.
    #[must_use]
    pub fn new(catalog: Arc<dyn EntityCatalog>) -> Self {
        Self {
            catalog,
        }
    }
}

impl Resolver for NamingResolver {
    fn name(&self) -> &'static str {
        "naming"
    }

    fn resolve(&self, mut config: ApiConfig) -> Result<ApiConfig, ResolveError> {
        for (provider_name, provider) in config.providers.iter_mut() {
            for segment in Segment::ALL {
                for (entity, collection) in provider.segment_mut(segment).iter_mut() {
                    if collection.name.as_deref().is_some_and(|name| !name.is_empty()) {
                        continue;
                    }
                    let Some(short) = self.catalog.short_name(entity) else {
                        tracing::warn!(
                            provider = %provider_name,
                            segment = %segment,
                            entity = %entity,
                            "entity does not resolve to a type; collection name left unset"
                        );
                        continue;
                    };
                    let name = match segment {
                        Segment::Collections => pluralize(&short),
                        Segment::Authentication => short.to_lowercase(),
                    };
                    collection.name = Some(name);
                }
            }
        }
        Ok(config)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
