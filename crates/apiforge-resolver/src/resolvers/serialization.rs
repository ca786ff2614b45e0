// crates/apiforge-resolver/src/resolvers/serialization.rs
// ============================================================================
// Module: Serialization Resolver
// Description: Cascades transformers, groups and ignored fields.
// Purpose: Give every endpoint its effective serialization settings.
// Dependencies: apiforge-config
// ============================================================================

//! ## Overview
//! Same shape as the access control pass: `merge` and `transformer` inherit
//! when unset, `groups` and `ignore` combine by the resolved merge strategy.

use apiforge_config::ApiConfig;
use apiforge_config::ListMerge;
use apiforge_config::SerializationSpec;

use crate::cascade::inherit;
use crate::cascade::merge_list;
use crate::error::ResolveError;
use crate::interfaces::Resolver;

/// Resolves serialization settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerializationResolver;

impl Resolver for SerializationResolver {
    fn name(&self) -> &'static str {
        "serialization"
    }

    fn resolve(&self, mut config: ApiConfig) -> Result<ApiConfig, ResolveError> {
        for provider in config.providers.values_mut() {
            provider.serialization.merge.get_or_insert(ListMerge::Replace);
            let provider_spec = &provider.serialization;
            for collection in
                provider.collections.values_mut().chain(provider.authentication.values_mut())
            {
                cascade(&mut collection.serialization, provider_spec);
                let collection_spec = &collection.serialization;
                for endpoint in collection.endpoints.values_mut() {
                    cascade(&mut endpoint.serialization, collection_spec);
                }
            }
        }
        Ok(config)
    }
}

/// Applies parent serialization settings to a child.
fn cascade(child: &mut SerializationSpec, parent: &SerializationSpec) {
    inherit(&mut child.merge, parent.merge.as_ref());
    inherit(&mut child.transformer, parent.transformer.as_ref());
    let strategy = child.merge.unwrap_or_default();
    merge_list(&mut child.groups, &parent.groups, strategy);
    merge_list(&mut child.ignore, &parent.ignore, strategy);
}

// ============================================================================
// SECTION: Tests
// ============================================================================
