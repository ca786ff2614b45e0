// crates/apiforge-resolver/src/resolvers/enablement.rs
// ============================================================================
// Module: Enablement Resolver
// Description: Cascades `enabled` provider → collection → endpoint.
// Purpose: Make a disabled parent disable everything beneath it.
// Dependencies: apiforge-config
// ============================================================================

//! ## Overview
//! Per level: a disabled parent forces the child to `false`; otherwise an
//! unset child inherits the parent value and an explicit child keeps its own.
//! An unset provider is enabled.

use apiforge_config::ApiConfig;

use crate::error::ResolveError;
use crate::interfaces::Resolver;

/// Resolves the enablement flags of every node.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnablementResolver;

impl Resolver for EnablementResolver {
    fn name(&self) -> &'static str {
        "enablement"
    }

    fn resolve(&self, mut config: ApiConfig) -> Result<ApiConfig, ResolveError> {
        for provider in config.providers.values_mut() {
            let provider_enabled = *provider.enabled.get_or_insert(true);
            for collection in
                provider.collections.values_mut().chain(provider.authentication.values_mut())
            {
                let collection_enabled = cascade(&mut collection.enabled, provider_enabled);
                for endpoint in collection.endpoints.values_mut() {
                    cascade(&mut endpoint.enabled, collection_enabled);
                }
            }
        }
        Ok(config)
    }
}

/// Applies the enablement rule to one child and returns its resolved value.
fn cascade(child: &mut Option<bool>, parent: bool) -> bool {
    let resolved = if parent { child.unwrap_or(true) } else { false };
    *child = Some(resolved);
    resolved
}

// ============================================================================
// SECTION: Tests
// ============================================================================
