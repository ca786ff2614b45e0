// crates/apiforge-resolver/src/resolvers/access_control.rs
// ============================================================================
// Module: Access Control Resolver
// Description: Cascades voters and roles over both segments.
// Purpose: Give every endpoint its effective role requirements.
// Dependencies: apiforge-config
// ============================================================================

//! ## Overview
//! `merge` and `voter` inherit when unset. Roles combine according to the
//! child's resolved merge strategy (`replace` by default).

use apiforge_config::AccessControlSpec;
use apiforge_config::ApiConfig;
use apiforge_config::ListMerge;

use crate::cascade::inherit;
use crate::cascade::merge_list;
use crate::error::ResolveError;
use crate::interfaces::Resolver;

/// Resolves access control settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessControlResolver;

impl Resolver for AccessControlResolver {
    fn name(&self) -> &'static str {
        "access_control"
    }

    fn resolve(&self, mut config: ApiConfig) -> Result<ApiConfig, ResolveError> {
        for provider in config.providers.values_mut() {
            provider.access_control.merge.get_or_insert(ListMerge::Replace);
            let provider_spec = &provider.access_control;
            for collection in
                provider.collections.values_mut().chain(provider.authentication.values_mut())
            {
                cascade(&mut collection.access_control, provider_spec);
                let collection_spec = &collection.access_control;
                for endpoint in collection.endpoints.values_mut() {
                    cascade(&mut endpoint.access_control, collection_spec);
                }
            }
        }
        Ok(config)
    }
}

/// Applies parent access control settings to a child.
fn cascade(child: &mut AccessControlSpec, parent: &AccessControlSpec) {
    inherit(&mut child.merge, parent.merge.as_ref());
    inherit(&mut child.voter, parent.voter.as_ref());
    merge_list(&mut child.roles, &parent.roles, child.merge.unwrap_or_default());
}

// ============================================================================
// SECTION: Tests
// ============================================================================
