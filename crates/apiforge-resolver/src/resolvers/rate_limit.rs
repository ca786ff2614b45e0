// crates/apiforge-resolver/src/resolvers/rate_limit.rs
// ============================================================================
// Module: Rate Limit Resolver
// Description: Cascades rate limit settings over both segments.
// Purpose: Give every endpoint a complete rate limit policy.
// Dependencies: apiforge-config
// ============================================================================

//! ## Overview
//! Provider defaults are `enabled: false`, `limit: "100/hour"` and
//! `include_headers: true`. Scalars inherit when unset; identity lists
//! (`by_role`, `by_user`, `by_ip`, `by_application`) inherit when the child
//! list is empty and the parent list is not.

use apiforge_config::ApiConfig;
use apiforge_config::ListMerge;
use apiforge_config::RateLimitSpec;

use crate::cascade::inherit;
use crate::cascade::merge_list;
use crate::error::ResolveError;
use crate::interfaces::Resolver;

/// Default rate limit expression.
pub const DEFAULT_RATE_LIMIT: &str = "100/hour";

/// Resolves rate limit settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct RateLimitResolver;

impl Resolver for RateLimitResolver {
    fn name(&self) -> &'static str {
        "rate_limit"
    }

    fn resolve(&self, mut config: ApiConfig) -> Result<ApiConfig, ResolveError> {
        let defaults = RateLimitSpec {
            enabled: Some(false),
            limit: Some(DEFAULT_RATE_LIMIT.to_string()),
            include_headers: Some(true),
            ..RateLimitSpec::default()
        };
        for provider in config.providers.values_mut() {
            cascade(&mut provider.rate_limit, &defaults);
            let provider_spec = &provider.rate_limit;
            for collection in
                provider.collections.values_mut().chain(provider.authentication.values_mut())
            {
                cascade(&mut collection.rate_limit, provider_spec);
                let collection_spec = &collection.rate_limit;
                for endpoint in collection.endpoints.values_mut() {
                    cascade(&mut endpoint.rate_limit, collection_spec);
                }
            }
        }
        Ok(config)
    }
}

/// Applies parent rate limit settings to a child.
fn cascade(child: &mut RateLimitSpec, parent: &RateLimitSpec) {
    inherit(&mut child.enabled, parent.enabled.as_ref());
    inherit(&mut child.limit, parent.limit.as_ref());
    inherit(&mut child.include_headers, parent.include_headers.as_ref());
    merge_list(&mut child.by_role, &parent.by_role, ListMerge::Replace);
    merge_list(&mut child.by_user, &parent.by_user, ListMerge::Replace);
    merge_list(&mut child.by_ip, &parent.by_ip, ListMerge::Replace);
    merge_list(&mut child.by_application, &parent.by_application, ListMerge::Replace);
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_fill_only_empty_children() {
        let parent = RateLimitSpec {
            enabled: Some(true),
            limit: Some("10/minute".to_string()),
            by_role: vec!["ROLE_ADMIN".to_string()],
            by_ip: vec!["10.0.0.1".to_string()],
            include_headers: Some(false),
            ..RateLimitSpec::default()
        };
        let mut child = RateLimitSpec {
            limit: Some("5/second".to_string()),
            by_ip: vec!["127.0.0.1".to_string()],
            ..RateLimitSpec::default()
        };
        cascade(&mut child, &parent);
        assert_eq!(child.enabled, Some(true));
        assert_eq!(child.limit.as_deref(), Some("5/second"));
        assert_eq!(child.by_role, vec!["ROLE_ADMIN".to_string()]);
        assert_eq!(child.by_ip, vec!["127.0.0.1".to_string()]);
        assert_eq!(child.include_headers, Some(false));
    }
}
