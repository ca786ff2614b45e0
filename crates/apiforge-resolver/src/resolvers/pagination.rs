// crates/apiforge-resolver/src/resolvers/pagination.rs
// ============================================================================
// Module: Pagination Resolver
// Description: Cascades pagination settings with sentinel-aware limits.
// Purpose: Give every list endpoint an effective page size and bound.
// Dependencies: apiforge-config
// ============================================================================

//! ## Overview
//! Provider defaults are `enabled: true`, `limit: 10`, `max_limit: 100` and
//! `allow_limit_override: true`. A limit that is unset or `<= -1` inherits;
//! `0` is an explicit value. Single-item endpoints (`show`, `update`, ...)
//! resolve to no pagination at all, whatever their parents say. Only the
//! collections segment is paginated.

use apiforge_config::ApiConfig;
use apiforge_config::PaginationSpec;
use apiforge_config::is_single_item_action;

use crate::cascade::inherit;
use crate::error::ResolveError;
use crate::interfaces::Resolver;

/// Default page size.
pub const DEFAULT_LIMIT: i64 = 10;
/// Default upper bound for requested page sizes.
pub const DEFAULT_MAX_LIMIT: i64 = 100;

/// Resolves pagination settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaginationResolver;

impl Resolver for PaginationResolver {
    fn name(&self) -> &'static str {
        "pagination"
    }

    fn resolve(&self, mut config: ApiConfig) -> Result<ApiConfig, ResolveError> {
        let defaults = PaginationSpec {
            enabled: Some(true),
            limit: Some(DEFAULT_LIMIT),
            max_limit: Some(DEFAULT_MAX_LIMIT),
            allow_limit_override: Some(true),
        };
        for provider in config.providers.values_mut() {
            cascade(&mut provider.pagination, &defaults);
            let provider_spec = &provider.pagination;
            for collection in provider.collections.values_mut() {
                cascade(&mut collection.pagination, provider_spec);
                let collection_spec = &collection.pagination;
                for (action, endpoint) in collection.endpoints.iter_mut() {
                    if is_single_item_action(action) {
                        endpoint.pagination = None;
                        continue;
                    }
                    let spec = endpoint.pagination.get_or_insert_with(PaginationSpec::default);
                    cascade(spec, collection_spec);
                }
            }
        }
        Ok(config)
    }
}

/// Applies parent pagination settings to unset child fields.
fn cascade(child: &mut PaginationSpec, parent: &PaginationSpec) {
    inherit(&mut child.enabled, parent.enabled.as_ref());
    if child.configured_limit().is_none() {
        child.limit = parent.configured_limit();
    }
    if child.configured_max_limit().is_none() {
        child.max_limit = parent.configured_max_limit();
    }
    inherit(&mut child.allow_limit_override, parent.allow_limit_override.as_ref());
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parent() -> PaginationSpec {
        PaginationSpec {
            enabled: Some(true),
            limit: Some(25),
            max_limit: Some(50),
            allow_limit_override: Some(false),
        }
    }

    #[test]
    fn sentinels_inherit() {
        let mut child = PaginationSpec {
            limit: Some(-1),
            max_limit: None,
            ..PaginationSpec::default()
        };
        cascade(&mut child, &parent());
        assert_eq!(child, parent());
    }

    #[test]
    fn zero_is_explicit() {
        let mut child = PaginationSpec {
            enabled: Some(false),
            limit: Some(0),
            ..PaginationSpec::default()
        };
        cascade(&mut child, &parent());
        assert_eq!(child.limit, Some(0));
        assert_eq!(child.enabled, Some(false));
        assert_eq!(child.max_limit, Some(50));
    }
}
