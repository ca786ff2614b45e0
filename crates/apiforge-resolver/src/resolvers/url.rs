// crates/apiforge-resolver/src/resolvers/url.rs
// ============================================================================
// Module: URL Support Resolver
// Description: Cascades resource URL settings to collections.
// Purpose: Decide per collection whether serialized items carry their URL.
// Dependencies: apiforge-config
// ============================================================================

//! ## Overview
//! Provider URL settings default to `support: false`, `absolute: true` and
//! property `url`, then fill unset collection values. Only the collections
//! segment carries URL support.

use apiforge_config::ApiConfig;
use apiforge_config::UrlSpec;

use crate::cascade::inherit;
use crate::error::ResolveError;
use crate::interfaces::Resolver;

/// Default property holding the resource URL.
pub const DEFAULT_URL_PROPERTY: &str = "url";

/// Resolves URL support for the collections segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlResolver;

impl Resolver for UrlResolver {
    fn name(&self) -> &'static str {
        "url"
    }

    fn resolve(&self, mut config: ApiConfig) -> Result<ApiConfig, ResolveError> {
        let defaults = UrlSpec {
            support: Some(false),
            absolute: Some(true),
            property: Some(DEFAULT_URL_PROPERTY.to_string()),
        };
        for provider in config.providers.values_mut() {
            cascade(&mut provider.url, &defaults);
            let provider_spec = &provider.url;
            for collection in provider.collections.values_mut() {
                cascade(&mut collection.url, provider_spec);
            }
        }
        Ok(config)
    }
}

/// Applies parent URL settings to unset child fields.
fn cascade(child: &mut UrlSpec, parent: &UrlSpec) {
    inherit(&mut child.support, parent.support.as_ref());
    inherit(&mut child.absolute, parent.absolute.as_ref());
    inherit(&mut child.property, parent.property.as_ref());
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_false_is_kept() {
        let parent = UrlSpec {
            support: Some(true),
            absolute: Some(true),
            property: Some("href".to_string()),
        };
        let mut child = UrlSpec {
            absolute: Some(false),
            ..UrlSpec::default()
        };
        cascade(&mut child, &parent);
        assert_eq!(child.support, Some(true));
        assert_eq!(child.absolute, Some(false));
        assert_eq!(child.property.as_deref(), Some("href"));
    }
}
