// crates/apiforge-resolver/src/resolvers/deprecation.rs
// ============================================================================
// Module: Deprecation Resolver
// Description: Cascades deprecation schedules and normalizes their dates.
// Purpose: Produce header-ready deprecation data for every node.
// Dependencies: apiforge-config, tracing
// ============================================================================

//! ## Overview
//! An enabled parent forces its children to be deprecated; an unset child
//! under a non-deprecated parent resolves to `false`. Deprecated children
//! inherit unset dates, and `link`, `successor` and `message` are copied into
//! blank children. Dates of non-deprecated nodes are cleared; the remaining
//! ones become IMF-fixdates, and values that are not dates are dropped.
//! Both segments are resolved down to their endpoints.

use std::sync::Arc;

use apiforge_config::ApiConfig;
use apiforge_config::DeprecationSpec;
use apiforge_config::Segment;

use crate::cascade::inherit;
use crate::cascade::inherit_text;
use crate::error::ResolveError;
use crate::interfaces::DateUtility;
use crate::interfaces::Resolver;

/// Resolves deprecation settings.
pub struct DeprecationResolver {
    /// Date detection and conversion.
    dates: Arc<dyn DateUtility>,
}

impl DeprecationResolver {
    /// Creates the resolver over a date utility.
    #[must_use]
    pub fn new(dates: Arc<dyn DateUtility>) -> Self {
        Self {
            dates,
        }
    }

    /// Clears dates of a non-deprecated node and converts the others.
    fn normalize(&self, spec: &mut DeprecationSpec, node: &str) {
        if spec.enabled != Some(true) {
            spec.start_at = None;
            spec.sunset_at = None;
            return;
        }
        let dates = [("start_at", &mut spec.start_at), ("sunset_at", &mut spec.sunset_at)];
        for (field, value) in dates {
            let Some(raw) = value.take() else {
                continue;
            };
            *value = if self.dates.is_date(&raw) { self.dates.to_http_date(&raw) } else { None };
            if value.is_none() {
                tracing::warn!(node, field, value = %raw, "deprecation date cleared");
            }
        }
    }
}

impl Resolver for DeprecationResolver {
    fn name(&self) -> &'static str {
        "deprecation"
    }

    fn resolve(&self, mut config: ApiConfig) -> Result<ApiConfig, ResolveError> {
        for (provider_name, provider) in config.providers.iter_mut() {
            provider.deprecation.enabled.get_or_insert(false);
            self.normalize(&mut provider.deprecation, provider_name);
            let provider_spec = &provider.deprecation;

            for segment in Segment::ALL {
                let collections = match segment {
                    Segment::Authentication => &mut provider.authentication,
                    Segment::Collections => &mut provider.collections,
                };
                for (key, collection) in collections.iter_mut() {
                    cascade(&mut collection.deprecation, provider_spec);
                    self.normalize(&mut collection.deprecation, key);
                    let collection_spec = &collection.deprecation;
                    for (action, endpoint) in collection.endpoints.iter_mut() {
                        cascade(&mut endpoint.deprecation, collection_spec);
                        self.normalize(&mut endpoint.deprecation, action);
                    }
                }
            }
        }
        Ok(config)
    }
}

/// Applies the parent deprecation settings to a child.
fn cascade(child: &mut DeprecationSpec, parent: &DeprecationSpec) {
    let enabled = parent.enabled == Some(true) || child.enabled == Some(true);
    child.enabled = Some(enabled);
    if enabled {
        inherit(&mut child.start_at, parent.start_at.as_ref());
        inherit(&mut child.sunset_at, parent.sunset_at.as_ref());
    }
    inherit_text(&mut child.link, parent.link.as_ref());
    inherit_text(&mut child.successor, parent.successor.as_ref());
    inherit_text(&mut child.message, parent.message.as_ref());
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
    use crate::dates::HttpDates;

    fn spec(enabled: Option<bool>, sunset: Option<&str>) -> DeprecationSpec {
        DeprecationSpec {
            enabled,
            sunset_at: sunset.map(ToString::to_string),
            ..DeprecationSpec::default()
        }
    }

    #[test]
    fn enabled_parent_forces_children() {
        let parent = spec(Some(true), Some("Tue, 01 Jan 2030 00:00:00 GMT"));
        let mut child = spec(Some(false), None);
        cascade(&mut child, &parent);
        assert_eq!(child.enabled, Some(true));
        assert_eq!(child.sunset_at, parent.sunset_at);
    }

    #[test]
    fn child_keeps_own_schedule() {
        let parent = spec(Some(false), None);
        let mut child = spec(Some(true), Some("2031-06-01"));
        cascade(&mut child, &parent);
        assert_eq!(child.enabled, Some(true));
        let resolver = DeprecationResolver::new(Arc::new(HttpDates));
        resolver.normalize(&mut child, "books");
        assert_eq!(child.sunset_at.as_deref(), Some("Sun, 01 Jun 2031 00:00:00 GMT"));
    }

    #[test]
    fn disabled_nodes_lose_dates_and_bad_dates_are_cleared() {
        let resolver = DeprecationResolver::new(Arc::new(HttpDates));
        let mut disabled = spec(Some(false), Some("2031-06-01"));
        resolver.normalize(&mut disabled, "books");
        assert_eq!(disabled.sunset_at, None);
        let mut garbage = spec(Some(true), Some("whenever"));
        resolver.normalize(&mut garbage, "books");
        assert_eq!(garbage.sunset_at, None);
    }

    #[test]
    fn text_fields_fill_blank_children() {
        let parent = DeprecationSpec {
            link: Some("https://example.com/deprecations".to_string()),
            message: Some("use v2".to_string()),
            ..DeprecationSpec::default()
        };
        let mut child = DeprecationSpec {
            message: Some(String::new()),
            successor: Some("https://example.com/v2".to_string()),
            ..DeprecationSpec::default()
        };
        cascade(&mut child, &parent);
        assert_eq!(child.enabled, Some(false));
        assert_eq!(child.link, parent.link);
        assert_eq!(child.message.as_deref(), Some("use v2"));
        assert_eq!(child.successor.as_deref(), Some("https://example.com/v2"));
    }
}
