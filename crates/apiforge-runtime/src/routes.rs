// crates/apiforge-runtime/src/routes.rs
// ============================================================================
// Module: Route Exposure
// Description: Converts a resolved configuration into concrete routes.
// Purpose: Hand the HTTP layer one route per enabled endpoint.
// Dependencies: apiforge-config, apiforge-resolver, serde, tracing
// ============================================================================

//! ## Overview
//! Routes are emitted in declaration order: providers, then the
//! authentication and collections segments, then collections and endpoints.
//! Disabled nodes produce nothing. Each route carries defaults naming the
//! configuration node it was built from so request handlers can query it.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use apiforge_config::CollectionConfig;
use apiforge_config::EndpointConfig;
use apiforge_config::Segment;
use apiforge_resolver::ResolvedConfig;
use serde::Serialize;

use crate::error::RuntimeError;

// ============================================================================
// SECTION: Route Definition
// ============================================================================

/// Default key holding the provider name.
pub const DEFAULT_PROVIDER: &str = "provider";
/// Default key holding the segment name.
pub const DEFAULT_SEGMENT: &str = "segment";
/// Default key holding the collection key.
pub const DEFAULT_COLLECTION: &str = "collection";
/// Default key holding the endpoint action.
pub const DEFAULT_ACTION: &str = "action";

/// One concrete HTTP route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDefinition {
    /// Unique route name.
    pub name: String,
    /// Path template (may contain `{id}`).
    pub path: String,
    /// Allowed methods; empty means any.
    pub methods: Vec<String>,
    /// Controller reference.
    pub controller: String,
    /// Placeholder requirements.
    pub requirements: BTreeMap<String, String>,
    /// Route options.
    pub options: Vec<String>,
    /// Host restriction.
    pub host: Option<String>,
    /// Scheme restriction; empty means any.
    pub schemes: Vec<String>,
    /// Matching condition expression.
    pub condition: Option<String>,
    /// Provider, segment, collection and action of the source endpoint.
    pub defaults: BTreeMap<String, String>,
}

// ============================================================================
// SECTION: Exposer
// ============================================================================

/// Builds routes from a resolved configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteExposer;

impl RouteExposer {
    /// Returns one route per enabled endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError`] when an endpoint has no controller, no
    /// resolved route, or reuses another route's name.
    pub fn routes(config: &ResolvedConfig) -> Result<Vec<RouteDefinition>, RuntimeError> {
        let mut routes = Vec::new();
        let mut names = BTreeSet::new();
        for (provider_name, provider) in config.providers.iter() {
            if provider.enabled != Some(true) {
                continue;
            }
            for segment in Segment::ALL {
                for (key, collection) in provider.segment(segment).iter() {
                    if collection.enabled != Some(true) {
                        continue;
                    }
                    for (action, endpoint) in collection.endpoints.iter() {
                        if endpoint.enabled != Some(true) {
                            continue;
                        }
                        let source = RouteSource {
                            provider: provider_name,
                            segment,
                            collection: key,
                            action,
                        };
                        let route = build_route(&source, collection, endpoint)?;
                        if !names.insert(route.name.clone()) {
                            return Err(RuntimeError::DuplicateRoute {
                                name: route.name,
                            });
                        }
                        routes.push(route);
                    }
                }
            }
        }
        tracing::debug!(count = routes.len(), "exposed routes");
        Ok(routes)
    }
}

/// Configuration node a route is built from.
struct RouteSource<'a> {
    /// Provider name.
    provider: &'a str,
    /// Segment of the collection.
    segment: Segment,
    /// Collection key.
    collection: &'a str,
    /// Endpoint action.
    action: &'a str,
}

/// Builds the route of one endpoint.
fn build_route(
    source: &RouteSource<'_>,
    collection: &CollectionConfig,
    endpoint: &EndpointConfig,
) -> Result<RouteDefinition, RuntimeError> {
    let route = &endpoint.route;
    let (Some(name), Some(path)) = (route.name.clone(), route.path.clone()) else {
        return Err(RuntimeError::IncompleteRoute {
            provider: source.provider.to_string(),
            collection: source.collection.to_string(),
            action: source.action.to_string(),
        });
    };
    let Some(controller) = route.controller.clone() else {
        return Err(RuntimeError::MissingController {
            route: name,
        });
    };
    let hosts = route.hosts.as_ref().or(collection.route.hosts.as_ref());
    let defaults = BTreeMap::from([
        (DEFAULT_PROVIDER.to_string(), source.provider.to_string()),
        (DEFAULT_SEGMENT.to_string(), source.segment.as_str().to_string()),
        (DEFAULT_COLLECTION.to_string(), source.collection.to_string()),
        (DEFAULT_ACTION.to_string(), source.action.to_string()),
    ]);
    Ok(RouteDefinition {
        name,
        path,
        methods: route.methods.clone().unwrap_or_default(),
        controller,
        requirements: route.requirements.clone().unwrap_or_default(),
        options: route.options.clone().unwrap_or_default(),
        host: hosts.and_then(|hosts| hosts.first().cloned()),
        schemes: route.schemes.clone().unwrap_or_default(),
        condition: route.condition.clone(),
        defaults,
    })
}
