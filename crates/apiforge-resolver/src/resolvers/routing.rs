// crates/apiforge-resolver/src/resolvers/routing.rs
// ============================================================================
// Module: Routing Resolver
// Description: Route prefixes, names, paths and verb conventions.
// Purpose: Turn sparse route settings into complete route definitions.
// Dependencies: apiforge-config, tracing
// ============================================================================

//! ## Overview
//! Per provider the base prefix is `routes.prefix` (default `/api`) joined
//! with the path version label. Collections inherit pattern, prefix, hosts
//! and schemes from the provider, endpoints inherit from their collection.
//!
//! Route names substitute `{version}` with the full label (`v1`) so names stay
//! unique across providers even when the version travels in a header. Paths
//! and prefixes substitute the path label, which is empty in header mode.
//!
//! Collection-segment endpoints additionally receive methods, a controller,
//! requirements and options from the action name when unset.
//!
//! ## Invariants
//! - `{version}`, `{collection}`, `{action}` and `{prefix}` never survive in
//!   resolved names or paths.
//! - A second run leaves resolved routes unchanged.

use std::collections::BTreeMap;

use apiforge_config::ApiConfig;
use apiforge_config::CollectionRoute;
use apiforge_config::EndpointRoute;
use apiforge_config::ProviderRoutes;
use apiforge_config::Segment;
use apiforge_config::is_single_item_action;

use crate::cascade::inherit;
use crate::error::ResolveError;
use crate::interfaces::Resolver;
use crate::template::Placeholders;
use crate::template::normalize_path;
use crate::template::normalize_wildcard;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default provider route prefix.
pub const DEFAULT_ROUTE_PREFIX: &str = "/api";
/// Default route name pattern.
pub const DEFAULT_ROUTE_PATTERN: &str = "api_{version}_{collection}_{action}";
/// Requirement applied to `{id}` on single-item routes.
pub const ID_REQUIREMENT: &str = r"\d+|[\w-]+";
/// Controller service handling collection routes.
const COLLECTION_CONTROLLER: &str = "apiforge.collection";

/// Default path of a list-style collection endpoint.
const COLLECTION_PATH: &str = "{prefix}/{collection}";
/// Default path of a single-item collection endpoint.
const ITEM_PATH: &str = "{prefix}/{collection}/{id}";
/// Default path of an authentication endpoint.
const AUTHENTICATION_PATH: &str = "{prefix}/{collection}/{action}";

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Resolves route settings for both segments.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoutingResolver;

/// Version labels of one provider.
struct VersionLabels {
    /// Label used in route names (`v1`).
    name: String,
    /// Label used in paths; empty in header mode.
    path: String,
}

impl Resolver for RoutingResolver {
    fn name(&self) -> &'static str {
        "routing"
    }

    fn resolve(&self, mut config: ApiConfig) -> Result<ApiConfig, ResolveError> {
        for (provider_name, provider) in config.providers.iter_mut() {
            let labels = VersionLabels {
                name: provider.version.label().unwrap_or_default(),
                path: provider.version.path_label(),
            };
            let routes = &mut provider.routes;
            let base = routes.prefix.get_or_insert_with(|| DEFAULT_ROUTE_PREFIX.to_string());
            let base_prefix = normalize_path(&format!("{base}/{}", labels.path));
            routes.pattern.get_or_insert_with(|| DEFAULT_ROUTE_PATTERN.to_string());
            normalize_wildcard(&mut routes.hosts);
            normalize_wildcard(&mut routes.schemes);
            let routes = routes.clone();

            for segment in Segment::ALL {
                for (key, collection) in provider.segment_mut(segment).iter_mut() {
                    let Some(name) = collection.name.clone() else {
                        tracing::warn!(
                            provider = %provider_name,
                            segment = %segment,
                            collection = %key,
                            "collection has no name; routes left unresolved"
                        );
                        continue;
                    };
                    resolve_collection_route(
                        &mut collection.route,
                        &routes,
                        &base_prefix,
                        segment,
                        &name,
                        &labels,
                    );
                    let collection_route = &collection.route;
                    for (action, endpoint) in collection.endpoints.iter_mut() {
                        let target = RouteTarget {
                            segment,
                            collection: &name,
                            action,
                        };
                        resolve_endpoint_route(
                            &mut endpoint.route,
                            collection_route,
                            &target,
                            &labels,
                        );
                    }
                }
            }
        }
        Ok(config)
    }
}

// ============================================================================
// SECTION: Collections
// ============================================================================

/// Fills one collection route from the provider route defaults.
fn resolve_collection_route(
    route: &mut CollectionRoute,
    provider: &ProviderRoutes,
    base_prefix: &str,
    segment: Segment,
    name: &str,
    labels: &VersionLabels,
) {
    inherit(&mut route.pattern, provider.pattern.as_ref());
    inherit(&mut route.hosts, provider.hosts.as_ref());
    inherit(&mut route.schemes, provider.schemes.as_ref());
    normalize_wildcard(&mut route.hosts);
    normalize_wildcard(&mut route.schemes);

    let inherited = route.prefix.is_none();
    let template = route.prefix.as_deref().unwrap_or(base_prefix);
    let vars = Placeholders::new().with("version", &labels.path).with("collection", name);
    let mut prefix = normalize_path(&vars.render(template));
    if segment == Segment::Authentication
        && inherited
        && let Some(additional) = route.additional_prefix.as_deref()
    {
        prefix = normalize_path(&format!("{prefix}/{}", vars.render(additional)));
    }
    route.prefix = Some(prefix);
}

// ============================================================================
// SECTION: Endpoints
// ============================================================================

/// Identity of the endpoint being resolved.
struct RouteTarget<'a> {
    /// Segment owning the collection.
    segment: Segment,
    /// Resolved collection name.
    collection: &'a str,
    /// Endpoint action key.
    action: &'a str,
}

/// Fills one endpoint route from its collection route.
fn resolve_endpoint_route(
    route: &mut EndpointRoute,
    collection: &CollectionRoute,
    target: &RouteTarget<'_>,
    labels: &VersionLabels,
) {
    let is_collections = target.segment == Segment::Collections;
    let single = is_single_item_action(target.action);
    if is_collections {
        inherit(&mut route.pattern, collection.pattern.as_ref());
    }

    let name_template = route
        .name
        .clone()
        .or_else(|| route.pattern.clone())
        .or_else(|| collection.pattern.clone())
        .unwrap_or_else(|| DEFAULT_ROUTE_PATTERN.to_string());
    let name_vars = Placeholders::new()
        .with("version", &labels.name)
        .with("collection", target.collection)
        .with("action", target.action);
    route.name = Some(name_vars.render(&name_template));

    let default_path = match (is_collections, single) {
        (true, false) => COLLECTION_PATH,
        (true, true) => ITEM_PATH,
        (false, _) => AUTHENTICATION_PATH,
    };
    let path_template = route.path.clone().unwrap_or_else(|| default_path.to_string());
    let prefix = collection.prefix.clone().unwrap_or_default();
    let path_vars = Placeholders::new()
        .with("prefix", &prefix)
        .with("version", &labels.path)
        .with("collection", target.collection)
        .with("action", target.action);
    route.path = Some(normalize_path(&path_vars.render(&path_template)));

    if is_collections {
        apply_conventions(route, target.action, single);
    }

    inherit(&mut route.hosts, collection.hosts.as_ref());
    inherit(&mut route.schemes, collection.schemes.as_ref());
    normalize_wildcard(&mut route.hosts);
    normalize_wildcard(&mut route.schemes);
}

/// Applies the verb convention table to unset route fields.
fn apply_conventions(route: &mut EndpointRoute, action: &str, single: bool) {
    let action = action.to_ascii_lowercase();
    route.methods.get_or_insert_with(|| conventional_methods(&action));
    if route.controller.is_none() {
        route.controller = conventional_controller(&action);
    }
    route.requirements.get_or_insert_with(|| {
        if single {
            BTreeMap::from([("id".to_string(), ID_REQUIREMENT.to_string())])
        } else {
            BTreeMap::new()
        }
    });
    route.options.get_or_insert_with(|| if single { vec!["id".to_string()] } else { Vec::new() });
}

/// Returns the HTTP methods conventionally bound to an action.
fn conventional_methods(action: &str) -> Vec<String> {
    let methods: &[&str] = match action {
        "add" | "create" | "post" => &["POST"],
        "put" | "update" | "edit" => &["PUT"],
        "patch" => &["PATCH"],
        "delete" => &["DELETE"],
        _ => &["GET", "HEAD"],
    };
    methods.iter().map(ToString::to_string).collect()
}

/// Returns the controller conventionally bound to an action.
fn conventional_controller(action: &str) -> Option<String> {
    let handler = match action {
        "index" | "list" => "index",
        "add" | "create" | "post" => "create",
        "read" => "read",
        "put" | "update" | "edit" | "patch" => "update",
        "delete" => "delete",
        _ => return None,
    };
    Some(format!("{COLLECTION_CONTROLLER}::{handler}"))
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

    fn labels() -> VersionLabels {
        VersionLabels {
            name: "v1".to_string(),
            path: "v1".to_string(),
        }
    }

    fn collection_route() -> CollectionRoute {
        let mut route = CollectionRoute::default();
        let provider = ProviderRoutes {
            pattern: Some(DEFAULT_ROUTE_PATTERN.to_string()),
            ..ProviderRoutes::default()
        };
        resolve_collection_route(
            &mut route,
            &provider,
            "/api/v1",
            Segment::Collections,
            "books",
            &labels(),
        );
        route
    }

    #[test]
    fn conventions_follow_action_names() {
        assert_eq!(conventional_methods("create"), vec!["POST"]);
        assert_eq!(conventional_methods("edit"), vec!["PUT"]);
        assert_eq!(conventional_methods("show"), vec!["GET", "HEAD"]);
        assert_eq!(conventional_controller("list").as_deref(), Some("apiforge.collection::index"));
        assert_eq!(
            conventional_controller("patch").as_deref(),
            Some("apiforge.collection::update")
        );
        assert_eq!(conventional_controller("show"), None);
    }

    #[test]
    fn single_item_endpoint_gets_id_route() {
        let collection = collection_route();
        let mut route = EndpointRoute::default();
        let target = RouteTarget {
            segment: Segment::Collections,
            collection: "books",
            action: "show",
        };
        resolve_endpoint_route(&mut route, &collection, &target, &labels());
        assert_eq!(route.name.as_deref(), Some("api_v1_books_show"));
        assert_eq!(route.path.as_deref(), Some("/api/v1/books/{id}"));
        assert_eq!(route.methods, Some(vec!["GET".to_string(), "HEAD".to_string()]));
        assert_eq!(
            route.requirements.as_ref().and_then(|req| req.get("id")).map(String::as_str),
            Some(ID_REQUIREMENT)
        );
        assert_eq!(route.options, Some(vec!["id".to_string()]));
    }

    #[test]
    fn explicit_values_survive() {
        let collection = collection_route();
        let mut route = EndpointRoute {
            path: Some("/custom/{collection}/{action}/".to_string()),
            methods: Some(vec!["GET".to_string()]),
            controller: Some("app.books::create".to_string()),
            ..EndpointRoute::default()
        };
        let target = RouteTarget {
            segment: Segment::Collections,
            collection: "books",
            action: "create",
        };
        resolve_endpoint_route(&mut route, &collection, &target, &labels());
        assert_eq!(route.path.as_deref(), Some("/custom/books/create"));
        assert_eq!(route.methods, Some(vec!["GET".to_string()]));
        assert_eq!(route.controller.as_deref(), Some("app.books::create"));
        assert_eq!(route.requirements, Some(BTreeMap::new()));
    }

    #[test]
    fn authentication_prefix_appends_additional_prefix_once() {
        let provider = ProviderRoutes::default();
        let mut route = CollectionRoute {
            additional_prefix: Some("/auth".to_string()),
            ..CollectionRoute::default()
        };
        for _ in 0..2 {
            resolve_collection_route(
                &mut route,
                &provider,
                "/api/v1",
                Segment::Authentication,
                "user",
                &labels(),
            );
            assert_eq!(route.prefix.as_deref(), Some("/api/v1/auth"));
        }
    }
}
