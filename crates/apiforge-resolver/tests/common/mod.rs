// crates/apiforge-resolver/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared fixtures for resolver pipeline tests.
// Purpose: Deterministic collaborators and YAML-driven pipeline runs.
// Dependencies: apiforge-config, apiforge-resolver
// ============================================================================

//! ## Overview
//! Fixtures parse YAML documents and run the standard pipeline with a fixed
//! vendor so results never depend on the host running the tests.

#![allow(
    dead_code,
    clippy::use_debug,
    reason = "Shared test helpers may be unused in some cases and format values for diagnostics."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use apiforge_config::ApiConfig;
use apiforge_config::CollectionConfig;
use apiforge_config::ConfigFormat;
use apiforge_config::EndpointConfig;
use apiforge_config::Segment;
use apiforge_resolver::ClassPathCatalog;
use apiforge_resolver::Collaborators;
use apiforge_resolver::HttpDates;
use apiforge_resolver::Pipeline;
use apiforge_resolver::ResolvedConfig;
use apiforge_resolver::StaticVendor;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Vendor used by every fixture pipeline.
pub const TEST_VENDOR: &str = "acme";

/// Returns deterministic collaborators.
pub fn collaborators() -> Collaborators {
    Collaborators {
        catalog: Arc::new(ClassPathCatalog),
        dates: Arc::new(HttpDates),
        vendor: Arc::new(StaticVendor(TEST_VENDOR.to_string())),
    }
}

/// Returns the standard pipeline over deterministic collaborators.
pub fn pipeline() -> Pipeline {
    Pipeline::standard(collaborators())
}

/// Parses a YAML document.
pub fn parse_yaml(text: &str) -> Result<ApiConfig, String> {
    ApiConfig::parse(text, ConfigFormat::Yaml).map_err(|err| err.to_string())
}

/// Parses and resolves a YAML document.
pub fn resolve_yaml(text: &str) -> Result<ResolvedConfig, String> {
    pipeline().run(parse_yaml(text)?).map_err(|err| err.to_string())
}

/// Returns a resolved collection.
pub fn collection<'a>(
    config: &'a ApiConfig,
    provider: &str,
    segment: Segment,
    key: &str,
) -> Result<&'a CollectionConfig, String> {
    config
        .collection(provider, segment, key)
        .ok_or_else(|| format!("collection {provider}/{segment}/{key} missing"))
}

/// Returns a resolved collections-segment endpoint.
pub fn endpoint<'a>(
    config: &'a ApiConfig,
    provider: &str,
    key: &str,
    action: &str,
) -> Result<&'a EndpointConfig, String> {
    config
        .endpoint(provider, Segment::Collections, key, action)
        .ok_or_else(|| format!("endpoint {provider}/{key}/{action} missing"))
}

/// Fails with `message` unless `condition` holds.
pub fn ensure(condition: bool, message: &str) -> Result<(), String> {
    if condition { Ok(()) } else { Err(message.to_string()) }
}

/// Fails unless `actual == expected`.
pub fn ensure_eq<T: PartialEq + std::fmt::Debug>(
    actual: &T,
    expected: &T,
    context: &str,
) -> Result<(), String> {
    if actual == expected {
        Ok(())
    } else {
        Err(format!("{context}: expected {expected:?}, got {actual:?}"))
    }
}
