// crates/apiforge-runtime/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared fixtures for runtime consumer tests.
// Purpose: Resolve YAML documents with deterministic collaborators.
// Dependencies: apiforge-config, apiforge-resolver
// ============================================================================

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

use std::sync::Arc;

use apiforge_config::ApiConfig;
use apiforge_config::ConfigFormat;
use apiforge_resolver::ClassPathCatalog;
use apiforge_resolver::Collaborators;
use apiforge_resolver::HttpDates;
use apiforge_resolver::Pipeline;
use apiforge_resolver::ResolvedConfig;
use apiforge_resolver::StaticVendor;

/// Parses and resolves a YAML document.
pub fn resolve_yaml(text: &str) -> Result<ResolvedConfig, String> {
    let config = ApiConfig::parse(text, ConfigFormat::Yaml).map_err(|err| err.to_string())?;
    let collaborators = Collaborators {
        catalog: Arc::new(ClassPathCatalog),
        dates: Arc::new(HttpDates),
        vendor: Arc::new(StaticVendor("acme".to_string())),
    };
    Pipeline::standard(collaborators).run(config).map_err(|err| err.to_string())
}

/// Fails with `message` unless `condition` holds.
pub fn ensure(condition: bool, message: &str) -> Result<(), String> {
    if condition { Ok(()) } else { Err(message.to_string()) }
}
