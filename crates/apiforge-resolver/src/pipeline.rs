// crates/apiforge-resolver/src/pipeline.rs
// ============================================================================
// Module: Resolution Pipeline
// Description: Ordered execution of resolver passes.
// Purpose: Produce the frozen configuration consumed by runtime services.
// Dependencies: apiforge-config, tracing
// ============================================================================

//! ## Overview
//! [`Pipeline::standard`] wires every pass in dependency order: naming and
//! versioning first (routes substitute names and versions), then enablement
//! and deprecation, routing, and the remaining concern cascades.
//!
//! [`Pipeline::run`] consumes the declared tree and returns a
//! [`ResolvedConfig`], which only hands out shared references. The first
//! fatal error aborts the run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ops::Deref;
use std::sync::Arc;

use apiforge_config::ApiConfig;

use crate::catalog::ClassPathCatalog;
use crate::dates::HttpDates;
use crate::error::ResolveError;
use crate::interfaces::DateUtility;
use crate::interfaces::EntityCatalog;
use crate::interfaces::Resolver;
use crate::interfaces::VendorSource;
use crate::resolvers::AccessControlResolver;
use crate::resolvers::DeprecationResolver;
use crate::resolvers::EnablementResolver;
use crate::resolvers::NamingResolver;
use crate::resolvers::PaginationResolver;
use crate::resolvers::RateLimitResolver;
use crate::resolvers::RoutingResolver;
use crate::resolvers::SerializationResolver;
use crate::resolvers::TemplatesResolver;
use crate::resolvers::UrlResolver;
use crate::resolvers::VersioningResolver;
use crate::vendor::ManifestVendor;

// ============================================================================
// SECTION: Collaborators
// ============================================================================

/// External collaborators consulted by the standard passes.
#[derive(Clone)]
pub struct Collaborators {
    /// Entity short-name lookup.
    pub catalog: Arc<dyn EntityCatalog>,
    /// Date detection and conversion.
    pub dates: Arc<dyn DateUtility>,
    /// Vendor name source.
    pub vendor: Arc<dyn VendorSource>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            catalog: Arc::new(ClassPathCatalog),
            dates: Arc::new(HttpDates),
            vendor: Arc::new(ManifestVendor::from_process()),
        }
    }
}

// ============================================================================
// SECTION: Pipeline
// ============================================================================

/// Ordered list of resolver passes.
pub struct Pipeline {
    /// Passes in execution order.
    resolvers: Vec<Box<dyn Resolver>>,
}

impl Pipeline {
    /// Creates a pipeline running `resolvers` in the given order.
    #[must_use]
    pub fn new(resolvers: Vec<Box<dyn Resolver>>) -> Self {
        Self {
            resolvers,
        }
    }

    /// Creates the standard pipeline.
    #[must_use]
    pub fn standard(collaborators: Collaborators) -> Self {
        Self::new(vec![
            Box::new(NamingResolver::new(collaborators.catalog)),
            Box::new(VersioningResolver::new(collaborators.vendor)),
            Box::new(EnablementResolver),
            Box::new(DeprecationResolver::new(collaborators.dates)),
            Box::new(RoutingResolver),
            Box::new(PaginationResolver),
            Box::new(RateLimitResolver),
            Box::new(AccessControlResolver),
            Box::new(SerializationResolver),
            Box::new(UrlResolver),
            Box::new(TemplatesResolver),
        ])
    }

    /// Returns the pass names in execution order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.resolvers.iter().map(|resolver| resolver.name()).collect()
    }

    /// Runs every pass and freezes the result.
    ///
    /// # Errors
    ///
    /// Returns the first [`ResolveError`] raised by a pass.
    pub fn run(&self, config: ApiConfig) -> Result<ResolvedConfig, ResolveError> {
        let mut config = config;
        for resolver in &self.resolvers {
            tracing::debug!(pass = resolver.name(), "running resolver pass");
            config = resolver.resolve(config).inspect_err(|err| {
                tracing::error!(pass = resolver.name(), error = %err, "resolver pass failed");
            })?;
        }
        tracing::debug!(providers = config.providers.len(), "configuration resolved");
        Ok(ResolvedConfig::new(config))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard(Collaborators::default())
    }
}

/// Resolves `config` with the standard pipeline and default collaborators.
///
/// # Errors
///
/// Returns [`ResolveError`] when the configuration is fatally invalid.
pub fn resolve(config: ApiConfig) -> Result<ResolvedConfig, ResolveError> {
    Pipeline::default().run(config)
}

// ============================================================================
// SECTION: Resolved Configuration
// ============================================================================

/// Fully resolved, read-only configuration tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Shared resolved tree.
    tree: Arc<ApiConfig>,
}

impl ResolvedConfig {
    /// Freezes a tree produced by the pipeline.
    pub(crate) fn new(config: ApiConfig) -> Self {
        Self {
            tree: Arc::new(config),
        }
    }

    /// Returns the resolved tree.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.tree
    }
}

impl Deref for ResolvedConfig {
    type Target = ApiConfig;

    fn deref(&self) -> &Self::Target {
        &self.tree
    }
}

impl AsRef<ApiConfig> for ResolvedConfig {
    fn as_ref(&self) -> &ApiConfig {
        &self.tree
    }
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

    #[test]
    fn standard_order_runs_naming_and_versioning_before_routing() {
        let names = Pipeline::default().names();
        assert_eq!(
            names,
            vec![
                "naming",
                "versioning",
                "enablement",
                "deprecation",
                "routing",
                "pagination",
                "rate_limit",
                "access_control",
                "serialization",
                "url",
                "templates",
            ]
        );
    }

    #[test]
    fn resolved_config_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResolvedConfig>();
        let resolved = Pipeline::default().run(ApiConfig::default()).expect("resolve");
        let shared = resolved.clone();
        assert!(shared.providers.is_empty());
        assert_eq!(resolved, shared);
    }
}
