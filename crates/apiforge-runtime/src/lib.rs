// crates/apiforge-runtime/src/lib.rs
// ============================================================================
// Module: API Forge Runtime Library
// Description: Read-only consumers of the resolved configuration.
// Purpose: Expose routes and per-request policy lookups.
// Dependencies: apiforge-config, apiforge-resolver, serde, thiserror, tracing
// ============================================================================

//! ## Overview
//! The runtime crate turns a [`apiforge_resolver::ResolvedConfig`] into
//! concrete routes ([`RouteExposer`]) and answers per-request questions
//! ([`ConfigQuery`]). Nothing here mutates the configuration, so one
//! instance can serve many request handlers concurrently.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod query;
pub mod routes;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::RuntimeError;
pub use query::ConfigQuery;
pub use query::Pagination;
pub use query::RateLimitPolicy;
pub use query::RatePeriod;
pub use query::UrlSupport;
pub use routes::RouteDefinition;
pub use routes::RouteExposer;
