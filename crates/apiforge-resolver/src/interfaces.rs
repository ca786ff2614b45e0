// crates/apiforge-resolver/src/interfaces.rs
// ============================================================================
// Module: Resolver Interfaces
// Description: Resolver pass contract and external collaborator traits.
// Purpose: Keep the pipeline independent of entity, date, and host sources.
// Dependencies: apiforge-config
// ============================================================================

//! ## Overview
//! A [`Resolver`] is one pass of the pipeline. Passes take the tree by value
//! and hand it back, so the orchestrator controls ordering explicitly.
//! Collaborators are consulted through narrow traits so tests and embedding
//! applications can substitute deterministic implementations.

use apiforge_config::ApiConfig;

use crate::error::ResolveError;

// ============================================================================
// SECTION: Resolver Pass
// ============================================================================

/// One configuration resolution pass.
pub trait Resolver: Send + Sync {
    /// Stable pass name used in logs.
    fn name(&self) -> &'static str;

    /// Resolves one concern of the tree.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when the configuration cannot be resolved.
    fn resolve(&self, config: ApiConfig) -> Result<ApiConfig, ResolveError>;
}

// ============================================================================
// SECTION: Collaborators
// ============================================================================

/// Entity layer lookup used for naming defaults.
pub trait EntityCatalog: Send + Sync {
    /// Returns the unqualified type name for an entity identifier.
    ///
    /// Returns `None` when the identifier does not resolve to a known type.
    fn short_name(&self, entity: &str) -> Option<String>;
}

/// Date detection and HTTP-date conversion.
pub trait DateUtility: Send + Sync {
    /// Returns true when `value` is a recognizable date.
    fn is_date(&self, value: &str) -> bool;

    /// Converts a date-like value into an RFC 7231 HTTP-date.
    fn to_http_date(&self, value: &str) -> Option<String>;
}

/// Source of the vendor name used in versioned media types.
pub trait VendorSource: Send + Sync {
    /// Returns the vendor name (never empty).
    fn vendor(&self) -> String;
}
