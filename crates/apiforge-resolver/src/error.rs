// crates/apiforge-resolver/src/error.rs
// ============================================================================
// Module: Resolver Errors
// Description: Fatal configuration errors raised by the resolution pipeline.
// Purpose: Abort boot on misconfiguration instead of serving a broken surface.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Only deployment misconfigurations are fatal. Soft anomalies (unknown
//! entities, missing manifests, malformed entries) are logged and skipped by
//! the individual resolvers and never surface here.

use thiserror::Error;

/// Fatal errors raised while resolving the configuration tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Manual versioning mode requires an explicit version number.
    #[error("provider {provider}: version.number is required in manual versioning mode")]
    MissingVersionNumber {
        /// Provider without a number.
        provider: String,
    },
    /// Version numbers start at 1.
    #[error("provider {provider}: version.number must be greater than zero")]
    InvalidVersionNumber {
        /// Provider declaring the invalid number.
        provider: String,
    },
    /// Two providers declare the same version number.
    #[error("version number {number} is declared by both {first} and {second}")]
    DuplicateVersionNumber {
        /// Conflicting number.
        number: u32,
        /// Provider that declared the number first.
        first: String,
        /// Provider that declared the number again.
        second: String,
    },
    /// Every positive version number is already taken.
    #[error("provider {provider}: no unused version number remains")]
    VersionSpaceExhausted {
        /// Provider that could not be numbered.
        provider: String,
    },
}
