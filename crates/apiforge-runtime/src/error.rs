// crates/apiforge-runtime/src/error.rs
// ============================================================================
// Module: Runtime Errors
// Description: Errors raised while consuming a resolved configuration.
// Purpose: Surface route and policy defects that resolution leaves to consumers.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! [`RuntimeError`] covers routes that cannot be exposed and rate-limit
//! expressions that cannot be parsed.

use thiserror::Error;

/// Errors raised by route exposure and runtime queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// An enabled endpoint has no controller to dispatch to.
    #[error("route {route}: no controller configured")]
    MissingController {
        /// Route name.
        route: String,
    },
    /// Two enabled endpoints resolve to the same route name.
    #[error("route name {name} is used more than once")]
    DuplicateRoute {
        /// Conflicting route name.
        name: String,
    },
    /// An enabled endpoint was left without a name or path.
    #[error("endpoint {provider}/{collection}/{action}: route was not resolved")]
    IncompleteRoute {
        /// Provider name.
        provider: String,
        /// Collection key.
        collection: String,
        /// Endpoint action.
        action: String,
    },
    /// A rate limit expression is not `<count>/<unit>`.
    #[error("invalid rate limit '{value}': expected <count>/<second|minute|hour|day>")]
    InvalidRateLimit {
        /// Offending expression.
        value: String,
    },
}
