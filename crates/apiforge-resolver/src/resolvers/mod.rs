// crates/apiforge-resolver/src/resolvers/mod.rs
// ============================================================================
// Module: Resolver Passes
// Description: One pass per configuration concern.
// Purpose: Group the default-cascading and substitution passes of the pipeline.
// Dependencies: apiforge-config, crate::cascade, crate::template
// ============================================================================

//! ## Overview
//! Passes run in the order fixed by [`crate::pipeline::Pipeline::standard`].
//! Naming and versioning must precede routing because route names and paths
//! substitute the collection name and version label.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod access_control;
pub mod deprecation;
pub mod enablement;
pub mod naming;
pub mod pagination;
pub mod rate_limit;
pub mod routing;
pub mod serialization;
pub mod templates;
pub mod url;
pub mod versioning;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use access_control::AccessControlResolver;
pub use deprecation::DeprecationResolver;
pub use enablement::EnablementResolver;
pub use naming::NamingResolver;
pub use pagination::PaginationResolver;
pub use rate_limit::RateLimitResolver;
pub use routing::RoutingResolver;
pub use serialization::SerializationResolver;
pub use templates::TemplatesResolver;
pub use url::UrlResolver;
pub use versioning::VersioningResolver;
