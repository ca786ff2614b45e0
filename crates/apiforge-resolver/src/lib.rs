// crates/apiforge-resolver/src/lib.rs
// ============================================================================
// Module: API Forge Resolver Library
// Description: Multi-pass configuration resolution pipeline.
// Purpose: Turn a sparse declared configuration into a complete, frozen tree.
// Dependencies: apiforge-config, serde_json, thiserror, time, toml, tracing
// ============================================================================

//! ## Overview
//! The resolver crate cascades provider → collection → endpoint defaults for
//! every configuration concern, assigns versions, derives names, and computes
//! routes. Passes implement [`Resolver`] and run through a [`Pipeline`];
//! the result is a [`ResolvedConfig`] that runtime services read without
//! locking.
//!
//! Security posture: package manifests read during vendor detection are
//! untrusted and size-limited; unreadable manifests never fail resolution.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod cascade;
pub mod catalog;
pub mod dates;
pub mod error;
pub mod inflector;
pub mod interfaces;
pub mod pipeline;
pub mod resolvers;
pub mod template;
pub mod vendor;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::ClassPathCatalog;
pub use catalog::StaticCatalog;
pub use dates::HttpDates;
pub use error::ResolveError;
pub use inflector::pluralize;
pub use interfaces::DateUtility;
pub use interfaces::EntityCatalog;
pub use interfaces::Resolver;
pub use interfaces::VendorSource;
pub use pipeline::Collaborators;
pub use pipeline::Pipeline;
pub use pipeline::ResolvedConfig;
pub use pipeline::resolve;
pub use vendor::HostEnvironment;
pub use vendor::ManifestVendor;
pub use vendor::StaticVendor;
