// crates/apiforge-config/src/lib.rs
// ============================================================================
// Module: API Forge Config Library
// Description: Canonical configuration tree model, loading, and tree accessor.
// Purpose: Single source of truth for the declared API configuration shape.
// Dependencies: serde, serde_json, serde_yaml, toml, tracing
// ============================================================================

//! ## Overview
//! `apiforge-config` defines the provider → collection → endpoint
//! configuration tree consumed by the resolver pipeline and by runtime
//! services. It loads YAML, JSON and TOML documents, skips structurally
//! invalid entries, and exposes panic-free navigation over the tree.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod accessor;
pub mod load;
pub mod model;
pub mod named_map;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use accessor::Lineage;
pub use accessor::Node;
pub use accessor::Scope;
pub use load::CONFIG_ENV_VAR;
pub use load::ConfigError;
pub use load::ConfigFormat;
pub use model::*;
pub use named_map::NamedMap;
