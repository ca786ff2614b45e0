// crates/apiforge-config/src/model.rs
// ============================================================================
// Module: API Forge Configuration Model
// Description: Typed provider / collection / endpoint configuration tree.
// Purpose: Canonical shape shared by the resolver pipeline and runtime services.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The configuration tree is rooted at [`ApiConfig::providers`]. Each provider
//! owns two segments (`collections` and `authentication`) of
//! [`CollectionConfig`] entries, and every collection owns a map of
//! [`EndpointConfig`] entries keyed by action name.
//!
//! Every inheritable value is an `Option`: `None` means "not configured" and
//! is the only state the resolvers overwrite. Falsy values such as `0`,
//! `false` or `""` are explicit configuration and stay `Some`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use crate::named_map::NamedMap;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default version prefix (`v` + number).
pub const DEFAULT_VERSION_PREFIX: &str = "v";
/// Default vendor-branded media type pattern.
pub const DEFAULT_VERSION_PATTERN: &str = "application/vnd.{vendor}.{version}+json";
/// Actions that address a single resource rather than a collection.
pub const SINGLE_ITEM_ACTIONS: [&str; 7] =
    ["edit", "delete", "patch", "put", "read", "show", "update"];

/// Returns true when `action` addresses a single resource (case-insensitive).
#[must_use]
pub fn is_single_item_action(action: &str) -> bool {
    let action = action.to_ascii_lowercase();
    SINGLE_ITEM_ACTIONS.contains(&action.as_str())
}

// ============================================================================
// SECTION: Root
// ============================================================================

/// Root configuration document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Global versioning defaults.
    #[serde(default)]
    pub versioning: VersioningConfig,
    /// Provider entries keyed by provider name, in declaration order.
    #[serde(default)]
    pub providers: NamedMap<ProviderConfig>,
}

/// Global versioning defaults applied to providers that omit them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VersioningConfig {
    /// Version number assignment mode.
    #[serde(default)]
    pub mode: VersionMode,
    /// Default version prefix.
    #[serde(default = "default_version_prefix")]
    pub prefix: String,
    /// Default version location.
    #[serde(default)]
    pub location: VersionLocation,
    /// Default media type pattern with `{vendor}` / `{version}` placeholders.
    #[serde(default = "default_version_pattern")]
    pub pattern: String,
    /// Explicit vendor name (skips vendor detection when set).
    #[serde(default)]
    pub vendor: Option<String>,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            mode: VersionMode::default(),
            prefix: default_version_prefix(),
            location: VersionLocation::default(),
            pattern: default_version_pattern(),
            vendor: None,
        }
    }
}

/// Version number assignment mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionMode {
    /// Missing numbers are assigned from the smallest unused positive integer.
    #[default]
    Auto,
    /// Every provider must declare its number.
    Manual,
}

/// Where the API version is carried on requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionLocation {
    /// Version is a path segment (`/api/v1/...`).
    #[default]
    Path,
    /// Version is negotiated through a media type header.
    Header,
}

// ============================================================================
// SECTION: Provider
// ============================================================================

/// Collection grouping inside a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    /// Auth-related collections (login, logout, register, ...).
    Authentication,
    /// Resource CRUD collections.
    Collections,
}

impl Segment {
    /// Both segments, authentication first.
    pub const ALL: [Self; 2] = [Self::Authentication, Self::Collections];

    /// Returns the configuration key of the segment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Collections => "collections",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named API surface.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Provider enablement (unset resolves to enabled).
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Version settings.
    #[serde(default)]
    pub version: VersionSpec,
    /// Route defaults for every collection of the provider.
    #[serde(default)]
    pub routes: ProviderRoutes,
    /// Deprecation schedule.
    #[serde(default)]
    pub deprecation: DeprecationSpec,
    /// Pagination defaults.
    #[serde(default)]
    pub pagination: PaginationSpec,
    /// Rate limit defaults.
    #[serde(default)]
    pub rate_limit: RateLimitSpec,
    /// Access control defaults.
    #[serde(default)]
    pub access_control: AccessControlSpec,
    /// Serialization defaults.
    #[serde(default)]
    pub serialization: SerializationSpec,
    /// URL support defaults.
    #[serde(default)]
    pub url: UrlSpec,
    /// Template defaults.
    #[serde(default)]
    pub templates: TemplateSpec,
    /// Response settings.
    #[serde(default)]
    pub response: ResponseSpec,
    /// Resource collections keyed by entity identifier.
    #[serde(default)]
    pub collections: NamedMap<CollectionConfig>,
    /// Authentication collections keyed by entity identifier.
    #[serde(default)]
    pub authentication: NamedMap<CollectionConfig>,
}

impl ProviderConfig {
    /// Returns the collections of `segment`.
    #[must_use]
    pub const fn segment(&self, segment: Segment) -> &NamedMap<CollectionConfig> {
        match segment {
            Segment::Authentication => &self.authentication,
            Segment::Collections => &self.collections,
        }
    }

    /// Returns the collections of `segment` mutably.
    pub const fn segment_mut(&mut self, segment: Segment) -> &mut NamedMap<CollectionConfig> {
        match segment {
            Segment::Authentication => &mut self.authentication,
            Segment::Collections => &mut self.collections,
        }
    }
}

/// Provider version settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct VersionSpec {
    /// Version number (auto-assigned when unset in auto mode).
    #[serde(default)]
    pub number: Option<u32>,
    /// Version prefix.
    #[serde(default)]
    pub prefix: Option<String>,
    /// Version location.
    #[serde(default)]
    pub location: Option<VersionLocation>,
    /// Media type pattern; holds the substituted pattern after resolution.
    #[serde(default)]
    pub pattern: Option<String>,
}

impl VersionSpec {
    /// Returns `prefix` + `number` (e.g. `v2`) when the number is known.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        self.number.map(|number| format!("{}{number}", self.prefix.as_deref().unwrap_or_default()))
    }

    /// Returns the label used in paths (empty unless the version lives in the path).
    #[must_use]
    pub fn path_label(&self) -> String {
        match self.location {
            Some(VersionLocation::Path) => self.label().unwrap_or_default(),
            Some(VersionLocation::Header) | None => String::new(),
        }
    }
}

// ============================================================================
// SECTION: Routes
// ============================================================================

/// Provider-level route defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProviderRoutes {
    /// Path prefix for every collection (the version label is appended).
    #[serde(default)]
    pub prefix: Option<String>,
    /// Route name pattern.
    #[serde(default)]
    pub pattern: Option<String>,
    /// Allowed hosts (`*` means unrestricted).
    #[serde(default)]
    pub hosts: Option<Vec<String>>,
    /// Allowed schemes (`*` means unrestricted).
    #[serde(default)]
    pub schemes: Option<Vec<String>>,
}

/// Collection-level route settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CollectionRoute {
    /// Route name pattern.
    #[serde(default)]
    pub pattern: Option<String>,
    /// Path prefix of the collection.
    #[serde(default)]
    pub prefix: Option<String>,
    /// Allowed hosts.
    #[serde(default)]
    pub hosts: Option<Vec<String>>,
    /// Allowed schemes.
    #[serde(default)]
    pub schemes: Option<Vec<String>>,
    /// Extra prefix appended to inherited prefixes of authentication collections.
    #[serde(default)]
    pub additional_prefix: Option<String>,
}

/// Endpoint-level route settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EndpointRoute {
    /// Route name pattern (collections segment only).
    #[serde(default)]
    pub pattern: Option<String>,
    /// Route name.
    #[serde(default)]
    pub name: Option<String>,
    /// Route path.
    #[serde(default)]
    pub path: Option<String>,
    /// Allowed HTTP methods.
    #[serde(default)]
    pub methods: Option<Vec<String>>,
    /// Controller reference.
    #[serde(default)]
    pub controller: Option<String>,
    /// Path parameter requirements (parameter name to regex).
    #[serde(default)]
    pub requirements: Option<BTreeMap<String, String>>,
    /// Route options.
    #[serde(default)]
    pub options: Option<Vec<String>>,
    /// Allowed hosts.
    #[serde(default)]
    pub hosts: Option<Vec<String>>,
    /// Allowed schemes.
    #[serde(default)]
    pub schemes: Option<Vec<String>>,
    /// Route matching condition expression.
    #[serde(default)]
    pub condition: Option<String>,
}

// ============================================================================
// SECTION: Collections and Endpoints
// ============================================================================

/// Configuration for one entity collection.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CollectionConfig {
    /// Collection name used in paths and route names.
    #[serde(default)]
    pub name: Option<String>,
    /// Collection enablement.
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Route settings.
    #[serde(default)]
    pub route: CollectionRoute,
    /// Deprecation schedule.
    #[serde(default)]
    pub deprecation: DeprecationSpec,
    /// Pagination settings.
    #[serde(default)]
    pub pagination: PaginationSpec,
    /// Rate limit settings.
    #[serde(default)]
    pub rate_limit: RateLimitSpec,
    /// Access control settings.
    #[serde(default)]
    pub access_control: AccessControlSpec,
    /// Serialization settings.
    #[serde(default)]
    pub serialization: SerializationSpec,
    /// URL support settings.
    #[serde(default)]
    pub url: UrlSpec,
    /// Template settings.
    #[serde(default)]
    pub templates: TemplateSpec,
    /// Endpoints keyed by action name.
    #[serde(default)]
    pub endpoints: NamedMap<EndpointConfig>,
}

/// Configuration for one endpoint action.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EndpointConfig {
    /// Endpoint enablement.
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Route settings.
    #[serde(default)]
    pub route: EndpointRoute,
    /// Deprecation schedule.
    #[serde(default)]
    pub deprecation: DeprecationSpec,
    /// Pagination settings (`None` once resolved means no pagination).
    #[serde(default)]
    pub pagination: Option<PaginationSpec>,
    /// Rate limit settings.
    #[serde(default)]
    pub rate_limit: RateLimitSpec,
    /// Access control settings.
    #[serde(default)]
    pub access_control: AccessControlSpec,
    /// Serialization settings.
    #[serde(default)]
    pub serialization: SerializationSpec,
    /// Template settings.
    #[serde(default)]
    pub templates: TemplateSpec,
}

// ============================================================================
// SECTION: Per-Concern Specs
// ============================================================================

/// Deprecation schedule and metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeprecationSpec {
    /// Whether the surface is deprecated.
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Deprecation start (any date-like input; HTTP-date once resolved).
    #[serde(default, deserialize_with = "deserialize_date")]
    pub start_at: Option<String>,
    /// Sunset date (any date-like input; HTTP-date once resolved).
    #[serde(default, deserialize_with = "deserialize_date")]
    pub sunset_at: Option<String>,
    /// Link to deprecation documentation.
    #[serde(default)]
    pub link: Option<String>,
    /// Link to the successor surface.
    #[serde(default)]
    pub successor: Option<String>,
    /// Human readable deprecation message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Pagination settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PaginationSpec {
    /// Whether pagination is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Default page size (`null` or `<= -1` means unset).
    #[serde(default)]
    pub limit: Option<i64>,
    /// Maximum page size (`null` or `<= -1` means unset).
    #[serde(default)]
    pub max_limit: Option<i64>,
    /// Whether clients may override the page size.
    #[serde(default)]
    pub allow_limit_override: Option<bool>,
}

impl PaginationSpec {
    /// Returns the configured limit, treating negative sentinels as unset.
    #[must_use]
    pub fn configured_limit(&self) -> Option<i64> {
        self.limit.filter(|limit| *limit > -1)
    }

    /// Returns the configured max limit, treating negative sentinels as unset.
    #[must_use]
    pub fn configured_max_limit(&self) -> Option<i64> {
        self.max_limit.filter(|limit| *limit > -1)
    }
}

/// Rate limit settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RateLimitSpec {
    /// Whether rate limiting is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Limit expression such as `100/hour`.
    #[serde(default)]
    pub limit: Option<String>,
    /// Roles the limit is keyed by.
    #[serde(default)]
    pub by_role: Vec<String>,
    /// Users the limit is keyed by.
    #[serde(default)]
    pub by_user: Vec<String>,
    /// Client addresses the limit is keyed by.
    #[serde(default)]
    pub by_ip: Vec<String>,
    /// Applications the limit is keyed by.
    #[serde(default)]
    pub by_application: Vec<String>,
    /// Whether rate limit headers are emitted.
    #[serde(default)]
    pub include_headers: Option<bool>,
}

/// Strategy for combining a child list with its parent list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListMerge {
    /// Child list wins; an empty child inherits a non-empty parent.
    #[default]
    Replace,
    /// Parent entries followed by child entries not already present.
    Append,
}

/// Access control settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AccessControlSpec {
    /// List merge strategy for `roles`.
    #[serde(default)]
    pub merge: Option<ListMerge>,
    /// Voter reference.
    #[serde(default)]
    pub voter: Option<String>,
    /// Required roles.
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Serialization settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SerializationSpec {
    /// List merge strategy for `groups` and `ignore`.
    #[serde(default)]
    pub merge: Option<ListMerge>,
    /// Transformer reference.
    #[serde(default)]
    pub transformer: Option<String>,
    /// Serialization groups.
    #[serde(default)]
    pub groups: Vec<String>,
    /// Ignored attributes.
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// Resource URL support settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UrlSpec {
    /// Whether a resource URL property is emitted.
    #[serde(default)]
    pub support: Option<bool>,
    /// Whether the URL is absolute.
    #[serde(default)]
    pub absolute: Option<bool>,
    /// Property name holding the URL.
    #[serde(default)]
    pub property: Option<String>,
}

/// Named template slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateSlot {
    /// Collection listing.
    List,
    /// Single item.
    Item,
    /// Error response.
    Error,
    /// Missing resource.
    NotFound,
    /// Delete confirmation.
    Delete,
    /// Account pages.
    Account,
}

impl TemplateSlot {
    /// Every slot in declaration order.
    pub const ALL: [Self; 6] =
        [Self::List, Self::Item, Self::Error, Self::NotFound, Self::Delete, Self::Account];
}

/// Template paths by slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TemplateSpec {
    /// Collection listing template.
    #[serde(default)]
    pub list: Option<String>,
    /// Single item template.
    #[serde(default, alias = "single")]
    pub item: Option<String>,
    /// Error template.
    #[serde(default)]
    pub error: Option<String>,
    /// Not-found template.
    #[serde(default)]
    pub not_found: Option<String>,
    /// Delete template.
    #[serde(default)]
    pub delete: Option<String>,
    /// Account template.
    #[serde(default)]
    pub account: Option<String>,
}

impl TemplateSpec {
    /// Returns the template configured for `slot`.
    #[must_use]
    pub const fn slot(&self, slot: TemplateSlot) -> Option<&String> {
        match slot {
            TemplateSlot::List => self.list.as_ref(),
            TemplateSlot::Item => self.item.as_ref(),
            TemplateSlot::Error => self.error.as_ref(),
            TemplateSlot::NotFound => self.not_found.as_ref(),
            TemplateSlot::Delete => self.delete.as_ref(),
            TemplateSlot::Account => self.account.as_ref(),
        }
    }

    /// Returns the template slot mutably.
    pub const fn slot_mut(&mut self, slot: TemplateSlot) -> &mut Option<String> {
        match slot {
            TemplateSlot::List => &mut self.list,
            TemplateSlot::Item => &mut self.item,
            TemplateSlot::Error => &mut self.error,
            TemplateSlot::NotFound => &mut self.not_found,
            TemplateSlot::Delete => &mut self.delete,
            TemplateSlot::Account => &mut self.account,
        }
    }
}

/// Response body format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// JSON bodies.
    #[default]
    Json,
    /// XML bodies.
    Xml,
}

/// Provider response settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResponseSpec {
    /// Body format.
    #[serde(default)]
    pub format: ResponseFormat,
    /// Static headers added to every response.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the default version prefix.
fn default_version_prefix() -> String {
    DEFAULT_VERSION_PREFIX.to_string()
}

/// Returns the default version pattern.
fn default_version_pattern() -> String {
    DEFAULT_VERSION_PATTERN.to_string()
}

/// Raw date input: text or unix timestamp.
#[derive(Deserialize)]
#[serde(untagged)]
enum DateInput {
    /// Date text in any supported format.
    Text(String),
    /// Unix timestamp in seconds.
    Timestamp(i64),
}

/// Deserializes a date given as text, unix timestamp, or null.
fn deserialize_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let input = Option::<DateInput>::deserialize(deserializer)?;
    Ok(input.map(|input| match input {
        DateInput::Text(text) => text,
        DateInput::Timestamp(seconds) => seconds.to_string(),
    }))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
