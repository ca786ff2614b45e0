// crates/apiforge-runtime/src/query.rs
// ============================================================================
// Module: Configuration Queries
// Description: Per-request read-only lookups over the resolved configuration.
// Purpose: Answer pagination, rate limit, deprecation, access, serialization,
//          URL and template questions for one endpoint.
// Dependencies: apiforge-config, apiforge-resolver
// ============================================================================

//! ## Overview
//! Every lookup falls back endpoint → collection → provider → built-in
//! default, mirroring the resolver cascade. On a resolved tree the most
//! specific node already holds the answer; the fallback keeps lookups
//! correct for scopes that name nodes absent from the configuration.
//!
//! [`ConfigQuery`] is `Send + Sync` and cheap to clone; request handlers
//! share one instance without locking.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use apiforge_config::CollectionConfig;
use apiforge_config::EndpointConfig;
use apiforge_config::Lineage;
use apiforge_config::ProviderConfig;
use apiforge_config::RateLimitSpec;
use apiforge_config::Scope;
use apiforge_config::Segment;
use apiforge_config::TemplateSlot;
use apiforge_config::is_single_item_action;
use apiforge_resolver::ResolvedConfig;
use apiforge_resolver::resolvers::pagination::DEFAULT_LIMIT;
use apiforge_resolver::resolvers::pagination::DEFAULT_MAX_LIMIT;
use apiforge_resolver::resolvers::rate_limit::DEFAULT_RATE_LIMIT;
use apiforge_resolver::resolvers::url::DEFAULT_URL_PROPERTY;

use crate::error::RuntimeError;

// ============================================================================
// SECTION: Answers
// ============================================================================

/// Effective pagination of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Default page size.
    pub limit: i64,
    /// Upper bound for requested page sizes; `0` means unbounded.
    pub max_limit: i64,
    /// Whether clients may request a page size.
    pub allow_limit_override: bool,
}

impl Pagination {
    /// Returns the page size to use for a client request.
    #[must_use]
    pub fn effective_limit(&self, requested: Option<i64>) -> i64 {
        let limit = match requested {
            Some(requested) if self.allow_limit_override && requested > 0 => requested,
            _ => self.limit,
        };
        if self.max_limit > 0 { limit.min(self.max_limit) } else { limit }
    }
}

/// Time window of a rate limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatePeriod {
    /// One second.
    Second,
    /// One minute.
    Minute,
    /// One hour.
    Hour,
    /// One day.
    Day,
}

impl RatePeriod {
    /// Returns the window length.
    #[must_use]
    pub const fn duration(self) -> Duration {
        match self {
            Self::Second => Duration::from_secs(1),
            Self::Minute => Duration::from_secs(60),
            Self::Hour => Duration::from_secs(3_600),
            Self::Day => Duration::from_secs(86_400),
        }
    }

    /// Parses a unit name.
    fn parse(unit: &str) -> Option<Self> {
        match unit {
            "second" | "s" => Some(Self::Second),
            "minute" | "m" => Some(Self::Minute),
            "hour" | "h" => Some(Self::Hour),
            "day" | "d" => Some(Self::Day),
            _ => None,
        }
    }
}

/// Effective rate limit of an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Requests allowed per period.
    pub requests: u32,
    /// Period the count applies to.
    pub period: RatePeriod,
    /// Roles the limit applies to; empty means everyone.
    pub by_role: Vec<String>,
    /// Users the limit applies to.
    pub by_user: Vec<String>,
    /// Client addresses the limit applies to.
    pub by_ip: Vec<String>,
    /// Applications the limit applies to.
    pub by_application: Vec<String>,
    /// Whether responses carry rate limit headers.
    pub include_headers: bool,
}

impl RateLimitPolicy {
    /// Parses a `<count>/<unit>` expression.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::InvalidRateLimit`] for malformed expressions.
    pub fn parse_limit(value: &str) -> Result<(u32, RatePeriod), RuntimeError> {
        let invalid = || RuntimeError::InvalidRateLimit {
            value: value.to_string(),
        };
        let (count, unit) = value.split_once('/').ok_or_else(invalid)?;
        let requests = count.trim().parse::<u32>().map_err(|_| invalid())?;
        let period = RatePeriod::parse(&unit.trim().to_ascii_lowercase()).ok_or_else(invalid)?;
        Ok((requests, period))
    }
}

/// Effective URL support of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlSupport {
    /// Whether generated URLs are absolute.
    pub absolute: bool,
    /// Property receiving the URL.
    pub property: String,
}

// ============================================================================
// SECTION: Query Service
// ============================================================================

/// Read-only lookups over a resolved configuration.
#[derive(Debug, Clone)]
pub struct ConfigQuery {
    /// Resolved tree.
    config: ResolvedConfig,
}

impl ConfigQuery {
    /// Creates a query service over a resolved configuration.
    #[must_use]
    pub const fn new(config: ResolvedConfig) -> Self {
        Self {
            config,
        }
    }

    /// Returns the underlying resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Returns the effective pagination, or `None` when the endpoint is not
    /// paginated (disabled, single-item, or outside the collections segment).
    #[must_use]
    pub fn pagination(&self, scope: &Scope<'_>) -> Option<Pagination> {
        if scope.segment != Some(Segment::Collections) {
            return None;
        }
        if scope.endpoint.is_some_and(is_single_item_action) {
            return None;
        }
        let lineage = self.config.lineage(scope)?;
        if let Some(endpoint) = lineage.endpoint
            && endpoint.pagination.is_none()
        {
            return None;
        }
        let endpoint = lineage.endpoint.and_then(|endpoint| endpoint.pagination.as_ref());
        let collection = lineage.collection.map(|collection| &collection.pagination);
        let provider = &lineage.provider.pagination;
        let specs = [endpoint, collection, Some(provider)];
        let specs = specs.iter().flatten();

        let enabled = specs.clone().find_map(|spec| spec.enabled).unwrap_or(true);
        if !enabled {
            return None;
        }
        Some(Pagination {
            limit: specs.clone().find_map(|spec| spec.configured_limit()).unwrap_or(DEFAULT_LIMIT),
            max_limit: specs
                .clone()
                .find_map(|spec| spec.configured_max_limit())
                .unwrap_or(DEFAULT_MAX_LIMIT),
            allow_limit_override: specs
                .clone()
                .find_map(|spec| spec.allow_limit_override)
                .unwrap_or(true),
        })
    }

    /// Returns the page size for a request, or `None` when not paginated.
    #[must_use]
    pub fn effective_limit(&self, scope: &Scope<'_>, requested: Option<i64>) -> Option<i64> {
        self.pagination(scope).map(|pagination| pagination.effective_limit(requested))
    }

    /// Returns the effective rate limit, or `None` when rate limiting is off.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::InvalidRateLimit`] when the configured
    /// expression is malformed.
    pub fn rate_limit(&self, scope: &Scope<'_>) -> Result<Option<RateLimitPolicy>, RuntimeError> {
        let Some(lineage) = self.config.lineage(scope) else {
            return Ok(None);
        };
        let enabled = pick(
            &lineage,
            |endpoint| endpoint.rate_limit.enabled,
            |collection| collection.rate_limit.enabled,
            |provider| provider.rate_limit.enabled,
        )
        .unwrap_or(false);
        if !enabled {
            return Ok(None);
        }
        let limit = pick(
            &lineage,
            |endpoint| endpoint.rate_limit.limit.clone(),
            |collection| collection.rate_limit.limit.clone(),
            |provider| provider.rate_limit.limit.clone(),
        )
        .unwrap_or_else(|| DEFAULT_RATE_LIMIT.to_string());
        let (requests, period) = RateLimitPolicy::parse_limit(&limit)?;
        Ok(Some(RateLimitPolicy {
            requests,
            period,
            by_role: pick_list(&lineage, |spec| &spec.by_role),
            by_user: pick_list(&lineage, |spec| &spec.by_user),
            by_ip: pick_list(&lineage, |spec| &spec.by_ip),
            by_application: pick_list(&lineage, |spec| &spec.by_application),
            include_headers: pick(
                &lineage,
                |endpoint| endpoint.rate_limit.include_headers,
                |collection| collection.rate_limit.include_headers,
                |provider| provider.rate_limit.include_headers,
            )
            .unwrap_or(true),
        }))
    }

    /// Returns the deprecation headers for a response, empty when the
    /// endpoint is not deprecated.
    #[must_use]
    pub fn deprecation_headers(&self, scope: &Scope<'_>) -> Vec<(String, String)> {
        let Some(lineage) = self.config.lineage(scope) else {
            return Vec::new();
        };
        let spec = [
            lineage.endpoint.map(|endpoint| &endpoint.deprecation),
            lineage.collection.map(|collection| &collection.deprecation),
        ]
        .into_iter()
        .flatten()
        .find(|spec| spec.enabled.is_some())
        .unwrap_or(&lineage.provider.deprecation);
        if spec.enabled != Some(true) {
            return Vec::new();
        }
        let mut headers = Vec::new();
        let since = spec.start_at.clone().unwrap_or_else(|| "true".to_string());
        headers.push(("Deprecation".to_string(), since));
        if let Some(sunset) = &spec.sunset_at {
            headers.push(("Sunset".to_string(), sunset.clone()));
        }
        if let Some(link) = non_blank(spec.link.as_deref()) {
            headers.push(("Link".to_string(), format!("<{link}>; rel=\"deprecation\"")));
        }
        if let Some(successor) = non_blank(spec.successor.as_deref()) {
            headers.push(("Link".to_string(), format!("<{successor}>; rel=\"successor-version\"")));
        }
        headers
    }

    /// Returns the roles required at `scope`.
    #[must_use]
    pub fn roles(&self, scope: &Scope<'_>) -> Vec<String> {
        self.config.lineage(scope).map_or_else(Vec::new, |lineage| {
            pick_nested(
                &lineage,
                |endpoint| &endpoint.access_control.roles,
                |collection| &collection.access_control.roles,
                |provider| &provider.access_control.roles,
            )
        })
    }

    /// Returns the access voter at `scope`.
    #[must_use]
    pub fn voter(&self, scope: &Scope<'_>) -> Option<String> {
        let lineage = self.config.lineage(scope)?;
        pick(
            &lineage,
            |endpoint| endpoint.access_control.voter.clone(),
            |collection| collection.access_control.voter.clone(),
            |provider| provider.access_control.voter.clone(),
        )
    }

    /// Returns the serialization groups at `scope`.
    #[must_use]
    pub fn serialization_groups(&self, scope: &Scope<'_>) -> Vec<String> {
        self.config.lineage(scope).map_or_else(Vec::new, |lineage| {
            pick_nested(
                &lineage,
                |endpoint| &endpoint.serialization.groups,
                |collection| &collection.serialization.groups,
                |provider| &provider.serialization.groups,
            )
        })
    }

    /// Returns the fields excluded from serialization at `scope`.
    #[must_use]
    pub fn serialization_ignore(&self, scope: &Scope<'_>) -> Vec<String> {
        self.config.lineage(scope).map_or_else(Vec::new, |lineage| {
            pick_nested(
                &lineage,
                |endpoint| &endpoint.serialization.ignore,
                |collection| &collection.serialization.ignore,
                |provider| &provider.serialization.ignore,
            )
        })
    }

    /// Returns the serialization transformer at `scope`.
    #[must_use]
    pub fn transformer(&self, scope: &Scope<'_>) -> Option<String> {
        let lineage = self.config.lineage(scope)?;
        pick(
            &lineage,
            |endpoint| endpoint.serialization.transformer.clone(),
            |collection| collection.serialization.transformer.clone(),
            |provider| provider.serialization.transformer.clone(),
        )
    }

    /// Returns URL support for a collection, or `None` when disabled.
    #[must_use]
    pub fn url_support(&self, scope: &Scope<'_>) -> Option<UrlSupport> {
        if scope.segment != Some(Segment::Collections) {
            return None;
        }
        let lineage = self.config.lineage(scope)?;
        let collection = lineage.collection.map(|collection| &collection.url);
        let specs = [collection, Some(&lineage.provider.url)];
        let specs = specs.iter().flatten();
        if !specs.clone().find_map(|spec| spec.support).unwrap_or(false) {
            return None;
        }
        Some(UrlSupport {
            absolute: specs.clone().find_map(|spec| spec.absolute).unwrap_or(true),
            property: specs
                .clone()
                .find_map(|spec| spec.property.clone())
                .unwrap_or_else(|| DEFAULT_URL_PROPERTY.to_string()),
        })
    }

    /// Returns the template configured for `slot` at `scope`.
    #[must_use]
    pub fn template(&self, scope: &Scope<'_>, slot: TemplateSlot) -> Option<String> {
        let lineage = self.config.lineage(scope)?;
        pick(
            &lineage,
            |endpoint| endpoint.templates.slot(slot).cloned(),
            |collection| collection.templates.slot(slot).cloned(),
            |provider| provider.templates.slot(slot).cloned(),
        )
    }
}

// ============================================================================
// SECTION: Fallback Helpers
// ============================================================================

/// Returns the first value found endpoint → collection → provider.
fn pick<T>(
    lineage: &Lineage<'_>,
    endpoint: impl Fn(&EndpointConfig) -> Option<T>,
    collection: impl Fn(&CollectionConfig) -> Option<T>,
    provider: impl Fn(&ProviderConfig) -> Option<T>,
) -> Option<T> {
    lineage
        .endpoint
        .and_then(endpoint)
        .or_else(|| lineage.collection.and_then(collection))
        .or_else(|| provider(lineage.provider))
}

/// Returns the first non-empty list found endpoint → collection → provider.
fn pick_nested(
    lineage: &Lineage<'_>,
    endpoint: impl Fn(&EndpointConfig) -> &Vec<String>,
    collection: impl Fn(&CollectionConfig) -> &Vec<String>,
    provider: impl Fn(&ProviderConfig) -> &Vec<String>,
) -> Vec<String> {
    pick(
        lineage,
        |node| non_empty(endpoint(node)),
        |node| non_empty(collection(node)),
        |node| non_empty(provider(node)),
    )
    .unwrap_or_default()
}

/// Returns the first non-empty rate limit list found along the lineage.
fn pick_list(lineage: &Lineage<'_>, field: impl Fn(&RateLimitSpec) -> &Vec<String>) -> Vec<String> {
    pick_nested(
        lineage,
        |node| field(&node.rate_limit),
        |node| field(&node.rate_limit),
        |node| field(&node.rate_limit),
    )
}

/// Clones a list when it has entries.
fn non_empty(list: &[String]) -> Option<Vec<String>> {
    (!list.is_empty()).then(|| list.to_vec())
}

/// Returns trimmed text when it is not blank.
fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|text| !text.is_empty())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
