// crates/apiforge-resolver/src/resolvers/versioning.rs
// ============================================================================
// Module: Versioning Resolver
// Description: Version number assignment and media type pattern rendering.
// Purpose: Give every provider a unique version before routes are computed.
// Dependencies: apiforge-config, tracing
// ============================================================================

//! ## Overview
//! Runs four passes over the providers in declaration order:
//! 1. collect explicit numbers (zero or duplicates are fatal);
//! 2. inherit prefix, location and pattern from the global defaults;
//! 3. assign the smallest unused positive number (auto) or fail (manual);
//! 4. render `{vendor}` and `{version}` into the pattern.
//!
//! The used-number set is local to one call, so the outcome depends only on
//! the input tree and the vendor source.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;

use apiforge_config::ApiConfig;
use apiforge_config::VersionMode;

use crate::cascade::inherit;
use crate::error::ResolveError;
use crate::interfaces::Resolver;
use crate::interfaces::VendorSource;
use crate::template::Placeholders;

/// Assigns version numbers and renders version patterns.
pub struct VersioningResolver {
    /// Vendor used for `{vendor}` when the document does not name one.
    vendor: Arc<dyn VendorSource>,
}

impl VersioningResolver {
    /// Creates the resolver over a vendor source.
    #[must_use]
    pub fn new(vendor: Arc<dyn VendorSource>) -> Self {
        Self {
            vendor,
        }
    }

    /// Returns the configured vendor, or the detected one.
    fn vendor_name(&self, config: &ApiConfig) -> String {
        match config.versioning.vendor.as_deref().map(str::trim) {
            Some(vendor) if !vendor.is_empty() => vendor.to_lowercase(),
            _ => self.vendor.vendor(),
        }
    }
}

impl Resolver for VersioningResolver {
    fn name(&self) -> &'static str {
        "versioning"
    }

    fn resolve(&self, mut config: ApiConfig) -> Result<ApiConfig, ResolveError> {
        let mut owners: BTreeMap<u32, String> = BTreeMap::new();
        for (name, provider) in config.providers.iter() {
            let Some(number) = provider.version.number else {
                continue;
            };
            if number == 0 {
                return Err(ResolveError::InvalidVersionNumber {
                    provider: name.to_string(),
                });
            }
            if let Some(first) = owners.get(&number) {
                return Err(ResolveError::DuplicateVersionNumber {
                    number,
                    first: first.clone(),
                    second: name.to_string(),
                });
            }
            owners.insert(number, name.to_string());
        }
        let mut used: BTreeSet<u32> = owners.into_keys().collect();

        let defaults = config.versioning.clone();
        for provider in config.providers.values_mut() {
            inherit(&mut provider.version.prefix, Some(&defaults.prefix));
            inherit(&mut provider.version.location, Some(&defaults.location));
            inherit(&mut provider.version.pattern, Some(&defaults.pattern));
        }

        for (name, provider) in config.providers.iter_mut() {
            if provider.version.number.is_some() {
                continue;
            }
            match defaults.mode {
                VersionMode::Manual => {
                    return Err(ResolveError::MissingVersionNumber {
                        provider: name.to_string(),
                    });
                }
                VersionMode::Auto => {
                    let number = next_free(&used).ok_or_else(|| {
                        ResolveError::VersionSpaceExhausted {
                            provider: name.to_string(),
                        }
                    })?;
                    used.insert(number);
                    tracing::debug!(provider = %name, number, "assigned version number");
                    provider.version.number = Some(number);
                }
            }
        }

        let needs_vendor = config.providers.values().any(|provider| {
            provider.version.pattern.as_deref().is_some_and(|pattern| pattern.contains("{vendor}"))
        });
        let vendor = if needs_vendor { self.vendor_name(&config) } else { String::new() };
        for provider in config.providers.values_mut() {
            let label = provider.version.label().unwrap_or_default();
            if let Some(pattern) = provider.version.pattern.as_mut() {
                let vars = Placeholders::new().with("vendor", &vendor).with("version", &label);
                *pattern = vars.render(pattern);
            }
        }
        Ok(config)
    }
}

/// Returns the smallest positive number not in `used`.
fn next_free(used: &BTreeSet<u32>) -> Option<u32> {
    let mut candidate: u32 = 1;
    for number in used {
        if *number > candidate {
            break;
        }
        if *number == candidate {
            candidate = candidate.checked_add(1)?;
        }
    }
    Some(candidate)
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

    use apiforge_config::ProviderConfig;
    use apiforge_config::VersionLocation;

    use super::*;
    use crate::vendor::StaticVendor;

    fn resolver() -> VersioningResolver {
        VersioningResolver::new(Arc::new(StaticVendor("acme".to_string())))
    }

    fn config(numbers: &[(&str, Option<u32>)]) -> ApiConfig {
        let mut config = ApiConfig::default();
        for (name, number) in numbers {
            let mut provider = ProviderConfig::default();
            provider.version.number = *number;
            config.providers.insert(*name, provider);
        }
        config
    }

    fn number(config: &ApiConfig, provider: &str) -> Option<u32> {
        config.provider(provider).and_then(|provider| provider.version.number)
    }

    #[test]
    fn auto_mode_fills_gaps_in_declaration_order() {
        let resolved = resolver()
            .resolve(config(&[("a", None), ("b", Some(1)), ("c", None), ("d", Some(3))]))
            .expect("resolve");
        assert_eq!(number(&resolved, "a"), Some(2));
        assert_eq!(number(&resolved, "b"), Some(1));
        assert_eq!(number(&resolved, "c"), Some(4));
    }

    #[test]
    fn defaults_and_pattern_are_applied() {
        let resolved = resolver().resolve(config(&[("main", Some(2))])).expect("resolve");
        let version = &resolved.provider("main").expect("provider").version;
        assert_eq!(version.prefix.as_deref(), Some("v"));
        assert_eq!(version.location, Some(VersionLocation::Path));
        assert_eq!(version.pattern.as_deref(), Some("application/vnd.acme.v2+json"));
    }

    #[test]
    fn explicit_vendor_overrides_detection() {
        let mut config = config(&[("main", None)]);
        config.versioning.vendor = Some(" Example ".to_string());
        let resolved = resolver().resolve(config).expect("resolve");
        let version = &resolved.provider("main").expect("provider").version;
        assert_eq!(version.pattern.as_deref(), Some("application/vnd.example.v1+json"));
    }

    #[test]
    fn manual_mode_requires_numbers() {
        let mut config = config(&[("a", Some(1)), ("b", None)]);
        config.versioning.mode = VersionMode::Manual;
        let err = resolver().resolve(config).expect_err("missing number");
        assert_eq!(
            err,
            ResolveError::MissingVersionNumber {
                provider: "b".to_string()
            }
        );
    }

    #[test]
    fn zero_and_duplicates_are_rejected() {
        let err = resolver().resolve(config(&[("a", Some(0))])).expect_err("zero");
        assert!(matches!(err, ResolveError::InvalidVersionNumber { .. }));
        let err =
            resolver().resolve(config(&[("a", Some(2)), ("b", Some(2))])).expect_err("duplicate");
        assert_eq!(
            err,
            ResolveError::DuplicateVersionNumber {
                number: 2,
                first: "a".to_string(),
                second: "b".to_string()
            }
        );
    }

    #[test]
    fn next_free_skips_used_numbers() {
        assert_eq!(next_free(&BTreeSet::new()), Some(1));
        assert_eq!(next_free(&[1, 2, 4].into_iter().collect()), Some(3));
        assert_eq!(next_free(&[2, 3].into_iter().collect()), Some(1));
        assert_eq!(next_free(&[u32::MAX].into_iter().collect()), Some(1));
    }
}
