// crates/apiforge-resolver/src/vendor.rs
// ============================================================================
// Module: Vendor Detection
// Description: Vendor name derivation for vendor-branded media types.
// Purpose: Fill `{vendor}` in version patterns without explicit configuration.
// Dependencies: serde_json, toml, tracing
// ============================================================================

//! ## Overview
//! The vendor comes from the nearest package manifest found by walking up
//! from a start directory (`composer.json`, `package.json`, `Cargo.toml`):
//! the part of the declared package name before the first `/`. Without a
//! usable manifest the host identity is used instead (server name, HTTP
//! host, server address, hostname), then the literal `app`. A missing or
//! malformed manifest never fails resolution.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde_json::Value;

use crate::interfaces::VendorSource;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Manifest files checked in each directory, in priority order.
const MANIFEST_FILES: [&str; 3] = ["composer.json", "package.json", "Cargo.toml"];
/// Maximum manifest size read during detection.
const MAX_MANIFEST_BYTES: u64 = 1024 * 1024;
/// Vendor used when nothing else is available.
pub const FALLBACK_VENDOR: &str = "app";
/// Hostname file consulted when `HOSTNAME` is unset.
const HOSTNAME_FILE: &str = "/etc/hostname";

// ============================================================================
// SECTION: Host Environment
// ============================================================================

/// Host identity values used when no manifest is available.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostEnvironment {
    /// Configured server name.
    pub server_name: Option<String>,
    /// HTTP host of the current request context.
    pub http_host: Option<String>,
    /// Server bind address.
    pub server_addr: Option<String>,
    /// Local hostname.
    pub hostname: Option<String>,
}

impl HostEnvironment {
    /// Captures host identity from the process environment.
    #[must_use]
    pub fn from_process() -> Self {
        let hostname = env::var("HOSTNAME")
            .ok()
            .or_else(|| fs::read_to_string(HOSTNAME_FILE).ok())
            .map(|name| name.trim().to_string());
        Self {
            server_name: env::var("SERVER_NAME").ok(),
            http_host: env::var("HTTP_HOST").ok(),
            server_addr: env::var("SERVER_ADDR").ok(),
            hostname,
        }
    }

    /// Returns the first non-empty identity in fallback order.
    fn first_identity(&self) -> Option<String> {
        [&self.server_name, &self.http_host, &self.server_addr, &self.hostname]
            .into_iter()
            .flatten()
            .map(|value| value.trim().to_lowercase())
            .find(|value| !value.is_empty())
    }
}

// ============================================================================
// SECTION: Manifest Vendor
// ============================================================================

/// Default [`VendorSource`]: package manifest, then host identity, then `app`.
#[derive(Debug, Clone, Default)]
pub struct ManifestVendor {
    /// Directory the manifest search starts from.
    start_dir: Option<PathBuf>,
    /// Host identity fallback values.
    host: HostEnvironment,
}

impl ManifestVendor {
    /// Creates a vendor source searching from `start_dir`.
    #[must_use]
    pub const fn new(start_dir: Option<PathBuf>, host: HostEnvironment) -> Self {
        Self {
            start_dir,
            host,
        }
    }

    /// Creates a vendor source for the running process.
    #[must_use]
    pub fn from_process() -> Self {
        Self::new(env::current_dir().ok(), HostEnvironment::from_process())
    }
}

impl VendorSource for ManifestVendor {
    fn vendor(&self) -> String {
        self.start_dir
            .as_deref()
            .and_then(nearest_manifest_vendor)
            .or_else(|| self.host.first_identity())
            .unwrap_or_else(|| FALLBACK_VENDOR.to_string())
    }
}

/// Fixed vendor name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticVendor(pub String);

impl VendorSource for StaticVendor {
    fn vendor(&self) -> String {
        self.0.clone()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads the vendor from the nearest manifest above `start`.
fn nearest_manifest_vendor(start: &Path) -> Option<String> {
    let manifest = start
        .ancestors()
        .flat_map(|dir| MANIFEST_FILES.iter().map(move |file| dir.join(file)))
        .find(|path| path.is_file())?;
    let vendor = read_package_name(&manifest).as_deref().and_then(vendor_from_package);
    if vendor.is_none() {
        tracing::warn!(manifest = %manifest.display(), "manifest has no usable package name");
    }
    vendor
}

/// Reads the declared package name from a manifest file.
fn read_package_name(path: &Path) -> Option<String> {
    let size = fs::metadata(path).ok()?.len();
    if size > MAX_MANIFEST_BYTES {
        return None;
    }
    let content = fs::read_to_string(path).ok()?;
    if path.extension().is_some_and(|ext| ext == "toml") {
        let manifest: toml::Table = toml::from_str(&content).ok()?;
        return manifest.get("package")?.get("name")?.as_str().map(str::to_string);
    }
    let manifest: Value = serde_json::from_str(&content).ok()?;
    manifest.get("name")?.as_str().map(str::to_string)
}

/// Extracts the vendor portion of a package name.
fn vendor_from_package(name: &str) -> Option<String> {
    let name = name.trim().trim_start_matches('@');
    let vendor = name.split('/').next().unwrap_or_default().trim().to_lowercase();
    (!vendor.is_empty()).then_some(vendor)
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

    use std::fs;

    use super::*;

    #[test]
    fn package_names_split_on_first_slash() {
        assert_eq!(vendor_from_package("acme/shop-api"), Some("acme".to_string()));
        assert_eq!(vendor_from_package("@Acme/ui"), Some("acme".to_string()));
        assert_eq!(vendor_from_package("standalone"), Some("standalone".to_string()));
        assert_eq!(vendor_from_package("/nothing"), None);
    }

    #[test]
    fn nearest_manifest_wins() {
        let root = tempfile::tempdir().expect("tempdir");
        let nested = root.path().join("app").join("src");
        fs::create_dir_all(&nested).expect("create dirs");
        fs::write(root.path().join("composer.json"), r#"{"name": "outer/pkg"}"#).expect("write");
        fs::write(root.path().join("app").join("package.json"), r#"{"name": "inner/pkg"}"#)
            .expect("write");
        let source = ManifestVendor::new(Some(nested), HostEnvironment::default());
        assert_eq!(source.vendor(), "inner");
    }

    #[test]
    fn cargo_manifest_is_supported() {
        let root = tempfile::tempdir().expect("tempdir");
        fs::write(root.path().join("Cargo.toml"), "[package]\nname = \"bookshop\"\n")
            .expect("write");
        let source =
            ManifestVendor::new(Some(root.path().to_path_buf()), HostEnvironment::default());
        assert_eq!(source.vendor(), "bookshop");
    }

    #[test]
    fn malformed_manifest_falls_back_to_host_identity() {
        let root = tempfile::tempdir().expect("tempdir");
        fs::write(root.path().join("composer.json"), "{ not json").expect("write");
        let host = HostEnvironment {
            server_name: Some("  ".to_string()),
            http_host: Some("API.Example.com".to_string()),
            ..HostEnvironment::default()
        };
        let source = ManifestVendor::new(Some(root.path().to_path_buf()), host);
        assert_eq!(source.vendor(), "api.example.com");
    }

    #[test]
    fn nothing_available_yields_app() {
        let source = ManifestVendor::new(None, HostEnvironment::default());
        assert_eq!(source.vendor(), FALLBACK_VENDOR);
    }
}
