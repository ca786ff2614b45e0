//! Document shape tests for apiforge-config.
// crates/apiforge-config/tests/document_shape.rs
// =============================================================================
// Module: Document Shape Tests
// Description: Validate pruning, ordering and unset-vs-explicit parsing.
// Purpose: Ensure declared values reach the model without reinterpretation.
// =============================================================================

use apiforge_config::ApiConfig;
use apiforge_config::ConfigFormat;
use apiforge_config::Scope;
use apiforge_config::Segment;
use apiforge_config::VersionLocation;
use apiforge_config::VersionMode;

type TestResult = Result<(), String>;

fn parse_yaml(text: &str) -> Result<ApiConfig, String> {
    ApiConfig::parse(text, ConfigFormat::Yaml).map_err(|err| err.to_string())
}

fn ensure(condition: bool, message: &str) -> TestResult {
    if condition { Ok(()) } else { Err(message.to_string()) }
}

#[test]
fn non_map_entries_are_skipped() -> TestResult {
    let config = parse_yaml(
        r"
providers:
  broken: 42
  main:
    collections:
      'App\Entity\Book':
        endpoints:
          index: ~
          bogus: [1, 2]
      'App\Entity\Ghost': nope
    authentication: true
",
    )?;
    ensure(config.provider("broken").is_none(), "scalar provider should be dropped")?;
    let provider = config.provider("main").ok_or("main provider missing")?;
    ensure(provider.authentication.is_empty(), "scalar segment should be reset")?;
    ensure(provider.collections.len() == 1, "scalar collection should be dropped")?;
    let book = provider.collections.get("App\\Entity\\Book").ok_or("book missing")?;
    let actions: Vec<&str> = book.endpoints.keys().collect();
    ensure(actions == vec!["index"], "only map endpoints should remain")?;
    Ok(())
}

#[test]
fn declaration_order_is_preserved() -> TestResult {
    let config = parse_yaml(
        r"
providers:
  zeta: {}
  alpha: {}
  mid: {}
",
    )?;
    let names: Vec<&str> = config.providers.keys().collect();
    ensure(names == vec!["zeta", "alpha", "mid"], "providers must keep declaration order")?;
    Ok(())
}

#[test]
fn falsy_values_stay_explicit() -> TestResult {
    let config = parse_yaml(
        r"
providers:
  main:
    pagination:
      enabled: false
      limit: 0
      max_limit: -1
    collections:
      'App\Entity\Book':
        name: ''
        pagination:
          limit: ~
",
    )?;
    let provider = config.provider("main").ok_or("main provider missing")?;
    ensure(provider.pagination.enabled == Some(false), "explicit false kept")?;
    ensure(provider.pagination.configured_limit() == Some(0), "zero limit kept")?;
    ensure(provider.pagination.configured_max_limit().is_none(), "-1 reads as unset")?;
    let book = config
        .collection("main", Segment::Collections, "App\\Entity\\Book")
        .ok_or("book missing")?;
    ensure(book.name.as_deref() == Some(""), "empty name stays explicit in the model")?;
    ensure(book.pagination.limit.is_none(), "null limit reads as unset")?;
    Ok(())
}

#[test]
fn versioning_defaults_apply_when_absent() -> TestResult {
    let config = parse_yaml("providers: {}")?;
    ensure(config.versioning.mode == VersionMode::Auto, "auto mode by default")?;
    ensure(config.versioning.prefix == "v", "v prefix by default")?;
    ensure(config.versioning.location == VersionLocation::Path, "path location by default")?;
    ensure(config.versioning.vendor.is_none(), "vendor detected by default")?;
    Ok(())
}

#[test]
fn deprecation_dates_accept_timestamps_and_text() -> TestResult {
    let config = parse_yaml(
        r"
providers:
  main:
    deprecation:
      enabled: true
      start_at: 784111777
      sunset_at: '2030-01-01'
",
    )?;
    let provider = config.provider("main").ok_or("main provider missing")?;
    ensure(provider.deprecation.start_at.as_deref() == Some("784111777"), "timestamp as text")?;
    ensure(provider.deprecation.sunset_at.as_deref() == Some("2030-01-01"), "date text kept")?;
    Ok(())
}

#[test]
fn accessor_falls_back_through_lineage() -> TestResult {
    let config = parse_yaml(
        r"
providers:
  main:
    enabled: true
    collections:
      'App\Entity\Book':
        enabled: false
        endpoints:
          index: {}
          show: { enabled: true }
",
    )?;
    let index = Scope::resource("main", "App\\Entity\\Book", "index");
    let show = Scope::resource("main", "App\\Entity\\Book", "show");
    let missing = Scope::resource("main", "App\\Entity\\Book", "delete");
    ensure(!config.is_enabled(&index), "index falls back to the disabled collection")?;
    ensure(config.is_enabled(&show), "explicit endpoint value wins in the raw tree")?;
    ensure(!config.exists(&missing), "missing endpoint does not exist")?;
    ensure(!config.is_enabled(&Scope::provider("other")), "unknown provider is disabled")?;
    Ok(())
}
