//! Config load validation tests for apiforge-config.
// crates/apiforge-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards (path, size, encoding, format).
// Purpose: Ensure config input handling is strict and fail-closed.
// =============================================================================

use std::io::Write;
use std::path::Path;

use apiforge_config::ApiConfig;
use apiforge_config::ConfigError;
use tempfile::NamedTempFile;

type TestResult = Result<(), String>;

fn assert_invalid(result: Result<ApiConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config load".to_string()),
    }
}

fn config_file(suffix: &str, payload: &[u8]) -> Result<NamedTempFile, String> {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .map_err(|err| err.to_string())?;
    file.write_all(payload).map_err(|err| err.to_string())?;
    Ok(file)
}

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    let path = Path::new(&long_path);
    assert_invalid(ApiConfig::load(Some(path)), "config path exceeds max length")?;
    Ok(())
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    let path = Path::new(&long_component);
    assert_invalid(ApiConfig::load(Some(path)), "config path component too long")?;
    Ok(())
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let file = config_file(".yaml", &vec![b'a'; 1_048_577])?;
    assert_invalid(ApiConfig::load(Some(file.path())), "config file exceeds size limit")?;
    Ok(())
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let file = config_file(".yaml", &[0xFF, 0xFE, 0xFF])?;
    assert_invalid(ApiConfig::load(Some(file.path())), "config file must be utf-8")?;
    Ok(())
}

#[test]
fn load_rejects_unknown_extension() -> TestResult {
    let file = config_file(".ini", b"providers = {}")?;
    assert_invalid(ApiConfig::load(Some(file.path())), "unsupported config extension")?;
    Ok(())
}

#[test]
fn load_rejects_missing_file() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.yaml");
    assert_invalid(ApiConfig::load(Some(&path)), "config io error")?;
    Ok(())
}

#[test]
fn load_rejects_non_map_root() -> TestResult {
    let file = config_file(".json", b"[1, 2, 3]")?;
    assert_invalid(ApiConfig::load(Some(file.path())), "config root must be a map")?;
    Ok(())
}

#[test]
fn load_reads_each_supported_format() -> TestResult {
    let yaml = config_file(".yml", b"providers:\n  main:\n    enabled: false\n")?;
    let json = config_file(".json", br#"{"providers": {"main": {"enabled": false}}}"#)?;
    let toml = config_file(".toml", b"[providers.main]\nenabled = false\n")?;
    let mut loaded = Vec::new();
    for file in [&yaml, &json, &toml] {
        loaded.push(ApiConfig::load(Some(file.path())).map_err(|err| err.to_string())?);
    }
    for config in &loaded {
        let enabled = config.provider("main").and_then(|provider| provider.enabled);
        if enabled != Some(false) {
            return Err(format!("expected explicit disabled provider, got {enabled:?}"));
        }
    }
    Ok(())
}

#[test]
fn empty_document_loads_as_empty_config() -> TestResult {
    let file = config_file(".yaml", b"")?;
    let config = ApiConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if !config.providers.is_empty() {
        return Err("expected no providers".to_string());
    }
    Ok(())
}

#[test]
fn toml_native_dates_load_as_text() -> TestResult {
    let file = config_file(
        ".toml",
        b"[providers.main.deprecation]\nenabled = true\n\
          start_at = 2024-01-01T08:00:00Z\nsunset_at = 2030-01-01\n",
    )?;
    let config = ApiConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    let deprecation = &config.provider("main").ok_or("provider missing")?.deprecation;
    if deprecation.sunset_at.as_deref() != Some("2030-01-01") {
        return Err("local date should load as its text form".to_string());
    }
    if deprecation.start_at.as_deref() != Some("2024-01-01T08:00:00Z") {
        return Err("offset datetime should load as its text form".to_string());
    }
    Ok(())
}
