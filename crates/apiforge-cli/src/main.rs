// crates/apiforge-cli/src/main.rs
// ============================================================================
// Module: API Forge CLI Entry Point
// Description: Command dispatcher for configuration and route inspection.
// Purpose: Validate, resolve and inspect API configuration files offline.
// Dependencies: apiforge-config, apiforge-resolver, apiforge-runtime, clap,
//               serde_json, serde_yaml, thiserror, tracing.
// ============================================================================

//! ## Overview
//! The `apiforge` CLI loads a configuration document, runs the resolution
//! pipeline, and prints the result: a validation summary, the fully resolved
//! tree, or the routes the runtime would expose. Logs go to stderr and are
//! filtered through `RUST_LOG`; command output goes to stdout.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use apiforge_config::ApiConfig;
use apiforge_resolver::ResolvedConfig;
use apiforge_resolver::resolve;
use apiforge_runtime::RouteDefinition;
use apiforge_runtime::RouteExposer;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "apiforge", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Route inspection utilities.
    Routes {
        /// Selected routes subcommand.
        #[command(subcommand)]
        command: RoutesCommand,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load and resolve a configuration file, reporting the first error.
    Validate(ConfigArgs),
    /// Print the fully resolved configuration.
    Resolve(ConfigResolveCommand),
}

/// Routes subcommands.
#[derive(Subcommand, Debug)]
enum RoutesCommand {
    /// List the routes exposed by a configuration.
    List(RoutesListCommand),
}

/// Configuration file selection shared by every command.
#[derive(Args, Debug, Clone)]
struct ConfigArgs {
    /// Config file path (defaults to `APIFORGE_CONFIG` or `apiforge.yaml`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for `config resolve`.
#[derive(Args, Debug)]
struct ConfigResolveCommand {
    /// Config file selection.
    #[command(flatten)]
    source: ConfigArgs,
    /// Output format.
    #[arg(long, value_enum, default_value_t = DocumentFormat::Json)]
    format: DocumentFormat,
}

/// Arguments for `routes list`.
#[derive(Args, Debug)]
struct RoutesListCommand {
    /// Config file selection.
    #[command(flatten)]
    source: ConfigArgs,
    /// Output format.
    #[arg(long, value_enum, default_value_t = RouteFormat::Text)]
    format: RouteFormat,
}

/// Output formats for resolved documents.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum DocumentFormat {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

/// Output formats for route listings.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum RouteFormat {
    /// One route per line.
    Text,
    /// Pretty-printed JSON array.
    Json,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Commands::Config {
            command,
        } => match command {
            ConfigCommand::Validate(args) => command_config_validate(&args),
            ConfigCommand::Resolve(command) => command_config_resolve(&command),
        },
        Commands::Routes {
            command,
        } => match command {
            RoutesCommand::List(command) => command_routes_list(&command),
        },
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Loads and resolves the selected configuration.
fn load_resolved(args: &ConfigArgs) -> CliResult<ResolvedConfig> {
    let config = ApiConfig::load(args.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    tracing::debug!(providers = config.providers.len(), "config loaded");
    resolve(config).map_err(|err| CliError::new(format!("failed to resolve config: {err}")))
}

/// Validates a configuration file.
fn command_config_validate(args: &ConfigArgs) -> CliResult<ExitCode> {
    let resolved = load_resolved(args)?;
    let routes = RouteExposer::routes(&resolved)
        .map_err(|err| CliError::new(format!("invalid routes: {err}")))?;
    write_stdout_line(&format!(
        "config ok: {} providers, {} routes",
        resolved.providers.len(),
        routes.len()
    ))?;
    Ok(ExitCode::SUCCESS)
}

/// Prints the resolved configuration.
fn command_config_resolve(command: &ConfigResolveCommand) -> CliResult<ExitCode> {
    let resolved = load_resolved(&command.source)?;
    let rendered = render_document(resolved.config(), command.format)?;
    write_stdout_line(rendered.trim_end())?;
    Ok(ExitCode::SUCCESS)
}

/// Prints the exposed routes.
fn command_routes_list(command: &RoutesListCommand) -> CliResult<ExitCode> {
    let resolved = load_resolved(&command.source)?;
    let routes = RouteExposer::routes(&resolved)
        .map_err(|err| CliError::new(format!("invalid routes: {err}")))?;
    match command.format {
        RouteFormat::Text => {
            for route in &routes {
                write_stdout_line(&render_route_line(route))?;
            }
        }
        RouteFormat::Json => {
            let rendered = serde_json::to_string_pretty(&routes)
                .map_err(|err| CliError::new(format!("failed to serialize routes: {err}")))?;
            write_stdout_line(&rendered)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Serializes a resolved configuration.
fn render_document(config: &ApiConfig, format: DocumentFormat) -> CliResult<String> {
    match format {
        DocumentFormat::Json => serde_json::to_string_pretty(config).map_err(|err| err.to_string()),
        DocumentFormat::Yaml => serde_yaml::to_string(config).map_err(|err| err.to_string()),
    }
    .map_err(|err| CliError::new(format!("failed to serialize config: {err}")))
}

/// Formats one route as a single text line.
fn render_route_line(route: &RouteDefinition) -> String {
    let methods =
        if route.methods.is_empty() { "ANY".to_string() } else { route.methods.join("|") };
    let host = route.host.as_deref().map(|host| format!(" host={host}")).unwrap_or_default();
    format!("{} {methods} {} -> {}{host}", route.name, route.path, route.controller)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
        .map_err(|err| CliError::new(format!("failed to write to stdout: {err}")))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
