// # ddnsd - DDNS Daemon
//
// This daemon is a THIN integration layer:
// - All update protocol logic lives in ddns-provider-namecheap
// - All scheduling logic lives in ddns-core
//
// The ddnsd daemon is responsible for:
// 1. Reading configuration (JSON file plus environment overrides)
// 2. Initializing logging and the runtime
// 3. Building the update client and the scheduler
// 4. Running until SIGINT/SIGTERM
//
// ## Configuration
//
// Records are read from a JSON file:
//
// ```json
// {
//   "interval": 300,
//   "verbose": false,
//   "records": [
//     { "domain": "example.com", "password": "…", "hosts": ["@", "www"] }
//   ]
// }
// ```
//
// Environment variables:
//
// - `DDNS_CONFIG`: Path to the JSON file (default: /etc/ddns/config.json)
// - `DDNS_INTERVAL`: Seconds to wait after each record (overrides file)
// - `DDNS_VERBOSE`: Log every attempt and success (overrides file)
// - `DDNS_API_URL`: Update endpoint (overrides file)
// - `DDNS_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
//
// ## Example
//
// ```bash
// export DDNS_CONFIG=/etc/ddns/config.json
// export DDNS_VERBOSE=true
//
// ddnsd
// ```

use anyhow::{Context, Result};
use ddns_core::{DdnsConfig, Scheduler};
use ddns_provider_namecheap::UpdateClient;
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Default location of the configuration file
const DEFAULT_CONFIG_PATH: &str = "/etc/ddns/config.json";

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum DdnsExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    config_path: String,
    log_level: String,
    ddns: DdnsConfig,
}

impl Config {
    /// Load configuration from environment variables and the config file
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration using `lookup` to read variables
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config_path =
            lookup("DDNS_CONFIG").unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        let mut ddns = DdnsConfig::from_file(&config_path)
            .with_context(|| format!("Failed to load {}", config_path))?;

        if let Some(interval) = lookup("DDNS_INTERVAL") {
            ddns.interval = interval
                .trim()
                .parse()
                .with_context(|| format!("DDNS_INTERVAL must be a number of seconds. Got: {}", interval))?;
        }

        if let Some(verbose) = lookup("DDNS_VERBOSE") {
            ddns.verbose = parse_flag(&verbose)
                .with_context(|| format!("DDNS_VERBOSE must be true or false. Got: {}", verbose))?;
        }

        if let Some(api_url) = lookup("DDNS_API_URL") {
            ddns.provider.api_url = Some(api_url);
        }

        Ok(Self {
            config_path,
            log_level: lookup("DDNS_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            ddns,
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        self.ddns
            .validate()
            .with_context(|| format!("Invalid configuration in {}", self.config_path))?;

        if let Some(ref url) = self.ddns.provider.api_url
            && url.starts_with("http://")
        {
            eprintln!(
                "WARNING: update endpoint uses HTTP (not HTTPS). \
                Passwords will be sent in clear text."
            );
        }

        parse_log_level(&self.log_level)?;

        Ok(())
    }
}

/// Parse a boolean environment flag
fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("'{}' is not a boolean", other),
    }
}

/// Parse a log level name
fn parse_log_level(value: &str) -> Result<Level> {
    match value.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "DDNS_LOG_LEVEL '{}' is not valid. \
            Valid levels: trace, debug, info, warn, error",
            value
        ),
    }
}

fn main() -> ExitCode {
    // Load configuration from file and environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return DdnsExitCode::ConfigError.into();
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return DdnsExitCode::ConfigError.into();
    }

    // Initialize tracing
    let log_level = parse_log_level(&config.log_level).unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DdnsExitCode::ConfigError.into();
    }

    info!("Starting ddnsd daemon");
    info!("Configuration loaded from {}", config.config_path);

    // Records are processed one at a time, so a single thread is enough
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DdnsExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run_daemon(config).await {
            error!("Daemon error: {:#}", e);
            DdnsExitCode::RuntimeError
        } else {
            DdnsExitCode::CleanShutdown
        }
    });

    result.into()
}

/// Run the daemon
async fn run_daemon(config: Config) -> Result<()> {
    let client = UpdateClient::from_config(&config.ddns.provider)
        .context("Failed to create update client")?;
    info!("Update endpoint: {}", client.api_url());

    let scheduler = Scheduler::new(
        config.ddns.records(),
        Box::new(client),
        config.ddns.interval(),
        config.ddns.verbose,
    )?;

    for record in scheduler.records() {
        info!("Managing record: {}", record);
    }

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let run = scheduler.run_with_shutdown(Some(shutdown_rx));
    tokio::pin!(run);

    tokio::select! {
        result = &mut run => {
            result?;
        }
        signal = wait_for_shutdown() => {
            let signal = signal?;
            info!("Received shutdown signal: {}", signal);
            let _ = shutdown_tx.send(());
            run.await?;
        }
    }

    info!("Shutting down daemon");
    Ok(())
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
///
/// # Returns
///
/// Returns the name of the signal received.
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    let mut sigterm =
        signal(SignalKind::terminate()).context("Failed to setup SIGTERM handler")?;
    let mut sigint =
        signal(SignalKind::interrupt()).context("Failed to setup SIGINT handler")?;

    let received = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };

    Ok(received)
}

/// Wait for shutdown signals (SIGINT only)
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .context("Failed to wait for CTRL-C")?;
    Ok("SIGINT")
}
