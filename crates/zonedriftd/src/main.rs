// # zonedriftd - polling DDNS daemon
//
// Thin integration layer over zonedrift-core:
// 1. Reading configuration from environment variables
// 2. Initializing tracing and the tokio runtime
// 3. Classifying configured records and registering providers
// 4. Driving the run loop on a fixed interval until SIGINT/SIGTERM
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// - `ZONEDRIFT_ENDPOINT`: URL answering with the caller's public IP
//   (required, e.g. https://api.ipify.org)
// - `ZONEDRIFT_INTERVAL_SECS`: seconds between runs (default 30)
// - `ZONEDRIFT_NOOP_RECORDS`: comma-separated record list for the no-op
//   provider (presence enables the provider)
// - `ZONEDRIFT_LOG_LEVEL`: trace|debug|info|warn|error (default info)
//
// ## Example
//
// ```bash
// export ZONEDRIFT_ENDPOINT=https://api.ipify.org
// export ZONEDRIFT_NOOP_RECORDS=example.com,www.example.com
//
// zonedriftd
// ```

mod runner;

use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use zonedrift_core::Updater;
use zonedrift_ip_http::HttpIpChecker;
use zonedrift_provider_noop::NoopProvider;

use runner::Runner;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Default run cadence when `ZONEDRIFT_INTERVAL_SECS` is unset
const DEFAULT_INTERVAL_SECS: u64 = 30;

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum DaemonExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<DaemonExitCode> for ExitCode {
    fn from(code: DaemonExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    endpoint: String,
    interval_secs: u64,
    noop_records: Vec<String>,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        let interval_secs = match env::var("ZONEDRIFT_INTERVAL_SECS") {
            Ok(s) => s.parse().map_err(|_| {
                anyhow::anyhow!("ZONEDRIFT_INTERVAL_SECS must be an integer, got: {s}")
            })?,
            Err(_) => DEFAULT_INTERVAL_SECS,
        };

        Ok(Self {
            endpoint: env::var("ZONEDRIFT_ENDPOINT").unwrap_or_default(),
            interval_secs,
            noop_records: env::var("ZONEDRIFT_NOOP_RECORDS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            log_level: env::var("ZONEDRIFT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate the configuration
    ///
    /// Record strings are validated separately, by the classifier at
    /// startup; an unclassifiable record is fatal before the scheduler
    /// starts.
    fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            anyhow::bail!(
                "ZONEDRIFT_ENDPOINT is required. \
                Set it via: export ZONEDRIFT_ENDPOINT=https://api.ipify.org"
            );
        }

        if !self.endpoint.starts_with("https://") && !self.endpoint.starts_with("http://") {
            anyhow::bail!(
                "ZONEDRIFT_ENDPOINT must use HTTP or HTTPS scheme. Got: {}",
                self.endpoint
            );
        }

        if !(5..=3600).contains(&self.interval_secs) {
            anyhow::bail!(
                "ZONEDRIFT_INTERVAL_SECS must be between 5 and 3600 seconds. Got: {}",
                self.interval_secs
            );
        }

        if self.noop_records.is_empty() {
            anyhow::bail!(
                "ZONEDRIFT_NOOP_RECORDS must contain at least one record. \
                Set it via: export ZONEDRIFT_NOOP_RECORDS=example.com,www.example.com"
            );
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "ZONEDRIFT_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }
}

fn main() -> ExitCode {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return DaemonExitCode::ConfigError.into();
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {e}");
        return DaemonExitCode::ConfigError.into();
    }

    // Initialize tracing
    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
        return DaemonExitCode::ConfigError.into();
    }

    info!("starting zonedriftd");

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("failed to create tokio runtime: {e}");
            return DaemonExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        match run_daemon(config).await {
            Ok(()) => DaemonExitCode::CleanShutdown,
            Err(e) => {
                error!("daemon error: {e}");
                DaemonExitCode::RuntimeError
            }
        }
    });

    result.into()
}

/// Run the daemon
async fn run_daemon(config: Config) -> Result<()> {
    let mut updater = Updater::new();

    // An unclassifiable record fails startup here, before the scheduler
    // ever runs.
    let domains = zonedrift_core::parse_domains(
        &config.noop_records,
        zonedrift_provider_noop::PROVIDER_NAME,
    )?;

    info!(
        domains = domains.len(),
        records = config.noop_records.len(),
        "registering no-op provider"
    );
    updater.register_provider(Arc::new(NoopProvider::new()));
    updater.register_domains(domains);

    let checker = HttpIpChecker::new(&config.endpoint);
    let mut runner = Runner::new(Box::new(checker), updater);

    info!(
        endpoint = %config.endpoint,
        interval_secs = config.interval_secs,
        "started"
    );

    let mut interval = tokio::time::interval(Duration::from_secs(config.interval_secs));
    // A slow endpoint delays the next tick instead of bursting catch-up
    // ticks afterwards.
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    run_until_shutdown(&mut runner, &mut interval).await?;

    runner.stop().await;
    info!("stopped");

    Ok(())
}

/// Drive the runner on the interval until a shutdown signal arrives
#[cfg(unix)]
async fn run_until_shutdown(
    runner: &mut Runner,
    interval: &mut tokio::time::Interval,
) -> Result<()> {
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("failed to setup SIGTERM handler: {e}"))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("failed to setup SIGINT handler: {e}"))?;

    loop {
        tokio::select! {
            _ = interval.tick() => runner.run_once().await,
            _ = sigterm.recv() => {
                info!("received SIGTERM");
                return Ok(());
            }
            _ = sigint.recv() => {
                info!("received SIGINT");
                return Ok(());
            }
        }
    }
}

/// Fallback for non-Unix platforms: CTRL-C only
#[cfg(not(unix))]
async fn run_until_shutdown(
    runner: &mut Runner,
    interval: &mut tokio::time::Interval,
) -> Result<()> {
    loop {
        tokio::select! {
            _ = interval.tick() => runner.run_once().await,
            result = tokio::signal::ctrl_c() => {
                result.map_err(|e| anyhow::anyhow!("failed to wait for CTRL-C: {e}"))?;
                info!("received CTRL-C");
                return Ok(());
            }
        }
    }
}
