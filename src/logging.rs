use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Verbosity applied to this crate's own spans and events.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Multi-line output with source locations, for local runs
    Pretty,
    /// One JSON object per event, for log shippers
    Json,
    /// One line per event
    Compact,
}

/// Installs the global subscriber. `RUST_LOG` directives are kept and the
/// crate's own level is set from `level`.
pub fn init_tracing(level: LogLevel, format: LogFormat) {
    let level = level.as_tracing_level();
    let mut filter = EnvFilter::from_default_env();
    for directive in [
        format!("nfl_data_api={}", level),
        format!("tower_http={}", level),
        "hyper=warn".to_string(),
        "reqwest=warn".to_string(),
    ] {
        match directive.parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("Ignoring log directive {:?}: {}", directive, e),
        }
    }

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Pretty => registry.with(fmt::layer().pretty().with_file(true)).init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).init(),
    }
}
