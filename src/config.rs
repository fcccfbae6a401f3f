use clap::Parser;
use std::time::Duration;

use crate::error::{ApiError, Result};
use crate::logging::{LogFormat, LogLevel};
use crate::models::ResourceKind;

const HOUR: u64 = 60 * 60;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "nfl-data-api",
    version = env!("CARGO_PKG_VERSION"),
    about = "Caching HTTP gateway for SportsRadar NFL data",
    long_about = None
)]
pub struct Settings {
    #[arg(long, env = "SPORTSRADAR_API_KEY", hide_env_values = true, help = "SportsRadar API key")]
    pub api_key: String,

    #[arg(
        long,
        env = "NFL_BASE_URL",
        help = "SportsRadar NFL base URL, e.g. https://api.sportradar.com/nfl/official/trial/v7"
    )]
    pub base_url: String,

    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true, help = "Groq API key for /query")]
    pub groq_api_key: Option<String>,

    #[arg(short = 'H', long, default_value = "127.0.0.1", help = "Address to bind")]
    pub host: String,

    #[arg(short, long, default_value = "8000", help = "Port to bind")]
    pub port: u16,

    #[arg(long, default_value = "30", help = "Timeout for upstream requests, in seconds")]
    pub upstream_timeout_secs: u64,

    #[arg(long, default_value = "2023", help = "Season used by the query assistant")]
    pub default_season: u16,

    #[command(flatten)]
    pub ttl: TtlArgs,

    #[arg(short, long, default_value = "info", value_enum, help = "Logging level")]
    pub log_level: LogLevel,

    #[arg(long, default_value = "pretty", value_enum, help = "Log output format")]
    pub log_format: LogFormat,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ApiError::Configuration(
                "SPORTSRADAR_API_KEY must not be empty".into(),
            ));
        }
        if self.base_url.trim().is_empty() {
            return Err(ApiError::Configuration("NFL_BASE_URL must not be empty".into()));
        }
        if self.upstream_timeout_secs == 0 {
            return Err(ApiError::Configuration(
                "upstream timeout must be at least one second".into(),
            ));
        }
        Ok(())
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

/// Per-resource cache lifetimes, in seconds.
#[derive(clap::Args, Debug, Clone)]
pub struct TtlArgs {
    #[arg(long = "ttl-hierarchy", default_value_t = 24 * HOUR)]
    pub hierarchy: u64,

    #[arg(long = "ttl-schedule", default_value_t = 12 * HOUR)]
    pub schedule: u64,

    #[arg(long = "ttl-team-profile", default_value_t = 24 * HOUR)]
    pub team_profile: u64,

    #[arg(long = "ttl-player-profile", default_value_t = 24 * HOUR)]
    pub player_profile: u64,

    #[arg(long = "ttl-boxscore", default_value_t = HOUR)]
    pub boxscore: u64,

    #[arg(long = "ttl-standings", default_value_t = HOUR)]
    pub standings: u64,

    #[arg(long = "ttl-injuries", default_value_t = HOUR)]
    pub injuries: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheTtls {
    pub hierarchy: Duration,
    pub schedule: Duration,
    pub team_profile: Duration,
    pub player_profile: Duration,
    pub boxscore: Duration,
    pub standings: Duration,
    pub injuries: Duration,
}

impl CacheTtls {
    pub fn for_kind(&self, kind: ResourceKind) -> Duration {
        match kind {
            ResourceKind::Hierarchy => self.hierarchy,
            ResourceKind::Schedule => self.schedule,
            ResourceKind::TeamProfile => self.team_profile,
            ResourceKind::PlayerProfile => self.player_profile,
            ResourceKind::Boxscore => self.boxscore,
            ResourceKind::Standings => self.standings,
            ResourceKind::WeeklyInjuries => self.injuries,
        }
    }

    /// Same lifetime for every resource kind.
    pub fn uniform(ttl: Duration) -> Self {
        Self {
            hierarchy: ttl,
            schedule: ttl,
            team_profile: ttl,
            player_profile: ttl,
            boxscore: ttl,
            standings: ttl,
            injuries: ttl,
        }
    }
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            hierarchy: Duration::from_secs(24 * HOUR),
            schedule: Duration::from_secs(12 * HOUR),
            team_profile: Duration::from_secs(24 * HOUR),
            player_profile: Duration::from_secs(24 * HOUR),
            boxscore: Duration::from_secs(HOUR),
            standings: Duration::from_secs(HOUR),
            injuries: Duration::from_secs(HOUR),
        }
    }
}

impl From<&TtlArgs> for CacheTtls {
    fn from(args: &TtlArgs) -> Self {
        Self {
            hierarchy: Duration::from_secs(args.hierarchy),
            schedule: Duration::from_secs(args.schedule),
            team_profile: Duration::from_secs(args.team_profile),
            player_profile: Duration::from_secs(args.player_profile),
            boxscore: Duration::from_secs(args.boxscore),
            standings: Duration::from_secs(args.standings),
            injuries: Duration::from_secs(args.injuries),
        }
    }
}
