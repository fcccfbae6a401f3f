use std::fmt;

use crate::error::{ApiError, Result};

/// Kinds of upstream resources; each kind has its own TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Hierarchy,
    Schedule,
    TeamProfile,
    PlayerProfile,
    Boxscore,
    Standings,
    WeeklyInjuries,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Hierarchy => "hierarchy",
            ResourceKind::Schedule => "schedule",
            ResourceKind::TeamProfile => "team_profile",
            ResourceKind::PlayerProfile => "player_profile",
            ResourceKind::Boxscore => "boxscore",
            ResourceKind::Standings => "standings",
            ResourceKind::WeeklyInjuries => "weekly_injuries",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logical request against the upstream provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Hierarchy,
    Schedule { year: u16, season_type: String },
    TeamProfile { team_id: String },
    PlayerProfile { player_id: String },
    Boxscore { game_id: String },
    Standings { year: u16, season_type: String },
    WeeklyInjuries { year: u16, season_type: String, week: String },
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Hierarchy => ResourceKind::Hierarchy,
            Resource::Schedule { .. } => ResourceKind::Schedule,
            Resource::TeamProfile { .. } => ResourceKind::TeamProfile,
            Resource::PlayerProfile { .. } => ResourceKind::PlayerProfile,
            Resource::Boxscore { .. } => ResourceKind::Boxscore,
            Resource::Standings { .. } => ResourceKind::Standings,
            Resource::WeeklyInjuries { .. } => ResourceKind::WeeklyInjuries,
        }
    }

    /// Path segments below the provider base URL; the last one takes the
    /// `.json` suffix.
    pub fn segments(&self) -> Vec<String> {
        match self {
            Resource::Hierarchy => owned(&["en", "league", "hierarchy"]),
            Resource::Schedule { year, season_type } => {
                owned(&["en", "games", &year.to_string(), season_type, "schedule"])
            }
            Resource::TeamProfile { team_id } => owned(&["en", "teams", team_id, "profile"]),
            Resource::PlayerProfile { player_id } => owned(&["en", "players", player_id, "profile"]),
            Resource::Boxscore { game_id } => owned(&["en", "games", game_id, "boxscore"]),
            Resource::Standings { year, season_type } => owned(&[
                "en",
                "seasons",
                &year.to_string(),
                season_type,
                "standings",
                "season",
            ]),
            Resource::WeeklyInjuries {
                year,
                season_type,
                week,
            } => owned(&["en", "seasons", &year.to_string(), season_type, week, "injuries"]),
        }
    }

    /// Path below the provider base URL, without the `.json` suffix.
    pub fn endpoint(&self) -> String {
        self.segments().join("/")
    }

    /// Rejects caller-supplied parameters that would not stay inside a
    /// single path segment.
    pub fn validate(&self) -> Result<()> {
        let params: Vec<(&'static str, &str)> = match self {
            Resource::Hierarchy => Vec::new(),
            Resource::Schedule { season_type, .. } | Resource::Standings { season_type, .. } => {
                vec![("season_type", season_type)]
            }
            Resource::TeamProfile { team_id } => vec![("team_id", team_id)],
            Resource::PlayerProfile { player_id } => vec![("player_id", player_id)],
            Resource::Boxscore { game_id } => vec![("game_id", game_id)],
            Resource::WeeklyInjuries {
                season_type, week, ..
            } => vec![("season_type", season_type), ("week", week)],
        };

        for (name, value) in params {
            if !is_path_segment(value) {
                return Err(ApiError::InvalidParameter {
                    name,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Deterministic cache key, e.g. `schedule:2024:REG`.
    pub fn cache_key(&self) -> String {
        let params: Vec<String> = match self {
            Resource::Hierarchy => Vec::new(),
            Resource::Schedule { year, season_type } | Resource::Standings { year, season_type } => {
                vec![year.to_string(), escape_segment(season_type)]
            }
            Resource::TeamProfile { team_id } => vec![escape_segment(team_id)],
            Resource::PlayerProfile { player_id } => vec![escape_segment(player_id)],
            Resource::Boxscore { game_id } => vec![escape_segment(game_id)],
            Resource::WeeklyInjuries {
                year,
                season_type,
                week,
            } => vec![
                year.to_string(),
                escape_segment(season_type),
                escape_segment(week),
            ],
        };

        let mut key = self.kind().as_str().to_string();
        for param in params {
            key.push(':');
            key.push_str(&param);
        }
        key
    }
}

fn owned(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|part| part.to_string()).collect()
}

pub(crate) fn is_path_segment(value: &str) -> bool {
    !value.is_empty()
        && value != "."
        && value != ".."
        && !value
            .chars()
            .any(|c| matches!(c, '/' | '\\' | '?' | '#') || c.is_control())
}

// Separators inside caller-supplied segments must not shift field boundaries.
fn escape_segment(segment: &str) -> String {
    segment.replace('%', "%25").replace(':', "%3A")
}
