use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

use crate::api::{ChatMessage, LanguageModel};
use crate::models::schemas::NflQueryResponse;
use crate::services::nfl_service::NflService;

lazy_static! {
    static ref YEAR_PATTERN: Regex = Regex::new(r"20\d{2}").expect("year pattern is valid");
}

const SYSTEM_PROMPT: &str = "You are an NFL analytics expert providing insights based on official NFL data. \
Focus on providing accurate, data-driven analysis in a conversational tone. \
When responding:\n\
1. Summarize key information from the data\n\
2. Provide relevant statistics\n\
3. Offer context about teams, players, or matchups\n\
4. Cite your sources as 'Based on official NFL data.'";

pub const FALLBACK_ANSWER: &str = "Sorry, I couldn't process your request at the moment.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    PlayerRankings,
    Matchups,
    Injuries,
    Schedule,
    DepthChart,
    General,
}

impl QueryType {
    pub fn data_sources(&self) -> Vec<String> {
        let source = match self {
            QueryType::PlayerRankings => "NFL team and player data",
            QueryType::Matchups => "NFL schedule data",
            QueryType::Injuries => "NFL injury reports",
            QueryType::Schedule => "NFL team schedules",
            QueryType::DepthChart => "NFL team rosters",
            QueryType::General => "NFL general data",
        };
        vec![source.to_string()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub query_type: QueryType,
    pub year: Option<u16>,
}

/// Keyword classification; the first matching group wins.
pub fn classify_query(query: &str) -> Classification {
    let query = query.to_lowercase();
    let mentions = |terms: &[&str]| terms.iter().any(|term| query.contains(term));

    let query_type = if mentions(&["ranking", "rank", "best", "top", "projections"]) {
        QueryType::PlayerRankings
    } else if mentions(&["matchup", "vs", "versus", "against", "playing"]) {
        QueryType::Matchups
    } else if mentions(&["injury", "injured", "hurt"]) {
        QueryType::Injuries
    } else if mentions(&["schedule", "games", "playing"]) {
        QueryType::Schedule
    } else if mentions(&["depth chart", "roster", "lineup"]) {
        QueryType::DepthChart
    } else {
        QueryType::General
    };

    let year = match query_type {
        QueryType::Injuries => YEAR_PATTERN
            .find(&query)
            .and_then(|m| m.as_str().parse().ok()),
        _ => None,
    };

    Classification { query_type, year }
}

// Empty payloads add nothing to the prompt.
fn has_context(context: &Value) -> bool {
    match context {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
    }
}

/// Answers free-form questions using cached NFL data as LLM context.
pub struct NflQueryService {
    nfl: Arc<NflService>,
    llm: Arc<dyn LanguageModel>,
    default_season: u16,
}

impl NflQueryService {
    pub fn new(nfl: Arc<NflService>, llm: Arc<dyn LanguageModel>, default_season: u16) -> Self {
        Self {
            nfl,
            llm,
            default_season,
        }
    }

    pub async fn process_query(&self, query: &str) -> NflQueryResponse {
        let classification = classify_query(query);
        info!("Classified query as {:?}", classification.query_type);

        let context = self.fetch_relevant_data(&classification).await;
        let answer = self.generate_answer(query, &context).await;

        NflQueryResponse {
            query: query.to_string(),
            answer,
            data_sources: classification.query_type.data_sources(),
        }
    }

    async fn fetch_relevant_data(&self, classification: &Classification) -> Value {
        let season = self.default_season;
        let result = match classification.query_type {
            QueryType::Matchups | QueryType::Schedule => self.nfl.get_schedule(season, "REG").await,
            QueryType::Injuries => {
                let year = classification.year.unwrap_or(season);
                self.nfl.get_weekly_injuries(year, "REG", "1").await
            }
            QueryType::PlayerRankings | QueryType::DepthChart | QueryType::General => {
                self.nfl.get_teams().await
            }
        };

        result.unwrap_or_else(|e| {
            error!("Error fetching relevant data: {}", e);
            json!({ "error": e.to_string() })
        })
    }

    async fn generate_answer(&self, query: &str, context: &Value) -> String {
        let mut messages = vec![ChatMessage::system(SYSTEM_PROMPT)];
        if has_context(context) {
            messages.push(ChatMessage::system(format!(
                "Here is the relevant NFL data:\n{}",
                context
            )));
        }
        messages.push(ChatMessage::user(query));

        match self.llm.complete(&messages).await {
            Ok(answer) => answer,
            Err(e) => {
                error!("Error generating response: {}", e);
                FALLBACK_ANSWER.to_string()
            }
        }
    }
}
