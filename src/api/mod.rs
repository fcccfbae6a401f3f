pub mod groq;
pub mod sportradar;

pub use groq::{ChatMessage, GroqApi, LanguageModel};
pub use sportradar::{NflUpstream, SportradarApi};
