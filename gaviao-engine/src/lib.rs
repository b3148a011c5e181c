//! Moteur d'analyse d'une suite de résultats ternaires (Casa, Visitante, Égalité).

pub mod assessment;
pub mod classifier;
pub mod config;
pub mod history;
pub mod manipulation;
pub mod outcome;
pub mod patterns;
pub mod prediction;
pub mod recommendation;
pub mod session;
pub mod signals;
pub mod streak;
pub mod window;

pub use assessment::Assessment;
pub use classifier::{Classification, PatternCategory, SuggestedAction, Suggestion, classify};
pub use config::EngineConfig;
pub use outcome::{Outcome, format_sequence, parse_sequence};
pub use recommendation::Recommendation;
pub use session::Session;
