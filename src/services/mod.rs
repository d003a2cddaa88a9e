// Verifact Core Services
// Text features, classifier lifecycle and the analysis engine

pub mod text_processor;
pub mod stemmer;
pub mod sentiment;
pub mod config;
pub mod classifier;
pub mod detection;
pub mod engine;

pub use config::{ClassifierConfig, EngineConfig, ScoringWeights};
pub use classifier::{ClassifierAdapter, ClassifierError, ClassifierState};
pub use engine::{AnalysisError, CredibilityEngine};
pub use sentiment::score_sentiment;
