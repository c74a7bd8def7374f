//! discours attributes quotes found in press articles to the political
//! speeches they come from, then groups quotes restating the same passage of
//! a speech into clusters.
//!
//! A run reads a speaker's speech table and a quote table, attributes each
//! quote to the best-matching speech delivered in the days before it, and
//! writes a quote -> cluster edge table and a cluster table.

// Module declarations
pub mod error;
pub mod parser;
pub mod storage;
pub mod matcher;
pub mod utils;
pub mod config;
pub mod types;

// Re-exports
pub use error::{Error, Result};
pub use matcher::{
    BipartiteGraph, ClusterStore, DiscourseIndex, MatchOutcome, MatchStats, MatchingPipeline,
};
pub use types::{AttributedQuote, ClusterId, QuoteRecord, SpeechId, SpeechRecord};

// Re-export the config from config module
pub use config::DiscoursConfig;
