pub mod similarity;
pub mod discourse;
pub mod cluster;
pub mod graph;
pub mod pipeline;
// Re-export the main types
pub use self::similarity::{partial_ratio, longest_common_substring, PreparedText};
pub use self::discourse::DiscourseIndex;
pub use self::cluster::{ClusterStore, QuoteCluster};
pub use self::graph::BipartiteGraph;
pub use self::pipeline::{
    extract_quotes,
    ExtractionStats,
    MatchOutcome,
    MatchStats,
    MatchingPipeline,
};
