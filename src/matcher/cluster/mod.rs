// cluster/mod.rs
pub mod quote_cluster;
pub mod store;

// Re-export the main structs to keep the public API flat
pub use self::quote_cluster::QuoteCluster;
pub use self::store::ClusterStore;
