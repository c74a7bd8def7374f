// storage/mod.rs

pub mod tables;

pub use self::tables::{
    write_cluster_table, write_edge_table, write_outputs, TableWriter, CLUSTER_TABLE_HEADER,
    EDGE_TABLE_HEADER,
};
