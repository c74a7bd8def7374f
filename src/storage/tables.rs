// storage/tables.rs

use std::fs::File;
use std::io::{BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;

use crate::error::Result;
use crate::matcher::cluster::ClusterStore;
use crate::matcher::graph::BipartiteGraph;

pub const EDGE_TABLE_HEADER: [&str; 2] = ["source", "cluster_id"];

pub const CLUSTER_TABLE_HEADER: [&str; 8] = [
    "cluster_id",
    "discourse_id",
    "match",
    "#quotes",
    "urls",
    "titles",
    "dates",
    "ids",
];

/// Row-typed CSV table written batch by batch.
///
/// The header comes from the row type and is written with the first row.
pub struct TableWriter<T: Serialize> {
    writer: csv::Writer<BufWriter<File>>,
    path: PathBuf,
    _row: PhantomData<T>,
}

impl<T: Serialize> TableWriter<T> {
    /// Truncate `path` and start a new table.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path.as_ref())?;
        let writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(BufWriter::new(file));
        Ok(Self {
            writer,
            path: path.as_ref().to_path_buf(),
            _row: PhantomData,
        })
    }

    pub fn write_row(&mut self, row: &T) -> Result<()> {
        self.writer.serialize(row)?;
        Ok(())
    }

    /// Write a batch and flush it to disk, so a later failure leaves every
    /// completed batch readable.
    pub fn write_batch<'a, I>(&mut self, rows: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut written = 0;
        for row in rows {
            self.write_row(row)?;
            written += 1;
        }
        self.flush()?;
        debug!("Flushed {} rows to {}", written, self.path.display());
        Ok(written)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// `source,cluster_id`, one row per edge in insertion order.
pub fn write_edge_table<W: Write>(graph: &BipartiteGraph, out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);

    writer.write_record(EDGE_TABLE_HEADER)?;
    for (source, cluster_id) in graph.edges() {
        writer.write_record([source, cluster_id.to_string().as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

/// One row per cluster in id order; member lists are `/`-joined in insertion
/// order.
pub fn write_cluster_table<W: Write>(clusters: &ClusterStore, out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);

    writer.write_record(CLUSTER_TABLE_HEADER)?;
    for cluster in clusters.iter() {
        writer.write_record([
            cluster.id().to_string(),
            cluster.discourse().to_string(),
            cluster.display_match().to_string(),
            cluster.len().to_string(),
            cluster.urls().join("/"),
            cluster.titles().join("/"),
            cluster.dates().join("/"),
            cluster.origin_ids().join("/"),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write both result tables to their files, replacing previous runs.
pub fn write_outputs(
    graph: &BipartiteGraph,
    clusters: &ClusterStore,
    graph_path: &Path,
    clusters_path: &Path,
) -> Result<()> {
    for path in [graph_path, clusters_path] {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
    }

    write_edge_table(graph, BufWriter::new(File::create(graph_path)?))?;
    info!("Wrote {} edges to {}", graph.len(), graph_path.display());

    write_cluster_table(clusters, BufWriter::new(File::create(clusters_path)?))?;
    info!("Wrote {} clusters to {}", clusters.len(), clusters_path.display());
    Ok(())
}
