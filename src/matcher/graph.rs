use ahash::AHashMap;

use crate::error::{Error, Result};
use crate::types::ClusterId;

/// Quote -> cluster edges, kept in insertion order.
#[derive(Debug, Default)]
pub struct BipartiteGraph {
    edges: Vec<(String, ClusterId)>,
    index: AHashMap<String, usize>,
}

impl BipartiteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `quote_id` to `cluster_id`.
    ///
    /// Every attributed quote gets exactly one edge, so a quote id seen twice
    /// means ids are not unique upstream and fails with
    /// [`Error::DuplicateEdge`], even when the cluster is the same.
    pub fn add_edge(&mut self, quote_id: impl Into<String>, cluster_id: ClusterId) -> Result<()> {
        let quote_id = quote_id.into();
        if let Some(&slot) = self.index.get(&quote_id) {
            return Err(Error::DuplicateEdge {
                quote_id,
                existing: self.edges[slot].1,
                attempted: cluster_id,
            });
        }

        self.index.insert(quote_id.clone(), self.edges.len());
        self.edges.push((quote_id, cluster_id));
        Ok(())
    }

    pub fn cluster_of(&self, quote_id: &str) -> Option<ClusterId> {
        self.index.get(quote_id).map(|&slot| self.edges[slot].1)
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, ClusterId)> + '_ {
        self.edges.iter().map(|(quote_id, cluster_id)| (quote_id.as_str(), *cluster_id))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_keep_insertion_order() {
        let mut graph = BipartiteGraph::new();
        graph.add_edge("1_4", 0).unwrap();
        graph.add_edge("1_2", 1).unwrap();
        graph.add_edge("0_9", 0).unwrap();
        let edges: Vec<(&str, ClusterId)> = graph.edges().collect();
        assert_eq!(edges, vec![("1_4", 0), ("1_2", 1), ("0_9", 0)]);
        assert_eq!(graph.cluster_of("1_2"), Some(1));
    }

    #[test]
    fn same_edge_twice_fails() {
        let mut graph = BipartiteGraph::new();
        graph.add_edge("1_4", 3).unwrap();
        let err = graph.add_edge("1_4", 3).unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateEdge { existing: 3, attempted: 3, .. }
        ));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn remapping_a_quote_fails() {
        let mut graph = BipartiteGraph::new();
        graph.add_edge("1_4", 3).unwrap();
        let err = graph.add_edge("1_4", 5).unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateEdge { existing: 3, attempted: 5, .. }
        ));
        assert_eq!(graph.cluster_of("1_4"), Some(3));
    }
}
