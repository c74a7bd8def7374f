use ahash::AHashMap;
use log::{debug, trace};

use crate::error::{Error, Result};
use crate::types::{ClusterId, QuoteRecord, SpeechId};
use super::QuoteCluster;

/// Arena of quote clusters with a discourse -> cluster ids side index.
///
/// Cluster ids are dense and start at the store's offset, so independent
/// stores (one per worker) can be built with disjoint ranges and absorbed back
/// into a single store in id order.
#[derive(Debug, Default)]
pub struct ClusterStore {
    offset: ClusterId,
    clusters: Vec<QuoteCluster>,
    by_discourse: AHashMap<SpeechId, Vec<ClusterId>>,
}

impl ClusterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose first cluster gets id `offset`.
    pub fn with_offset(offset: ClusterId) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Id the next created cluster will receive.
    pub fn next_id(&self) -> ClusterId {
        self.offset + self.clusters.len()
    }

    pub fn get(&self, id: ClusterId) -> Option<&QuoteCluster> {
        id.checked_sub(self.offset).and_then(|slot| self.clusters.get(slot))
    }

    fn get_mut(&mut self, id: ClusterId) -> Option<&mut QuoteCluster> {
        id.checked_sub(self.offset).and_then(move |slot| self.clusters.get_mut(slot))
    }

    /// Clusters in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &QuoteCluster> + '_ {
        self.clusters.iter()
    }

    pub fn cluster_ids_for(&self, discourse: SpeechId) -> &[ClusterId] {
        self.by_discourse.get(&discourse).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Join `quote` to the first cluster of `discourse`, in creation order,
    /// holding a member that shares more than `min_common_len` contiguous
    /// characters with it. The shared substring is offered to the cluster's
    /// match. Returns `None` when no cluster qualifies.
    pub fn try_assign(
        &mut self,
        quote: &QuoteRecord,
        discourse: SpeechId,
        min_common_len: usize,
    ) -> Option<ClusterId> {
        let quote_chars: Vec<char> = quote.text.chars().collect();

        let (cluster_id, common) = self.cluster_ids_for(discourse).iter().find_map(|&id| {
            self.get(id)
                .and_then(|cluster| cluster.common_substring_with(&quote.text, &quote_chars, min_common_len))
                .map(|common| (id, common))
        })?;

        let cluster = self.get_mut(cluster_id)?;
        trace!("Quote {} joins cluster {} on {:?}", quote.id, cluster_id, common);
        cluster.add_match(&common);
        cluster.add_quote(quote.clone());
        Some(cluster_id)
    }

    /// New cluster of `discourse` seeded with `quote` as its sole member.
    pub fn create_cluster(&mut self, quote: QuoteRecord, discourse: SpeechId) -> ClusterId {
        let id = self.next_id();
        trace!("Quote {} opens cluster {} for discourse {}", quote.id, id, discourse);
        self.clusters.push(QuoteCluster::new(id, quote, discourse));
        self.by_discourse.entry(discourse).or_default().push(id);
        id
    }

    /// `try_assign`, falling back to `create_cluster`. The flag tells whether
    /// a new cluster was created.
    pub fn assign_or_create(
        &mut self,
        quote: QuoteRecord,
        discourse: SpeechId,
        min_common_len: usize,
    ) -> (ClusterId, bool) {
        match self.try_assign(&quote, discourse, min_common_len) {
            Some(id) => (id, false),
            None => (self.create_cluster(quote, discourse), true),
        }
    }

    /// Shift every id of this store so the first cluster gets `offset`.
    pub fn rebase(&mut self, offset: ClusterId) {
        let old = self.offset;
        if offset == old {
            return;
        }
        for (slot, cluster) in self.clusters.iter_mut().enumerate() {
            cluster.renumber(offset + slot);
        }
        for ids in self.by_discourse.values_mut() {
            for id in ids.iter_mut() {
                *id = *id - old + offset;
            }
        }
        self.offset = offset;
    }

    /// Append the clusters of `other`, whose ids must continue this store's.
    pub fn absorb(&mut self, other: ClusterStore) -> Result<()> {
        if other.is_empty() {
            return Ok(());
        }
        if other.offset != self.next_id() {
            return Err(Error::cluster_store(format!(
                "cannot absorb clusters starting at {} into a store ending at {}",
                other.offset,
                self.next_id()
            )));
        }

        debug!("Absorbing {} clusters starting at id {}", other.len(), other.offset);
        for (discourse, ids) in other.by_discourse {
            self.by_discourse.entry(discourse).or_default().extend(ids);
        }
        self.clusters.extend(other.clusters);
        Ok(())
    }
}
