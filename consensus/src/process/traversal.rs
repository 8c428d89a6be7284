//! DAG topology and selected-chain traversal over the staged stores.
//!
//! All queries read the locally computed GHOSTDAG data. The origin sentinel is
//! treated as the root of every block: it is an ancestor of, and on the selected
//! chain of, any block.

use std::collections::VecDeque;

use consensus_core::{
    blockhash::BlockHashExtensions,
    ghostdag::{DataOrigin, GhostdagData},
    BlockHashSet, BlueWorkType, Hash,
};
use database::{
    stores::{GhostdagStore, RelationsStore},
    StagingArea,
};
use tracing::trace;

use crate::errors::{ConsensusResult, StoreResultContext};

const STAGE: &str = "dag traversal";

/// Ancestry queries
pub trait DagTopology {
    /// Whether `ancestor` is in the past of `descendant`. A block is considered its own ancestor.
    fn is_ancestor_of(&self, staging: &StagingArea, ancestor: Hash, descendant: Hash) -> ConsensusResult<bool>;

    fn is_ancestor_of_any(&self, staging: &StagingArea, ancestor: Hash, candidates: &[Hash]) -> ConsensusResult<bool> {
        for &candidate in candidates {
            if self.is_ancestor_of(staging, ancestor, candidate)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether `block` lies on the selected parent chain of `other` (inclusive)
    fn is_in_selected_parent_chain_of(&self, staging: &StagingArea, block: Hash, other: Hash) -> ConsensusResult<bool>;
}

/// Selected-chain walks
pub trait DagTraversal {
    /// Walks the selected chain down from `high` and returns the first block whose blue
    /// score is below `blue_score(high) - depth`, or genesis if the walk reaches it first.
    fn block_at_depth(&self, staging: &StagingArea, high: Hash, depth: u64) -> ConsensusResult<Hash>;
}

#[derive(Clone)]
pub struct DagTopologyManager {
    ghostdag_store: GhostdagStore,
    relations_store: RelationsStore,
}

impl DagTopologyManager {
    pub fn new(ghostdag_store: GhostdagStore, relations_store: RelationsStore) -> Self {
        Self { ghostdag_store, relations_store }
    }

    fn ghostdag_data(&self, staging: &StagingArea, hash: Hash) -> ConsensusResult<GhostdagData> {
        self.ghostdag_store.get(staging, hash, DataOrigin::Local).context(STAGE, hash)
    }

    fn blue_score(&self, staging: &StagingArea, hash: Hash) -> ConsensusResult<u64> {
        self.ghostdag_store.get_blue_score(staging, hash).context(STAGE, hash)
    }

    fn blue_work(&self, staging: &StagingArea, hash: Hash) -> ConsensusResult<BlueWorkType> {
        self.ghostdag_store.get_blue_work(staging, hash).context(STAGE, hash)
    }

    /// Iterates the selected chain from `high` (inclusive) down to genesis
    pub fn selected_chain_iter<'a>(&'a self, staging: &'a StagingArea, high: Hash) -> SelectedChainIterator<'a> {
        SelectedChainIterator { manager: self, staging, next: Some(high) }
    }
}

impl DagTopology for DagTopologyManager {
    fn is_ancestor_of(&self, staging: &StagingArea, ancestor: Hash, descendant: Hash) -> ConsensusResult<bool> {
        if ancestor == descendant || ancestor.is_origin() {
            return Ok(true);
        }
        if descendant.is_origin() {
            return Ok(false);
        }

        // A child's blue work is at least that of its heaviest parent, so no block lighter
        // than the ancestor can have it in its past. Blue score gives no such bound: a merged
        // parent may outscore its child.
        let ancestor_work = self.blue_work(staging, ancestor)?;
        if self.blue_work(staging, descendant)? < ancestor_work {
            return Ok(false);
        }

        let mut visited = BlockHashSet::new();
        let mut queue = VecDeque::from([descendant]);
        visited.insert(descendant);
        while let Some(current) = queue.pop_front() {
            for parent in self.relations_store.get_parents(staging, current).context(STAGE, current)? {
                if parent == ancestor {
                    return Ok(true);
                }
                if !visited.insert(parent) {
                    continue;
                }
                if self.blue_work(staging, parent)? >= ancestor_work {
                    queue.push_back(parent);
                }
            }
        }
        trace!("{} is not an ancestor of {} ({} blocks visited)", ancestor, descendant, visited.len());
        Ok(false)
    }

    fn is_in_selected_parent_chain_of(&self, staging: &StagingArea, block: Hash, other: Hash) -> ConsensusResult<bool> {
        if block.is_origin() || block == other {
            return Ok(true);
        }
        let block_score = self.blue_score(staging, block)?;
        for current in self.selected_chain_iter(staging, other) {
            let current = current?;
            if current == block {
                return Ok(true);
            }
            // Blue score strictly decreases down the selected chain
            if self.blue_score(staging, current)? < block_score {
                break;
            }
        }
        Ok(false)
    }
}

impl DagTraversal for DagTopologyManager {
    fn block_at_depth(&self, staging: &StagingArea, high: Hash, depth: u64) -> ConsensusResult<Hash> {
        let high_data = self.ghostdag_data(staging, high)?;
        let required_blue_score = high_data.blue_score.saturating_sub(depth);

        let mut current = high;
        let mut current_data = high_data;
        while current_data.blue_score >= required_blue_score && !current_data.is_genesis() {
            current = current_data.selected_parent;
            current_data = self.ghostdag_data(staging, current)?;
        }
        Ok(current)
    }
}

/// Yields `Err` at most once, after which it is exhausted
pub struct SelectedChainIterator<'a> {
    manager: &'a DagTopologyManager,
    staging: &'a StagingArea,
    next: Option<Hash>,
}

impl Iterator for SelectedChainIterator<'_> {
    type Item = ConsensusResult<Hash>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        match self.manager.ghostdag_data(self.staging, current) {
            Ok(data) => {
                if !data.is_genesis() {
                    self.next = Some(data.selected_parent);
                }
                Some(Ok(current))
            }
            Err(err) => Some(Err(err)),
        }
    }
}
