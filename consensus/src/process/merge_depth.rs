//! Bounded merge depth: a block may only merge blocks that are in the future of
//! its merge depth root, or in the past of a blue block whose selected chain
//! passes through that root ("kosherizing" blues).

use consensus_core::{
    blockhash::{ORIGIN, VIRTUAL},
    errors::RuleError,
    ghostdag::{DataOrigin, GhostdagData},
    Hash,
};
use database::{
    stores::{GhostdagStore, MergeDepthRootStore},
    StagingArea, StoreResultExtensions,
};
use tracing::{debug, warn};

use super::traversal::{DagTopology, DagTraversal};
use crate::errors::{ConsensusResult, StoreResultContext};

const STAGE: &str = "merge depth";

#[derive(Clone)]
pub struct MergeDepthManager<T: DagTopology + DagTraversal> {
    merge_depth: u64,
    genesis_hash: Hash,
    ghostdag_store: GhostdagStore,
    merge_depth_root_store: MergeDepthRootStore,
    traversal: T,
}

impl<T: DagTopology + DagTraversal> MergeDepthManager<T> {
    pub fn new(
        merge_depth: u64,
        genesis_hash: Hash,
        ghostdag_store: GhostdagStore,
        merge_depth_root_store: MergeDepthRootStore,
        traversal: T,
    ) -> Self {
        Self { merge_depth, genesis_hash, ghostdag_store, merge_depth_root_store, traversal }
    }

    fn ghostdag_data(&self, staging: &StagingArea, hash: Hash) -> ConsensusResult<GhostdagData> {
        self.ghostdag_store.get(staging, hash, DataOrigin::Local).context(STAGE, hash)
    }

    /// Rejects `block` if it merges a block that is neither in the future of its merge
    /// depth root nor in the past of one of its kosherizing blues
    pub fn check_bounded_merge_depth(&self, staging: &mut StagingArea, block: Hash, is_trusted: bool) -> ConsensusResult<()> {
        let ghostdag_data = self.ghostdag_data(staging, block)?;
        if ghostdag_data.is_genesis() {
            return Ok(());
        }

        let root = self.merge_depth_root(staging, block, is_trusted)?;
        let kosherizing_blues = self.kosherizing_blues(staging, &ghostdag_data, root)?;

        for merged in ghostdag_data.unordered_mergeset_without_selected_parent() {
            if self.traversal.is_ancestor_of(staging, root, merged)? {
                continue;
            }
            if self.traversal.is_ancestor_of_any(staging, merged, &kosherizing_blues)? {
                continue;
            }
            warn!("block {} violates bounded merge depth: merged block {} is beyond merge depth root {}", block, merged, root);
            return Err(RuleError::ViolatingBoundedMergeDepth(block, merged, root).into());
        }
        Ok(())
    }

    /// The blues in the merge set of `block` whose selected chain contains `merge_depth_root`
    pub fn non_bounded_merge_depth_violating_blues(
        &self,
        staging: &StagingArea,
        block: Hash,
        merge_depth_root: Hash,
    ) -> ConsensusResult<Vec<Hash>> {
        let ghostdag_data = self.ghostdag_data(staging, block)?;
        self.kosherizing_blues(staging, &ghostdag_data, merge_depth_root)
    }

    fn kosherizing_blues(&self, staging: &StagingArea, ghostdag_data: &GhostdagData, root: Hash) -> ConsensusResult<Vec<Hash>> {
        let mut blues = Vec::new();
        for &blue in ghostdag_data.mergeset_blues.iter() {
            if self.traversal.is_in_selected_parent_chain_of(staging, root, blue)? {
                blues.push(blue);
            }
        }
        Ok(blues)
    }

    /// Merge depth root of the virtual block, the reference point for new block templates
    pub fn virtual_merge_depth_root(&self, staging: &StagingArea) -> ConsensusResult<Hash> {
        self.calculate_merge_depth_root(staging, VIRTUAL)
    }

    /// Returns the stored merge depth root of `block`, calculating and staging it on first use.
    /// Blocks with trusted data are rooted at the origin.
    pub fn merge_depth_root(&self, staging: &mut StagingArea, block: Hash, is_trusted: bool) -> ConsensusResult<Hash> {
        if is_trusted {
            return Ok(ORIGIN);
        }
        if let Some(root) = self.merge_depth_root_store.get(staging, block).optional().context(STAGE, block)? {
            return Ok(root);
        }

        let root = self.calculate_merge_depth_root(staging, block)?;
        self.merge_depth_root_store.stage(staging, block, root).context(STAGE, block)?;
        debug!("merge depth root of {} is {}", block, root);
        Ok(root)
    }

    fn calculate_merge_depth_root(&self, staging: &StagingArea, block: Hash) -> ConsensusResult<Hash> {
        let blue_score = self.ghostdag_store.get_blue_score(staging, block).context(STAGE, block)?;
        if blue_score < self.merge_depth {
            return Ok(self.genesis_hash);
        }
        self.traversal.block_at_depth(staging, block, self.merge_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConsensusError;
    use crate::process::traversal::DagTopologyManager;
    use crate::test_helpers::{hash, TestDag};

    const MERGE_DEPTH: u64 = 3;

    fn manager(dag: &TestDag) -> MergeDepthManager<DagTopologyManager> {
        let topology = DagTopologyManager::new(dag.stores.ghostdag.clone(), dag.stores.relations.clone());
        MergeDepthManager::new(MERGE_DEPTH, dag.genesis(), dag.stores.ghostdag.clone(), dag.stores.merge_depth_roots.clone(), topology)
    }

    /// A chain genesis <- 1 <- ... <- 10 (block i has blue score i) and a side block 101 on top of 1
    fn chain_dag() -> TestDag {
        let dag = TestDag::new();
        dag.add_chain_block(hash(1), dag.genesis());
        for i in 2..=10 {
            dag.add_chain_block(hash(i), hash(i - 1));
        }
        dag.add_chain_block(hash(101), hash(1));
        dag
    }

    #[test]
    fn test_merge_depth_root() {
        let dag = chain_dag();
        let manager = manager(&dag);
        let mut staging = StagingArea::new();

        assert_eq!(manager.merge_depth_root(&mut staging, hash(2), false).unwrap(), dag.genesis());
        assert_eq!(manager.merge_depth_root(&mut staging, hash(10), false).unwrap(), hash(6));
        assert_eq!(manager.merge_depth_root(&mut staging, hash(10), true).unwrap(), ORIGIN);

        // Calculated roots are staged, not committed
        assert_eq!(dag.stores.merge_depth_roots.get(&staging, hash(10)).unwrap(), hash(6));
        assert!(dag.stores.merge_depth_roots.get(&StagingArea::new(), hash(10)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_virtual_merge_depth_root() {
        let dag = chain_dag();
        let manager = manager(&dag);
        let mut staging = StagingArea::new();
        let virtual_data = GhostdagData::new_with_selected_parent(hash(10)).with_blue_score(11);
        dag.stores.ghostdag.stage(&mut staging, VIRTUAL, &virtual_data, DataOrigin::Local).unwrap();

        assert_eq!(manager.virtual_merge_depth_root(&staging).unwrap(), hash(7));
    }

    #[test]
    fn test_merging_a_deep_red_is_rejected() {
        let dag = chain_dag();
        dag.add_block(hash(20), &[hash(10), hash(101)], &[hash(101)]);
        let manager = manager(&dag);

        let mut staging = StagingArea::new();
        match manager.check_bounded_merge_depth(&mut staging, hash(20), false) {
            Err(ConsensusError::Rule(RuleError::ViolatingBoundedMergeDepth(block, merged, root))) => {
                assert_eq!((block, merged, root), (hash(20), hash(101), hash(7)));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(manager.non_bounded_merge_depth_violating_blues(&staging, hash(20), hash(7)).unwrap(), vec![hash(10)]);

        // Trusted blocks are rooted at the origin, which is in the past of everything
        let mut staging = StagingArea::new();
        manager.check_bounded_merge_depth(&mut staging, hash(20), true).unwrap();
    }

    #[test]
    fn test_merging_a_deep_blue_is_rejected() {
        let dag = chain_dag();
        dag.add_block(hash(20), &[hash(10), hash(101)], &[]);
        let manager = manager(&dag);

        let err = manager.check_bounded_merge_depth(&mut StagingArea::new(), hash(20), false).unwrap_err();
        assert!(matches!(err, ConsensusError::Rule(RuleError::ViolatingBoundedMergeDepth(_, merged, _)) if merged == hash(101)));
    }

    #[test]
    fn test_kosherizing_blue_allows_deep_red() {
        let dag = chain_dag();
        // 30 builds on 9 and merges the deep side block; its selected chain passes the root
        dag.add_block(hash(30), &[hash(9), hash(101)], &[hash(101)]);
        dag.add_block(hash(31), &[hash(10), hash(30)], &[hash(101)]);
        let manager = manager(&dag);

        let mut staging = StagingArea::new();
        manager.check_bounded_merge_depth(&mut staging, hash(31), false).unwrap();
        assert_eq!(dag.stores.merge_depth_roots.get(&staging, hash(31)).unwrap(), hash(8));
        assert_eq!(manager.non_bounded_merge_depth_violating_blues(&staging, hash(31), hash(8)).unwrap(), vec![hash(10), hash(30)]);
    }

    #[test]
    fn test_shallow_merge_and_genesis_pass() {
        let dag = chain_dag();
        dag.add_chain_block(hash(109), hash(8));
        dag.add_block(hash(20), &[hash(10), hash(109)], &[]);
        let manager = manager(&dag);

        manager.check_bounded_merge_depth(&mut StagingArea::new(), hash(20), false).unwrap();
        manager.check_bounded_merge_depth(&mut StagingArea::new(), dag.genesis(), false).unwrap();
    }

    #[test]
    fn test_merged_block_reaching_the_root_through_a_merged_parent() {
        // genesis <- 1 <- ... <- 10 with block i at blue score i and blue work 10i. The heavy side
        // block 50 sits on genesis and is merged (red) by 9. Block 60 builds on 50 and 8: its blue
        // score is far below the root's, yet 8 puts the root in its past.
        let dag = TestDag::new();
        dag.add_weighted_block(hash(1), &[dag.genesis()], &[], 1, 10);
        for i in 2..=8 {
            dag.add_weighted_block(hash(i), &[hash(i - 1)], &[], i, 10 * i);
        }
        dag.add_weighted_block(hash(50), &[dag.genesis()], &[], 1, 85);
        dag.add_weighted_block(hash(9), &[hash(8), hash(50)], &[hash(50)], 9, 90);
        dag.add_weighted_block(hash(10), &[hash(9)], &[], 10, 100);
        dag.add_weighted_block(hash(60), &[hash(50), hash(8)], &[hash(8)], 2, 86);
        dag.add_weighted_block(hash(70), &[hash(10), hash(60)], &[], 11, 101);
        let manager = manager(&dag);

        let mut staging = StagingArea::new();
        manager.check_bounded_merge_depth(&mut staging, hash(70), false).unwrap();
        assert_eq!(dag.stores.merge_depth_roots.get(&staging, hash(70)).unwrap(), hash(7));
        // 60 passes on its own past, not through a kosherizing blue
        assert_eq!(manager.non_bounded_merge_depth_violating_blues(&staging, hash(70), hash(7)).unwrap(), vec![hash(10)]);
    }

    #[test]
    fn test_missing_block_is_missing_data() {
        let dag = chain_dag();
        let manager = manager(&dag);
        let err = manager.check_bounded_merge_depth(&mut StagingArea::new(), hash(404), false).unwrap_err();
        assert!(matches!(err, ConsensusError::MissingData { stage: STAGE, hash: missing, .. } if missing == hash(404)));
    }
}
