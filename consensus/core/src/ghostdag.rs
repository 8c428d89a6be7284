use serde::{Deserialize, Serialize};

use crate::{blockhash::ORIGIN, BlockHashMap, BlueWorkType, Hash, KType};

/// Selects which of the two variants of a block's GHOSTDAG data to read or write.
///
/// `Trusted` data arrives through the trusted sync path together with the
/// original (non-pruned) merge set; `Local` data is computed by this node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataOrigin {
    Trusted,
    Local,
}

impl DataOrigin {
    pub fn is_trusted(self) -> bool {
        matches!(self, DataOrigin::Trusted)
    }
}

/// Per-block GHOSTDAG metadata. Written once when the block is first
/// processed and never mutated afterwards.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GhostdagData {
    pub blue_score: u64,
    pub blue_work: BlueWorkType,
    pub selected_parent: Hash,
    /// Blue blocks of the merge set, selected parent first
    pub mergeset_blues: Vec<Hash>,
    pub mergeset_reds: Vec<Hash>,
    pub blues_anticone_sizes: BlockHashMap<KType>,
}

impl GhostdagData {
    pub fn new(
        blue_score: u64,
        blue_work: BlueWorkType,
        selected_parent: Hash,
        mergeset_blues: Vec<Hash>,
        mergeset_reds: Vec<Hash>,
        blues_anticone_sizes: BlockHashMap<KType>,
    ) -> Self {
        Self { blue_score, blue_work, selected_parent, mergeset_blues, mergeset_reds, blues_anticone_sizes }
    }

    /// Data with an initial merge set holding only the selected parent.
    pub fn new_with_selected_parent(selected_parent: Hash) -> Self {
        let mut blues_anticone_sizes = BlockHashMap::with_capacity(1);
        blues_anticone_sizes.insert(selected_parent, 0);
        Self {
            blue_score: Default::default(),
            blue_work: Default::default(),
            selected_parent,
            mergeset_blues: vec![selected_parent],
            mergeset_reds: Vec::new(),
            blues_anticone_sizes,
        }
    }

    /// GHOSTDAG data of the genesis block: its selected parent is the origin sentinel.
    pub fn genesis(genesis_work: BlueWorkType) -> Self {
        Self::new(0, genesis_work, ORIGIN, Vec::new(), Vec::new(), BlockHashMap::new())
    }

    pub fn is_genesis(&self) -> bool {
        self.selected_parent == ORIGIN
    }

    /// Returns an iterator to the mergeset with no specified order (excluding the selected parent)
    pub fn unordered_mergeset_without_selected_parent(&self) -> impl Iterator<Item = Hash> + '_ {
        self.mergeset_blues.iter().skip(1).cloned().chain(self.mergeset_reds.iter().cloned())
    }

    pub fn add_blue(&mut self, block: Hash, blue_anticone_size: KType, block_blue_work: BlueWorkType) -> &mut Self {
        self.mergeset_blues.push(block);
        self.blues_anticone_sizes.insert(block, blue_anticone_size);
        self.blue_score += 1;
        self.blue_work = self.blue_work.saturating_add(block_blue_work);
        self
    }

    pub fn add_red(&mut self, block: Hash) -> &mut Self {
        self.mergeset_reds.push(block);
        self
    }

    pub fn with_blue_score(mut self, blue_score: u64) -> Self {
        self.blue_score = blue_score;
        self
    }
}
