//! DAG fixtures over the in-memory backend.

use consensus_core::{
    acceptance_data::{AcceptanceData, MergesetBlockAcceptanceData, TransactionAcceptanceData},
    block::Block,
    coinbase::CoinbaseData,
    constants::{COINBASE_PAYLOAD_SCRIPT_PUBLIC_KEY_MAX_LENGTH, TX_VERSION},
    ghostdag::{DataOrigin, GhostdagData},
    header::Header,
    subnets::{SUBNETWORK_ID_COINBASE, SUBNETWORK_ID_NATIVE},
    tx::{ScriptPublicKey, Transaction},
    BlueWorkType, Hash,
};
use database::{ConsensusStores, MemoryDb, StagingArea};
use std::sync::Arc;

use crate::process::coinbase::payload::serialize_coinbase_payload;

pub(crate) fn hash(n: u64) -> Hash {
    Hash::from_u64_word(n)
}

pub(crate) fn script(tag: u8) -> ScriptPublicKey {
    ScriptPublicKey::from_vec(0, vec![0x20, tag, 0xac])
}

pub(crate) fn coinbase_data(tag: u8) -> CoinbaseData {
    CoinbaseData::new(script(tag), vec![tag])
}

pub(crate) fn coinbase_transaction(blue_score: u64, subsidy: u64, coinbase_data: &CoinbaseData) -> Transaction {
    let payload = serialize_coinbase_payload(blue_score, coinbase_data, subsidy, COINBASE_PAYLOAD_SCRIPT_PUBLIC_KEY_MAX_LENGTH).unwrap();
    Transaction::new(TX_VERSION, vec![], vec![], 0, SUBNETWORK_ID_COINBASE, 0, payload)
}

/// Acceptance data of one merged block: its coinbase first, then one transaction per `(fee, is_accepted)`
pub(crate) fn merged_block_acceptance(
    block: Hash,
    subsidy: u64,
    coinbase_data: &CoinbaseData,
    fees: &[(u64, bool)],
) -> MergesetBlockAcceptanceData {
    let coinbase = TransactionAcceptanceData { transaction: coinbase_transaction(0, subsidy, coinbase_data), fee: 0, is_accepted: true };
    let transactions = fees.iter().enumerate().map(|(i, &(fee, is_accepted))| TransactionAcceptanceData {
        transaction: Transaction::new(TX_VERSION, vec![], vec![], i as u64, SUBNETWORK_ID_NATIVE, 0, vec![]),
        fee,
        is_accepted,
    });
    MergesetBlockAcceptanceData::new(block, std::iter::once(coinbase).chain(transactions).collect())
}

/// A committed DAG built block by block. Genesis is `hash(0)`.
pub(crate) struct TestDag {
    pub db: Arc<MemoryDb>,
    pub stores: ConsensusStores,
}

impl TestDag {
    pub fn new() -> Self {
        let db = Arc::new(MemoryDb::new());
        let stores = ConsensusStores::new(db.clone());
        let dag = Self { db, stores };
        dag.commit_block(hash(0), &[], GhostdagData::genesis(BlueWorkType::zero()), DataOrigin::Local);
        dag
    }

    pub fn genesis(&self) -> Hash {
        hash(0)
    }

    /// Commits a block whose merge set is only its selected parent
    pub fn add_chain_block(&self, block: Hash, selected_parent: Hash) {
        self.add_block(block, &[selected_parent], &[])
    }

    /// Commits a block with local GHOSTDAG data: the first parent is the selected parent,
    /// `reds` are red and every other parent is blue. Each blue adds one to the selected
    /// parent's blue score and blue work.
    pub fn add_block(&self, block: Hash, parents: &[Hash], reds: &[Hash]) {
        let selected_parent = self.stores.ghostdag.get(&StagingArea::new(), parents[0], DataOrigin::Local).unwrap();
        let data = Self::ghostdag_data(parents, reds);
        let blues = data.mergeset_blues.len() as u64;
        let blue_work = selected_parent.blue_work + BlueWorkType::from(blues);
        self.commit_block(block, parents, Self::with_weight(data, selected_parent.blue_score + blues, blue_work), DataOrigin::Local);
    }

    /// Same as [`Self::add_block`] with an explicit blue score and blue work
    pub fn add_weighted_block(&self, block: Hash, parents: &[Hash], reds: &[Hash], blue_score: u64, blue_work: u64) {
        let data = Self::with_weight(Self::ghostdag_data(parents, reds), blue_score, blue_work.into());
        self.commit_block(block, parents, data, DataOrigin::Local);
    }

    fn ghostdag_data(parents: &[Hash], reds: &[Hash]) -> GhostdagData {
        let mut data = GhostdagData::new_with_selected_parent(parents[0]);
        for &parent in parents.iter().skip(1).filter(|parent| !reds.contains(*parent)) {
            data.add_blue(parent, 0, BlueWorkType::zero());
        }
        for &red in reds {
            data.add_red(red);
        }
        data
    }

    fn with_weight(mut data: GhostdagData, blue_score: u64, blue_work: BlueWorkType) -> GhostdagData {
        data.blue_score = blue_score;
        data.blue_work = blue_work;
        data
    }

    pub fn commit_block(&self, block: Hash, parents: &[Hash], data: GhostdagData, origin: DataOrigin) {
        let mut staging = StagingArea::new();
        self.stores.relations.stage_parents(&mut staging, block, parents).unwrap();
        self.stores.ghostdag.stage(&mut staging, block, &data, origin).unwrap();
        staging.commit(self.db.as_ref()).unwrap();
    }

    /// Commits a body holding only a coinbase that declares `subsidy` and pays `coinbase_data`
    pub fn commit_body(&self, block: Hash, subsidy: u64, coinbase_data: &CoinbaseData) {
        let mut staging = StagingArea::new();
        let blue_score = self.stores.ghostdag.get_blue_score(&staging, block).unwrap();
        let parents = self.stores.relations.get_parents(&staging, block).unwrap();
        let body = Block::new(Header::from_precomputed_hash(block, parents), vec![coinbase_transaction(blue_score, subsidy, coinbase_data)]);
        self.stores.blocks.stage(&mut staging, &body).unwrap();
        staging.commit(self.db.as_ref()).unwrap();
    }

    /// Stages what the coinbase of `block` is computed from, besides its GHOSTDAG data
    pub fn stage_merging_data(
        &self,
        staging: &mut StagingArea,
        block: Hash,
        daa_score: u64,
        daa_added_blocks: &[Hash],
        acceptance_data: &AcceptanceData,
    ) {
        self.stores.daa.stage_daa_score(staging, block, daa_score).unwrap();
        self.stores.daa.stage_daa_added_blocks(staging, block, daa_added_blocks).unwrap();
        self.stores.acceptance_data.stage(staging, block, acceptance_data).unwrap();
    }
}
