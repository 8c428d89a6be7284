//! Coinbase transaction processing
//!
//! Builds the coinbase a block is expected to carry from its merge set: every DAA-added
//! blue block is paid its own subsidy plus the fees it contributed, while the rewards of
//! DAA-added red blocks are pooled into one output paying the merging block's miner.

pub mod payload;
pub mod subsidy;

use consensus_core::{
    acceptance_data::{acceptance_data_by_block, MergesetBlockAcceptanceData},
    block::Block,
    coinbase::{CoinbaseData, CoinbaseFields},
    config::params::Params,
    constants::{SECONDS_PER_MONTH, TX_VERSION},
    errors::RuleError,
    ghostdag::{DataOrigin, GhostdagData},
    subnets::SUBNETWORK_ID_COINBASE,
    tx::{Transaction, TransactionOutput},
    BlockHashMap, BlockHashSet, Hash,
};
use database::{
    stores::{AcceptanceDataStore, BlockStore, DaaStore, GhostdagStore},
    StagingArea, StoreResultExtensions,
};
use tracing::{debug, warn};

use crate::errors::{ConsensusError, ConsensusResult, StoreResultContext};

const STAGE: &str = "coinbase";

/// Coinbase transaction processor
#[derive(Clone)]
pub struct CoinbaseManager {
    genesis_hash: Hash,
    genesis_reward: u64,
    pre_deflationary_phase_base_subsidy: u64,
    deflationary_phase_daa_score: u64,
    deflationary_phase_base_subsidy: u64,
    coinbase_payload_script_public_key_max_len: u8,

    ghostdag_store: GhostdagStore,
    acceptance_data_store: AcceptanceDataStore,
    daa_store: DaaStore,
    block_store: BlockStore,
}

impl CoinbaseManager {
    pub fn new(
        params: &Params,
        ghostdag_store: GhostdagStore,
        acceptance_data_store: AcceptanceDataStore,
        daa_store: DaaStore,
        block_store: BlockStore,
    ) -> Self {
        Self {
            genesis_hash: params.genesis_hash,
            genesis_reward: params.genesis_reward,
            pre_deflationary_phase_base_subsidy: params.pre_deflationary_phase_base_subsidy,
            deflationary_phase_daa_score: params.deflationary_phase_daa_score,
            deflationary_phase_base_subsidy: params.deflationary_phase_base_subsidy,
            coinbase_payload_script_public_key_max_len: params.coinbase_payload_script_public_key_max_len,
            ghostdag_store,
            acceptance_data_store,
            daa_store,
            block_store,
        }
    }

    /// GHOSTDAG data received with trusted data is preferred: it keeps the original, non-pruned merge set
    fn ghostdag_data(&self, staging: &StagingArea, block: Hash) -> ConsensusResult<GhostdagData> {
        match self.ghostdag_store.get(staging, block, DataOrigin::Trusted).optional().context(STAGE, block)? {
            Some(data) => Ok(data),
            None => self.ghostdag_store.get(staging, block, DataOrigin::Local).context(STAGE, block),
        }
    }

    /// Builds the coinbase `block` must carry when mined with `coinbase_data`. The returned flag
    /// tells whether the last output pools the rewards of red blocks.
    pub fn expected_coinbase_transaction(
        &self,
        staging: &StagingArea,
        block: Hash,
        coinbase_data: &CoinbaseData,
    ) -> ConsensusResult<(Transaction, bool)> {
        let ghostdag_data = self.ghostdag_data(staging, block)?;
        let acceptance_data = self.acceptance_data_store.get(staging, block).context(STAGE, block)?;
        let daa_added_blocks = self.daa_store.get_daa_added_blocks_set(staging, block).context(STAGE, block)?;
        let acceptance_by_block = acceptance_data_by_block(&acceptance_data);

        let mut outputs = Vec::with_capacity(ghostdag_data.mergeset_blues.len() + 1);
        for &blue in ghostdag_data.mergeset_blues.iter() {
            let block_acceptance = merged_block_acceptance(&acceptance_by_block, block, blue)?;
            if let Some(output) = self.coinbase_output_for_blue_block(staging, blue, block_acceptance, &daa_added_blocks)? {
                outputs.push(output);
            }
        }

        let red_output =
            self.coinbase_output_for_red_blocks(staging, block, &ghostdag_data, &acceptance_by_block, &daa_added_blocks, coinbase_data)?;
        let has_red_reward = red_output.is_some();
        outputs.extend(red_output);

        let subsidy = self.calc_block_subsidy(staging, block)?;
        let payload = self.serialize_coinbase_payload(ghostdag_data.blue_score, coinbase_data, subsidy)?;

        Ok((Transaction::new(TX_VERSION, Vec::new(), outputs, 0, SUBNETWORK_ID_COINBASE, 0, payload), has_red_reward))
    }

    /// Output paying `blue` its reward, or `None` if it earned nothing
    fn coinbase_output_for_blue_block(
        &self,
        staging: &StagingArea,
        blue: Hash,
        block_acceptance: &MergesetBlockAcceptanceData,
        daa_added_blocks: &BlockHashSet,
    ) -> ConsensusResult<Option<TransactionOutput>> {
        let reward = self.calc_merged_block_reward(staging, blue, block_acceptance, daa_added_blocks)?;
        if reward == 0 {
            return Ok(None);
        }

        // The script to pay is the one the blue block committed to in its own coinbase payload
        let coinbase = block_acceptance.accepted_transactions.first().ok_or_else(|| {
            ConsensusError::InvariantViolation(format!("acceptance data of merged block {} does not start with its coinbase", blue))
        })?;
        let fields = self.extract_coinbase_data_blue_score_and_subsidy(&coinbase.transaction)?;
        Ok(Some(TransactionOutput::new(reward, fields.coinbase_data.script_public_key)))
    }

    /// One output paying the merging block's miner the summed rewards of all red blocks
    fn coinbase_output_for_red_blocks(
        &self,
        staging: &StagingArea,
        block: Hash,
        ghostdag_data: &GhostdagData,
        acceptance_by_block: &BlockHashMap<&MergesetBlockAcceptanceData>,
        daa_added_blocks: &BlockHashSet,
        coinbase_data: &CoinbaseData,
    ) -> ConsensusResult<Option<TransactionOutput>> {
        let mut total_reward = 0u64;
        for &red in ghostdag_data.mergeset_reds.iter() {
            let block_acceptance = merged_block_acceptance(acceptance_by_block, block, red)?;
            let reward = self.calc_merged_block_reward(staging, red, block_acceptance, daa_added_blocks)?;
            total_reward = total_reward.checked_add(reward).ok_or_else(|| {
                ConsensusError::InvariantViolation(format!("red reward of block {} overflows at merged block {}", block, red))
            })?;
        }

        if total_reward == 0 {
            return Ok(None);
        }
        Ok(Some(TransactionOutput::new(total_reward, coinbase_data.script_public_key.clone())))
    }

    /// Subsidy recorded in the merged block's coinbase plus the fees of its accepted transactions.
    /// Blocks which are not DAA-added to the merging block earn nothing.
    pub fn calc_merged_block_reward(
        &self,
        staging: &StagingArea,
        block: Hash,
        block_acceptance: &MergesetBlockAcceptanceData,
        merging_block_daa_added_blocks: &BlockHashSet,
    ) -> ConsensusResult<u64> {
        if block_acceptance.block_hash != block {
            return Err(ConsensusError::InvariantViolation(format!(
                "acceptance data block hash is expected to be {} but got {}",
                block, block_acceptance.block_hash
            )));
        }
        if !merging_block_daa_added_blocks.contains(&block) {
            return Ok(0);
        }

        let transactions = self.block_store.get_transactions(staging, block).context(STAGE, block)?;
        let coinbase = transactions
            .first()
            .ok_or_else(|| ConsensusError::InvariantViolation(format!("stored block {} has no coinbase transaction", block)))?;
        let CoinbaseFields { subsidy, .. } = self.extract_coinbase_data_blue_score_and_subsidy(coinbase)?;
        block_acceptance
            .total_accepted_fees()
            .and_then(|total_fees| total_fees.checked_add(subsidy))
            .ok_or_else(|| ConsensusError::InvariantViolation(format!("reward of merged block {} overflows", block)))
    }

    /// The subsidy a block is entitled to. Genesis pays the fixed genesis reward; other blocks are
    /// scheduled by DAA score.
    pub fn calc_block_subsidy(&self, staging: &StagingArea, block: Hash) -> ConsensusResult<u64> {
        if block == self.genesis_hash {
            return Ok(self.genesis_reward);
        }

        let daa_score = self.daa_store.get_daa_score(staging, block).context(STAGE, block)?;
        let subsidy = if daa_score < self.deflationary_phase_daa_score {
            self.pre_deflationary_phase_base_subsidy
        } else {
            self.calc_deflationary_period_block_subsidy(daa_score)
        };
        debug!("block {} with DAA score {} has subsidy {}", block, daa_score, subsidy);
        Ok(subsidy)
    }

    fn calc_deflationary_period_block_subsidy(&self, daa_score: u64) -> u64 {
        // DAA score advances by one per second on average, so a month is SECONDS_PER_MONTH of it
        let months_since_deflationary_phase_started = (daa_score - self.deflationary_phase_daa_score) / SECONDS_PER_MONTH;
        subsidy::subsidy_by_month(months_since_deflationary_phase_started)
    }

    /// Closed-form subsidy for `month` under this network's base subsidy; the table is generated from it
    pub fn calc_deflationary_period_block_subsidy_float(&self, month: u64) -> u64 {
        subsidy::calc_deflationary_period_block_subsidy_float(self.deflationary_phase_base_subsidy, month)
    }

    pub fn serialize_coinbase_payload(&self, blue_score: u64, coinbase_data: &CoinbaseData, subsidy: u64) -> ConsensusResult<Vec<u8>> {
        Ok(payload::serialize_coinbase_payload(blue_score, coinbase_data, subsidy, self.coinbase_payload_script_public_key_max_len)?)
    }

    pub fn extract_coinbase_data_blue_score_and_subsidy(&self, coinbase: &Transaction) -> ConsensusResult<CoinbaseFields> {
        Ok(payload::extract_coinbase_data_blue_score_and_subsidy(coinbase, self.coinbase_payload_script_public_key_max_len)?)
    }

    /// Rejects `block` unless its coinbase equals the one expected from its merge set
    /// and the coinbase data it declares
    pub fn validate_coinbase_transaction_in_context(&self, staging: &StagingArea, block: &Block) -> ConsensusResult<()> {
        let hash = block.hash();
        let coinbase = block.coinbase().filter(|tx| tx.is_coinbase()).ok_or(RuleError::MissingCoinbaseTransaction(hash))?;
        let fields = self.extract_coinbase_data_blue_score_and_subsidy(coinbase)?;
        let (expected, _) = self.expected_coinbase_transaction(staging, hash, &fields.coinbase_data)?;

        let (got, want) = (coinbase.hash(), expected.hash());
        if got != want {
            warn!("block {} has coinbase {} while {} was expected", hash, got, want);
            return Err(RuleError::BadCoinbaseTransaction(hash, got, want).into());
        }
        Ok(())
    }
}

fn merged_block_acceptance<'a>(
    acceptance_by_block: &BlockHashMap<&'a MergesetBlockAcceptanceData>,
    merging_block: Hash,
    merged: Hash,
) -> ConsensusResult<&'a MergesetBlockAcceptanceData> {
    acceptance_by_block.get(&merged).copied().ok_or_else(|| {
        ConsensusError::InvariantViolation(format!("acceptance data of {} has no entry for merged block {}", merging_block, merged))
    })
}
