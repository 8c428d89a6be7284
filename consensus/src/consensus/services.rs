use std::sync::Arc;

use consensus_core::{config::params::Params, errors::RuleError, Hash};
use database::{CachedDbAccess, ConsensusStores, DbAccess, StagingArea};
use tracing::{info, warn};

use crate::{
    config::Config,
    errors::{ConsensusResult, StoreResultContext},
    process::{CoinbaseManager, DagTopologyManager, MergeDepthManager},
};

const POW_STAGE: &str = "proof of work";

/// The consensus processes of one network, sharing a set of stores
#[derive(Clone)]
pub struct ConsensusServices {
    pub params: Params,
    /// Backend the stores read from; staging areas are committed into it
    pub db: Arc<dyn DbAccess>,
    pub storage: ConsensusStores,
    pub dag_topology_manager: DagTopologyManager,
    pub merge_depth_manager: MergeDepthManager<DagTopologyManager>,
    pub coinbase_manager: CoinbaseManager,
}

impl ConsensusServices {
    pub fn new(db: Arc<dyn DbAccess>, params: Params) -> Self {
        let storage = ConsensusStores::new(db.clone());
        let dag_topology_manager = DagTopologyManager::new(storage.ghostdag.clone(), storage.relations.clone());
        let merge_depth_manager = MergeDepthManager::new(
            params.merge_depth,
            params.genesis_hash,
            storage.ghostdag.clone(),
            storage.merge_depth_roots.clone(),
            dag_topology_manager.clone(),
        );
        let coinbase_manager = CoinbaseManager::new(
            &params,
            storage.ghostdag.clone(),
            storage.acceptance_data.clone(),
            storage.daa.clone(),
            storage.blocks.clone(),
        );
        Self { params, db, storage, dag_topology_manager, merge_depth_manager, coinbase_manager }
    }

    /// Services for the configured network, reading through a cache of committed values
    pub fn from_config(config: &Config, db: Arc<dyn DbAccess>) -> Self {
        info!("Initializing consensus services for {} (store cache size {})", config.network, config.store_cache_size);
        let db: Arc<dyn DbAccess> = Arc::new(CachedDbAccess::new(db, config.store_cache_size));
        Self::new(db, config.params())
    }

    /// Checks the stored header of `block` against the target encoded in its own bits.
    /// Genesis carries no proof of work.
    pub fn validate_header_proof_of_work(&self, staging: &StagingArea, block: Hash) -> ConsensusResult<()> {
        let header = self.storage.headers.get(staging, block).context(POW_STAGE, block)?;
        if header.is_genesis() || consensus_pow::check_proof_of_work(&header) {
            return Ok(());
        }
        warn!("block {} does not meet its declared target {:#x}", block, header.bits);
        Err(RuleError::InvalidPoW(block).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consensus_core::{
        acceptance_data::MergesetBlockAcceptanceData,
        block::Block,
        config::{genesis::DEVNET_GENESIS, params::NetworkType},
        constants::BLOCK_VERSION,
        ghostdag::{DataOrigin, GhostdagData},
        header::Header,
        BlueWorkType,
    };
    use crate::errors::ConsensusError;
    use database::MemoryDb;
    use database::{Database, StagingArea};
    use tempfile::TempDir;

    #[test]
    fn test_genesis_over_rocksdb() {
        let tmp = TempDir::new().unwrap();
        let db: Arc<dyn DbAccess> = Arc::new(Database::open(tmp.path()).unwrap());
        let services = ConsensusServices::from_config(&Config::for_network(NetworkType::Devnet), db.clone());

        let genesis = Block::from(&DEVNET_GENESIS);
        let hash = genesis.hash();
        assert_eq!(hash, services.params.genesis_hash);

        let mut staging = StagingArea::new();
        let storage = &services.storage;
        storage.blocks.stage(&mut staging, &genesis).unwrap();
        storage.headers.stage(&mut staging, &genesis.header).unwrap();
        storage.relations.stage_parents(&mut staging, hash, &[]).unwrap();
        storage.ghostdag.stage(&mut staging, hash, &GhostdagData::genesis(BlueWorkType::zero()), DataOrigin::Local).unwrap();
        storage.daa.stage_daa_score(&mut staging, hash, 0).unwrap();
        storage.daa.stage_daa_added_blocks(&mut staging, hash, &[]).unwrap();
        storage.acceptance_data.stage(&mut staging, hash, &vec![MergesetBlockAcceptanceData::new(hash, vec![])]).unwrap();

        services.validate_header_proof_of_work(&staging, hash).unwrap();
        services.merge_depth_manager.check_bounded_merge_depth(&mut staging, hash, false).unwrap();
        assert_eq!(services.coinbase_manager.calc_block_subsidy(&staging, hash).unwrap(), services.params.genesis_reward);
        staging.commit(services.db.as_ref()).unwrap();

        // A second instance over the same database sees the committed genesis
        let reopened = ConsensusServices::new(db, NetworkType::Devnet.params());
        let staging = StagingArea::new();
        assert!(reopened.dag_topology_manager.selected_chain_iter(&staging, hash).all(|block| block.is_ok()));
        let genesis_coinbase = &genesis.transactions[0];
        let fields = reopened.coinbase_manager.extract_coinbase_data_blue_score_and_subsidy(genesis_coinbase).unwrap();
        assert_eq!(fields.coinbase_data.extra_data, b"cryptix devnet genesis");
    }

    fn mined_header(nonce: u64) -> Header {
        Header::new_finalized(
            BLOCK_VERSION,
            vec![vec![Hash::from_u64_word(1)]],
            Hash::from_u64_word(2),
            Hash::from_u64_word(3),
            Hash::from_u64_word(4),
            1_700_000_000_000,
            0x207fffff,
            nonce,
            10,
            BlueWorkType::from(0x0102u64),
            9,
            Hash::from_u64_word(5),
        )
    }

    #[test]
    fn test_header_proof_of_work() {
        let services = ConsensusServices::new(Arc::new(MemoryDb::new()), NetworkType::Devnet.params());
        // Against the easiest target nonce 0 passes and nonce 6 does not
        let (valid, invalid) = (mined_header(0), mined_header(6));
        let mut staging = StagingArea::new();
        services.storage.headers.stage(&mut staging, &valid).unwrap();
        services.storage.headers.stage(&mut staging, &invalid).unwrap();

        services.validate_header_proof_of_work(&staging, valid.hash).unwrap();
        let err = services.validate_header_proof_of_work(&staging, invalid.hash).unwrap_err();
        assert!(matches!(err, ConsensusError::Rule(RuleError::InvalidPoW(block)) if block == invalid.hash));

        let err = services.validate_header_proof_of_work(&staging, Hash::from_u64_word(404)).unwrap_err();
        assert!(err.is_missing_data());
    }
}
