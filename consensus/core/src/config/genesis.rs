use crate::{
    block::Block,
    constants::TX_VERSION,
    header::Header,
    subnets::SUBNETWORK_ID_COINBASE,
    tx::Transaction,
    BlueWorkType, Hash, ZERO_HASH,
};
use hex_literal::hex;

/// The constants uniquely representing the genesis block
#[derive(Clone, Debug)]
pub struct GenesisBlock {
    pub hash: Hash,
    pub version: u16,
    pub hash_merkle_root: Hash,
    pub utxo_commitment: Hash,
    pub timestamp: u64,
    pub bits: u32,
    pub nonce: u64,
    pub daa_score: u64,
    pub coinbase_payload: &'static [u8],
}

impl GenesisBlock {
    /// The genesis coinbase pays nothing; its payload only carries the network message
    pub fn build_genesis_transactions(&self) -> Vec<Transaction> {
        vec![Transaction::new(TX_VERSION, Vec::new(), Vec::new(), 0, SUBNETWORK_ID_COINBASE, 0, self.coinbase_payload.to_vec())]
    }
}

impl From<&GenesisBlock> for Header {
    fn from(genesis: &GenesisBlock) -> Self {
        Header::new_finalized(
            genesis.version,
            Vec::new(),
            genesis.hash_merkle_root,
            ZERO_HASH,
            genesis.utxo_commitment,
            genesis.timestamp,
            genesis.bits,
            genesis.nonce,
            genesis.daa_score,
            BlueWorkType::zero(),
            0,
            ZERO_HASH,
        )
    }
}

impl From<&GenesisBlock> for Block {
    fn from(genesis: &GenesisBlock) -> Self {
        Block::new(genesis.into(), genesis.build_genesis_transactions())
    }
}

pub const GENESIS: GenesisBlock = GenesisBlock {
    hash: Hash::from_bytes(hex!("8db00d998b8725cf7af874f753e1622f27773af855923b4cd5579018ccac6ad4")),
    version: 1,
    hash_merkle_root: Hash::from_bytes(hex!("65ffe1aa8bb183f1143e3846ea510b193da77eb47407dccbca8177e2b1981c10")),
    utxo_commitment: ZERO_HASH,
    timestamp: 1_719_792_000_000,
    bits: 0x1e7fffff,
    nonce: 0,
    daa_score: 0,
    #[rustfmt::skip]
    coinbase_payload: &[
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // Blue score
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // Subsidy
        0x00, 0x00, // Script version
        0x00, // Script length
        // "cryptix mainnet genesis"
        0x63, 0x72, 0x79, 0x70, 0x74, 0x69, 0x78, 0x20, 0x6d, 0x61, 0x69, 0x6e, 0x6e, 0x65, 0x74, 0x20,
        0x67, 0x65, 0x6e, 0x65, 0x73, 0x69, 0x73,
    ],
};

pub const TESTNET_GENESIS: GenesisBlock = GenesisBlock {
    hash: Hash::from_bytes(hex!("371c49468f129950a50d5f7ae3b27a27af72a0f5ba078c6813bc231d26a07ba9")),
    version: 1,
    hash_merkle_root: Hash::from_bytes(hex!("628dd1e09cabb8d1c1f11ea5bdd83e3ff8de916ed2e1083df149581dfb4bf0f2")),
    utxo_commitment: ZERO_HASH,
    timestamp: 1_719_792_000_000,
    bits: 0x1e7fffff,
    nonce: 0,
    daa_score: 0,
    #[rustfmt::skip]
    coinbase_payload: &[
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // Blue score
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // Subsidy
        0x00, 0x00, // Script version
        0x00, // Script length
        // "cryptix testnet genesis"
        0x63, 0x72, 0x79, 0x70, 0x74, 0x69, 0x78, 0x20, 0x74, 0x65, 0x73, 0x74, 0x6e, 0x65, 0x74, 0x20,
        0x67, 0x65, 0x6e, 0x65, 0x73, 0x69, 0x73,
    ],
};

pub const DEVNET_GENESIS: GenesisBlock = GenesisBlock {
    hash: Hash::from_bytes(hex!("4d9283b92aa0dccac45c84b07ad403380ca90459c79ee68353cfa9fa87b5a852")),
    version: 1,
    hash_merkle_root: Hash::from_bytes(hex!("280c61ef3cbf1668ccb7ac076b8ba5b03ff14a234d06867a0c84493a72a2d57e")),
    utxo_commitment: ZERO_HASH,
    timestamp: 1_719_792_000_000,
    bits: 0x207fffff,
    nonce: 0,
    daa_score: 0,
    #[rustfmt::skip]
    coinbase_payload: &[
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // Blue score
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // Subsidy
        0x00, 0x00, // Script version
        0x00, // Script length
        // "cryptix devnet genesis"
        0x63, 0x72, 0x79, 0x70, 0x74, 0x69, 0x78, 0x20, 0x64, 0x65, 0x76, 0x6e, 0x65, 0x74, 0x20, 0x67,
        0x65, 0x6e, 0x65, 0x73, 0x69, 0x73,
    ],
};
