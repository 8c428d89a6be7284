pub mod genesis;
pub mod params;

pub use params::{NetworkType, Params, DEVNET_PARAMS, MAINNET_PARAMS, TESTNET_PARAMS};
