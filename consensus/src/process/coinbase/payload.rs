//! Coinbase payload layout:
//!
//! `blue_score (u64 LE) || subsidy (u64 LE) || script version (u16 LE) || script length (u8) || script || extra data`

use consensus_core::{
    coinbase::{CoinbaseData, CoinbaseFields},
    errors::{RuleError, RuleResult},
    tx::{ScriptPublicKey, Transaction},
};

const LENGTH_OF_BLUE_SCORE: usize = std::mem::size_of::<u64>();
const LENGTH_OF_SUBSIDY: usize = std::mem::size_of::<u64>();
const LENGTH_OF_SCRIPT_PUB_KEY_VERSION: usize = std::mem::size_of::<u16>();
const LENGTH_OF_SCRIPT_PUB_KEY_LENGTH: usize = std::mem::size_of::<u8>();

pub const MIN_PAYLOAD_LENGTH: usize =
    LENGTH_OF_BLUE_SCORE + LENGTH_OF_SUBSIDY + LENGTH_OF_SCRIPT_PUB_KEY_VERSION + LENGTH_OF_SCRIPT_PUB_KEY_LENGTH;

pub fn serialize_coinbase_payload(
    blue_score: u64,
    coinbase_data: &CoinbaseData,
    subsidy: u64,
    script_public_key_max_len: u8,
) -> RuleResult<Vec<u8>> {
    let script = coinbase_data.script_public_key.script();
    let script_len = match u8::try_from(script.len()) {
        Ok(len) if len <= script_public_key_max_len => len,
        _ => {
            let len = u8::try_from(script.len()).unwrap_or(u8::MAX);
            return Err(RuleError::BadCoinbasePayloadScriptPublicKeyLength(len, script_public_key_max_len));
        }
    };

    let mut payload = Vec::with_capacity(MIN_PAYLOAD_LENGTH + script.len() + coinbase_data.extra_data.len());
    payload.extend_from_slice(&blue_score.to_le_bytes());
    payload.extend_from_slice(&subsidy.to_le_bytes());
    payload.extend_from_slice(&coinbase_data.script_public_key.version().to_le_bytes());
    payload.push(script_len);
    payload.extend_from_slice(script);
    payload.extend_from_slice(&coinbase_data.extra_data);
    Ok(payload)
}

pub fn extract_coinbase_data_blue_score_and_subsidy(
    coinbase: &Transaction,
    script_public_key_max_len: u8,
) -> RuleResult<CoinbaseFields> {
    let payload = coinbase.payload.as_slice();
    if payload.len() < MIN_PAYLOAD_LENGTH {
        return Err(RuleError::BadCoinbasePayloadLen(payload.len(), MIN_PAYLOAD_LENGTH));
    }

    let (blue_score, rest) = payload.split_at(LENGTH_OF_BLUE_SCORE);
    let (subsidy, rest) = rest.split_at(LENGTH_OF_SUBSIDY);
    let (version, rest) = rest.split_at(LENGTH_OF_SCRIPT_PUB_KEY_VERSION);
    let (script_len, rest) = (rest[0], &rest[LENGTH_OF_SCRIPT_PUB_KEY_LENGTH..]);

    if script_len > script_public_key_max_len {
        return Err(RuleError::BadCoinbasePayloadScriptPublicKeyLength(script_len, script_public_key_max_len));
    }
    if rest.len() < script_len as usize {
        return Err(RuleError::BadCoinbasePayloadLen(payload.len(), MIN_PAYLOAD_LENGTH + script_len as usize));
    }
    let (script, extra_data) = rest.split_at(script_len as usize);

    Ok(CoinbaseFields {
        blue_score: u64::from_le_bytes(le_bytes(blue_score)),
        subsidy: u64::from_le_bytes(le_bytes(subsidy)),
        coinbase_data: CoinbaseData::new(
            ScriptPublicKey::from_vec(u16::from_le_bytes(le_bytes(version)), script.to_vec()),
            extra_data.to_vec(),
        ),
    })
}

fn le_bytes<const N: usize>(slice: &[u8]) -> [u8; N] {
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(slice);
    bytes
}
