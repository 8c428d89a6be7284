use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::str::FromStr;

/// Size of the underlying script vector of a script.
pub const SCRIPT_VECTOR_SIZE: usize = 36;

/// Used as the underlying type for script public key data, optimized for the common p2pk script size (34).
pub type ScriptVec = SmallVec<[u8; SCRIPT_VECTOR_SIZE]>;

/// Represents the ScriptPublicKey Version
pub type ScriptPublicKeyVersion = u16;

/// Script a transaction output pays to, together with its script version
#[derive(Default, PartialEq, Eq, Clone, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScriptPublicKey {
    pub version: ScriptPublicKeyVersion,
    script: ScriptVec, // Kept private to preserve read-only semantics
}

impl std::fmt::Debug for ScriptPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptPublicKey").field("version", &self.version).field("script", &hex::encode(&self.script)).finish()
    }
}

impl std::fmt::Display for ScriptPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(&self.script))
    }
}

impl ScriptPublicKey {
    pub fn new(version: ScriptPublicKeyVersion, script: ScriptVec) -> Self {
        Self { version, script }
    }

    pub fn from_vec(version: ScriptPublicKeyVersion, script: Vec<u8>) -> Self {
        Self { version, script: ScriptVec::from_vec(script) }
    }

    pub fn version(&self) -> ScriptPublicKeyVersion {
        self.version
    }

    pub fn script(&self) -> &[u8] {
        &self.script
    }
}

/// Parses `version (2 bytes, big endian) || script` from hex
impl FromStr for ScriptPublicKey {
    type Err = hex::FromHexError;

    fn from_str(hex_str: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(hex_str)?;
        if bytes.len() < 2 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let version = u16::from_be_bytes([bytes[0], bytes[1]]);
        Ok(Self { version, script: SmallVec::from_slice(&bytes[2..]) })
    }
}
