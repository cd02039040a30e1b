use crate::error::{KeyError, Result};
use crypto_utils::{
    base58::{self, CHECKSUM_LEN, base58_decode},
    hash::hash160,
};
use serde::{Deserialize, Serialize};

/// Index offset for hardened children (index >= 0x80000000) i.e., 0x80000000 = 2³¹
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

// Version prefixes for serialization
pub const VERSION_MAINNET_PUBLIC: u32 = 0x0488_B21E;
pub const VERSION_TESTNET_PUBLIC: u32 = 0x0435_87CF;
pub const VERSION_MAINNET_PRIVATE: u32 = 0x0488_ADE4;
pub const VERSION_TESTNET_PRIVATE: u32 = 0x0435_8394;

/// version (4) | depth (1) | parent_fp (4) | child_number (4) | chain_code (32) | key_data (33)
pub const PAYLOAD_LEN: usize = 78;
pub const ENCODED_LEN: usize = PAYLOAD_LEN + CHECKSUM_LEN;
/// Longest Base58 rendering of [`ENCODED_LEN`] bytes.
pub const MAX_BASE58_LEN: usize = 112;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
}

/// Position of a key in the derivation tree, as far as address flows care.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DerivedType {
    Master,
    Account,
    Other,
}

/// Maps a key's depth onto a [`DerivedType`] for one chain family.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthConvention {
    pub account_depth: u8,
    pub max_depth: u8,
}

impl DepthConvention {
    /// m / purpose' / coin_type' / account' / change / address_index
    pub const BIP44: DepthConvention = DepthConvention {
        account_depth: 3,
        max_depth: 5,
    };

    /// A master key has no parent, so its fingerprint and child number must be zero.
    pub fn classify(
        &self,
        depth: u8,
        parent_fingerprint: u32,
        child_number: u32,
    ) -> Result<DerivedType> {
        if depth == 0 {
            if parent_fingerprint != 0 || child_number != 0 {
                return Err(KeyError::UnsupportedDerivationType(depth));
            }
            return Ok(DerivedType::Master);
        }
        if depth > self.max_depth {
            return Err(KeyError::UnsupportedDerivationType(depth));
        }
        if depth == self.account_depth {
            Ok(DerivedType::Account)
        } else {
            Ok(DerivedType::Other)
        }
    }
}

impl Default for DepthConvention {
    fn default() -> Self {
        DepthConvention::BIP44
    }
}

/// A decoded and validated extended public key.
///
/// Only [`decode`] builds one, so the compressed key prefix and depth rules
/// already hold for every value of this type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedKeyRecord {
    version: u32,
    depth: u8,
    parent_fingerprint: u32,
    child_number: u32,
    chain_code: [u8; 32],
    compressed_public_key: [u8; 33],
    derived_type: DerivedType,
}

impl ExtendedKeyRecord {
    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn parent_fingerprint(&self) -> u32 {
        self.parent_fingerprint
    }

    pub fn child_number(&self) -> u32 {
        self.child_number
    }

    pub fn is_hardened(&self) -> bool {
        self.child_number >= HARDENED_OFFSET
    }

    /// Child number without the hardened bit.
    pub fn index(&self) -> u32 {
        self.child_number & !HARDENED_OFFSET
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    pub fn compressed_public_key(&self) -> &[u8; 33] {
        &self.compressed_public_key
    }

    pub fn derived_type(&self) -> DerivedType {
        self.derived_type
    }

    /// `None` for versions registered by the caller outside the BIP32 pair.
    pub fn network(&self) -> Option<Network> {
        match self.version {
            VERSION_MAINNET_PUBLIC => Some(Network::Mainnet),
            VERSION_TESTNET_PUBLIC => Some(Network::Testnet),
            _ => None,
        }
    }

    /// 4-byte key fingerprint: HASH160(pubkey)[0..4]. Children of this key
    /// carry it as their `parent_fingerprint`.
    pub fn key_fingerprint(&self) -> u32 {
        let id = hash160(&self.compressed_public_key);
        u32::from_be_bytes([id[0], id[1], id[2], id[3]])
    }

    /// Serialize back to Base58Check. `decode(record.encode(), ..)` yields `record`.
    pub fn encode(&self) -> String {
        let mut payload = Vec::with_capacity(PAYLOAD_LEN);
        payload.extend(&self.version.to_be_bytes());
        payload.push(self.depth);
        payload.extend(&self.parent_fingerprint.to_be_bytes());
        payload.extend(&self.child_number.to_be_bytes());
        payload.extend(&self.chain_code);
        payload.extend(&self.compressed_public_key);
        base58::base58_check_encode(&payload)
    }
}

/// Decode a Base58Check extended public key and validate it against the
/// versions and depth convention of one chain family.
///
/// Checks run in a fixed order (length, checksum, version, key prefix,
/// depth) so a given input always fails with the same error.
pub fn decode(
    s: &str,
    expected_versions: &[u32],
    convention: &DepthConvention,
) -> Result<ExtendedKeyRecord> {
    if s.len() > MAX_BASE58_LEN {
        // Base58 decoding is quadratic, so report a lower bound on the decoded
        // size (log 58 / log 256 > 0.732) instead of decoding.
        return Err(KeyError::WrongKeyLength(
            (s.len() * 732 / 1000).max(ENCODED_LEN + 1),
        ));
    }
    let raw = base58_decode(s)?;
    if raw.len() != ENCODED_LEN {
        return Err(KeyError::WrongKeyLength(raw.len()));
    }
    let (payload, checksum) = raw.split_at(PAYLOAD_LEN);
    if base58::checksum(payload) != checksum {
        return Err(KeyError::ChecksumMismatch);
    }
    let payload: &[u8; PAYLOAD_LEN] = payload
        .try_into()
        .map_err(|_| KeyError::WrongKeyLength(raw.len()))?;

    let version = be_u32(&payload[0..4]);
    let depth = payload[4];
    let parent_fingerprint = be_u32(&payload[5..9]);
    let child_number = be_u32(&payload[9..13]);
    let mut chain_code = [0u8; 32];
    chain_code.copy_from_slice(&payload[13..45]);
    let mut compressed_public_key = [0u8; 33];
    compressed_public_key.copy_from_slice(&payload[45..78]);

    // Private versions never appear in an accepted set, so an xprv stops here.
    if !expected_versions.contains(&version) {
        return Err(KeyError::UnexpectedVersion(version));
    }
    match compressed_public_key[0] {
        0x02 | 0x03 => {}
        prefix => return Err(KeyError::InvalidPublicKeyPrefix(prefix)),
    }
    let derived_type = convention.classify(depth, parent_fingerprint, child_number)?;

    Ok(ExtendedKeyRecord {
        version,
        depth,
        parent_fingerprint,
        child_number,
        chain_code,
        compressed_public_key,
        derived_type,
    })
}

fn be_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
