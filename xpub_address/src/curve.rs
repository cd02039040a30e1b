use crate::error::{KeyError, Result};
use secp256k1::PublicKey;
use std::fmt;

pub const COMPRESSED_LEN: usize = 33;
pub const UNCOMPRESSED_LEN: usize = 65;

const UNCOMPRESSED_PREFIX: u8 = 0x04;

/// `0x04 || X || Y`, always a point on secp256k1.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct UncompressedPublicKey([u8; UNCOMPRESSED_LEN]);

impl UncompressedPublicKey {
    /// Parse a 65-byte SEC1 uncompressed key, checking curve membership.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != UNCOMPRESSED_LEN {
            return Err(KeyError::InvalidPublicKeyLength(bytes.len()));
        }
        if bytes[0] != UNCOMPRESSED_PREFIX {
            return Err(KeyError::InvalidPublicKeyPrefix(bytes[0]));
        }
        let point = PublicKey::from_slice(bytes).map_err(|_| KeyError::PointNotOnCurve)?;
        Ok(UncompressedPublicKey(point.serialize_uncompressed()))
    }

    pub fn as_bytes(&self) -> &[u8; UNCOMPRESSED_LEN] {
        &self.0
    }

    pub fn x(&self) -> &[u8] {
        &self.0[1..33]
    }

    pub fn y(&self) -> &[u8] {
        &self.0[33..65]
    }

    /// X || Y without the prefix byte; the input to EVM-style hashing.
    pub fn coordinates(&self) -> &[u8] {
        &self.0[1..]
    }

    pub fn compress(&self) -> [u8; COMPRESSED_LEN] {
        let mut out = [0u8; COMPRESSED_LEN];
        out[0] = 0x02 | (self.0[64] & 1);
        out[1..].copy_from_slice(self.x());
        out
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for UncompressedPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UncompressedPublicKey({})", self.to_hex())
    }
}

/// Recover Y from a compressed secp256k1 key.
///
/// The square root of X³ + 7 mod p is taken by libsecp256k1, which also
/// rejects X >= p. The parity of the recovered Y is checked against the
/// selector byte before the point is returned.
pub fn decompress(compressed: &[u8; COMPRESSED_LEN]) -> Result<UncompressedPublicKey> {
    let parity = match compressed[0] {
        0x02 => 0,
        0x03 => 1,
        prefix => return Err(KeyError::InvalidPublicKeyPrefix(prefix)),
    };
    let point = PublicKey::from_slice(compressed).map_err(|_| KeyError::PointNotOnCurve)?;
    let key = UncompressedPublicKey(point.serialize_uncompressed());
    if key.0[64] & 1 != parity || key.x() != &compressed[1..] {
        return Err(KeyError::PointNotOnCurve);
    }
    Ok(key)
}
