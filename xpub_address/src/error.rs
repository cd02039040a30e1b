use crypto_utils::base58::Base58Error;
use thiserror::Error;

/// Every way an extended public key can fail to yield an address.
///
/// All variants describe the input itself, so none of them is retryable:
/// the same string always fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("extended key decodes to {0} bytes, expected 82")]
    WrongKeyLength(usize),
    #[error("invalid base58 character {0:?}")]
    InvalidBase58(char),
    #[error("extended key checksum mismatch")]
    ChecksumMismatch,
    #[error("unexpected extended key version 0x{0:08x}")]
    UnexpectedVersion(u32),
    #[error("invalid public key prefix 0x{0:02x}")]
    InvalidPublicKeyPrefix(u8),
    #[error("public key is {0} bytes, expected 65")]
    InvalidPublicKeyLength(usize),
    #[error("public key is not a point on secp256k1")]
    PointNotOnCurve,
    #[error("unsupported derivation depth {0}")]
    UnsupportedDerivationType(u8),
    #[error("unsupported chain: {0}")]
    UnsupportedChain(String),
}

impl KeyError {
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Stable identifier for logs and metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            KeyError::WrongKeyLength(_) => "wrong_key_length",
            KeyError::InvalidBase58(_) => "invalid_base58",
            KeyError::ChecksumMismatch => "checksum_mismatch",
            KeyError::UnexpectedVersion(_) => "unexpected_version",
            KeyError::InvalidPublicKeyPrefix(_) => "invalid_public_key_prefix",
            KeyError::InvalidPublicKeyLength(_) => "invalid_public_key_length",
            KeyError::PointNotOnCurve => "point_not_on_curve",
            KeyError::UnsupportedDerivationType(_) => "unsupported_derivation_type",
            KeyError::UnsupportedChain(_) => "unsupported_chain",
        }
    }
}

impl From<Base58Error> for KeyError {
    fn from(err: Base58Error) -> Self {
        match err {
            // Only raised for empty input.
            Base58Error::InvalidLength => KeyError::WrongKeyLength(0),
            Base58Error::InvalidChecksum => KeyError::ChecksumMismatch,
            Base58Error::InvalidCharacter(c) => KeyError::InvalidBase58(c),
        }
    }
}

pub type Result<T> = std::result::Result<T, KeyError>;
