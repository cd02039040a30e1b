//! Address derivation from BIP32 extended public keys.
//!
//! An xpub string is decoded and validated ([`extended_key`]), its public
//! key is decompressed on secp256k1 ([`curve`]), and the point is encoded
//! for the requested chain ([`formatter`]). [`DerivationEngine`] runs the
//! pipeline; no private key is ever involved.

pub mod chain;
pub mod config;
pub mod curve;
pub mod engine;
pub mod error;
pub mod extended_key;
pub mod formatter;

pub use chain::{ChainFamily, ChainId, ChainParams};
pub use config::EngineConfig;
pub use curve::UncompressedPublicKey;
pub use engine::{AddressOutput, DerivationEngine, DerivedAddress, derive_address};
pub use error::{KeyError, Result};
pub use extended_key::{DepthConvention, DerivedType, ExtendedKeyRecord, Network};
pub use formatter::AddressFormatter;
