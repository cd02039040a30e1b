use crate::chain::{ChainId, ChainParams};
use crate::config::EngineConfig;
use crate::curve::{UncompressedPublicKey, decompress};
use crate::error::{KeyError, Result};
use crate::extended_key;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, debug_span, warn};

/// Address and public key derived from one xpub for one chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivedAddress {
    pub address: String,
    pub public_key: UncompressedPublicKey,
    pub chain: ChainId,
}

/// Wire shape handed to the account setup flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressOutput {
    pub address: String,
    pub public_key_hex: String,
}

impl DerivedAddress {
    pub fn to_output(&self) -> AddressOutput {
        AddressOutput {
            address: self.address.clone(),
            public_key_hex: self.public_key.to_hex(),
        }
    }
}

/// Registry of chain parameters plus the decode → decompress → format pipeline.
///
/// Immutable once built; share it freely between threads.
#[derive(Clone, Debug)]
pub struct DerivationEngine {
    chains: HashMap<ChainId, ChainParams>,
}

impl DerivationEngine {
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        let chains = ChainId::ALL
            .into_iter()
            .filter(|&chain| config.is_enabled(chain))
            .map(|chain| (chain, ChainParams::for_family(chain.family(), config)))
            .collect();
        DerivationEngine { chains }
    }

    /// Register or replace the parameters used for `chain`.
    pub fn with_chain(mut self, chain: ChainId, params: ChainParams) -> Self {
        self.chains.insert(chain, params);
        self
    }

    pub fn supported_chains(&self) -> Vec<ChainId> {
        let mut chains: Vec<ChainId> = self.chains.keys().copied().collect();
        chains.sort();
        chains
    }

    pub fn params(&self, chain: ChainId) -> Result<&ChainParams> {
        self.chains
            .get(&chain)
            .ok_or_else(|| KeyError::UnsupportedChain(chain.tag().to_string()))
    }

    pub fn derive_address(&self, xpub: &str, chain: ChainId) -> Result<DerivedAddress> {
        let span = debug_span!("derive_address", chain = %chain);
        let _guard = span.enter();
        self.derive(xpub, chain).inspect_err(|err| {
            warn!(kind = err.kind(), error = %err, "extended key rejected");
        })
    }

    /// Same as [`derive_address`](Self::derive_address) with the chain given by tag.
    pub fn derive_address_for_tag(&self, xpub: &str, tag: &str) -> Result<DerivedAddress> {
        let chain = tag.parse::<ChainId>().inspect_err(|err| {
            warn!(kind = err.kind(), error = %err, "unknown chain tag");
        })?;
        self.derive_address(xpub, chain)
    }

    /// Derive one xpub for several chains; each result stands alone.
    pub fn derive_all(
        &self,
        xpub: &str,
        chains: &[ChainId],
    ) -> Vec<(ChainId, Result<DerivedAddress>)> {
        chains
            .iter()
            .map(|&chain| (chain, self.derive_address(xpub, chain)))
            .collect()
    }

    fn derive(&self, xpub: &str, chain: ChainId) -> Result<DerivedAddress> {
        let params = self.params(chain)?;
        let record = extended_key::decode(
            xpub,
            params.accepted_versions(),
            params.depth_convention(),
        )?;
        debug!(
            depth = record.depth(),
            derived_type = ?record.derived_type(),
            hardened = record.is_hardened(),
            "decoded extended key"
        );
        let public_key = decompress(record.compressed_public_key())?;
        let address = params.formatter().format(&public_key);
        debug!(family = ?params.formatter().family(), "derived address");
        Ok(DerivedAddress {
            address,
            public_key,
            chain,
        })
    }
}

impl Default for DerivationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive with the default engine configuration.
pub fn derive_address(xpub: &str, chain: ChainId) -> Result<DerivedAddress> {
    DerivationEngine::new().derive_address(xpub, chain)
}
