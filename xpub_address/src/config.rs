use crate::chain::ChainId;
use crate::extended_key::DepthConvention;
use serde::{Deserialize, Serialize};

/// Engine settings supplied by the host application.
///
/// Every field has a default, so hosts can deserialize a partial document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Also accept `tpub` keys for EVM chains.
    pub accept_testnet_versions: bool,
    /// Render EVM addresses with EIP-55 mixed-case checksum.
    pub evm_checksum_case: bool,
    /// Restrict the registry to these chains; `None` enables all.
    pub enabled_chains: Option<Vec<ChainId>>,
    pub depth_convention: DepthConvention,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            accept_testnet_versions: false,
            evm_checksum_case: false,
            enabled_chains: None,
            depth_convention: DepthConvention::BIP44,
        }
    }
}

impl EngineConfig {
    pub fn is_enabled(&self, chain: ChainId) -> bool {
        match &self.enabled_chains {
            Some(chains) => chains.contains(&chain),
            None => true,
        }
    }
}
