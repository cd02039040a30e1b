use crate::config::EngineConfig;
use crate::error::KeyError;
use crate::extended_key::{DepthConvention, VERSION_MAINNET_PUBLIC, VERSION_TESTNET_PUBLIC};
use crate::formatter::{AddressFormatter, BitcoinP2pkhFormatter, EvmFormatter, TronFormatter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Chains the engine knows how to derive addresses for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChainId {
    Ethereum,
    BinanceSmartChain,
    Polygon,
    Avalanche,
    Optimism,
    ArbitrumOne,
    Base,
    Gnosis,
    Fantom,
    #[serde(rename = "zksync")]
    ZkSync,
    Tron,
    Bitcoin,
}

/// Chains sharing one address encoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainFamily {
    Evm,
    Tron,
    Bitcoin,
}

impl ChainId {
    pub const ALL: [ChainId; 12] = [
        ChainId::Ethereum,
        ChainId::BinanceSmartChain,
        ChainId::Polygon,
        ChainId::Avalanche,
        ChainId::Optimism,
        ChainId::ArbitrumOne,
        ChainId::Base,
        ChainId::Gnosis,
        ChainId::Fantom,
        ChainId::ZkSync,
        ChainId::Tron,
        ChainId::Bitcoin,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            ChainId::Ethereum => "ethereum",
            ChainId::BinanceSmartChain => "binance-smart-chain",
            ChainId::Polygon => "polygon",
            ChainId::Avalanche => "avalanche",
            ChainId::Optimism => "optimism",
            ChainId::ArbitrumOne => "arbitrum-one",
            ChainId::Base => "base",
            ChainId::Gnosis => "gnosis",
            ChainId::Fantom => "fantom",
            ChainId::ZkSync => "zksync",
            ChainId::Tron => "tron",
            ChainId::Bitcoin => "bitcoin",
        }
    }

    pub fn family(&self) -> ChainFamily {
        match self {
            ChainId::Tron => ChainFamily::Tron,
            ChainId::Bitcoin => ChainFamily::Bitcoin,
            _ => ChainFamily::Evm,
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ChainId {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, KeyError> {
        let s = s.trim();
        ChainId::ALL
            .into_iter()
            .find(|chain| chain.tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| KeyError::UnsupportedChain(s.to_string()))
    }
}

/// Everything chain-specific about turning an xpub into an address.
#[derive(Clone)]
pub struct ChainParams {
    accepted_versions: Vec<u32>,
    depth_convention: DepthConvention,
    formatter: Arc<dyn AddressFormatter>,
}

impl ChainParams {
    pub fn new(
        accepted_versions: Vec<u32>,
        depth_convention: DepthConvention,
        formatter: Arc<dyn AddressFormatter>,
    ) -> Self {
        ChainParams {
            accepted_versions,
            depth_convention,
            formatter,
        }
    }

    /// Default parameters of a family under `config`.
    pub fn for_family(family: ChainFamily, config: &EngineConfig) -> Self {
        let mut versions = vec![VERSION_MAINNET_PUBLIC];
        let formatter: Arc<dyn AddressFormatter> = match family {
            ChainFamily::Evm => {
                // EVM addresses carry no network byte.
                if config.accept_testnet_versions {
                    versions.push(VERSION_TESTNET_PUBLIC);
                }
                Arc::new(EvmFormatter {
                    checksum_case: config.evm_checksum_case,
                })
            }
            ChainFamily::Tron => Arc::new(TronFormatter),
            ChainFamily::Bitcoin => Arc::new(BitcoinP2pkhFormatter),
        };
        ChainParams::new(versions, config.depth_convention, formatter)
    }

    pub fn accepted_versions(&self) -> &[u32] {
        &self.accepted_versions
    }

    pub fn depth_convention(&self) -> &DepthConvention {
        &self.depth_convention
    }

    pub fn formatter(&self) -> &dyn AddressFormatter {
        self.formatter.as_ref()
    }
}

impl fmt::Debug for ChainParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainParams")
            .field("accepted_versions", &self.accepted_versions)
            .field("depth_convention", &self.depth_convention)
            .field("family", &self.formatter.family())
            .finish()
    }
}
