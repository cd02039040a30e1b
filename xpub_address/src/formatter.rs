//! Chain-native address encodings of an uncompressed secp256k1 key.
//!
//! A formatter receives a key that has already been validated by
//! [`crate::curve`], so formatting cannot fail.

use crate::chain::ChainFamily;
use crate::curve::UncompressedPublicKey;
use crypto_utils::{
    base58::base58_check_encode,
    hash::{hash160, keccak256},
};

/// Version byte prepended to Tron mainnet addresses.
pub const TRON_ADDRESS_PREFIX: u8 = 0x41;
/// Version byte of Bitcoin mainnet pay-to-pubkey-hash addresses.
pub const BITCOIN_P2PKH_PREFIX: u8 = 0x00;

pub trait AddressFormatter: Send + Sync {
    fn family(&self) -> ChainFamily;

    fn format(&self, key: &UncompressedPublicKey) -> String;
}

/// Last 20 bytes of Keccak-256(X || Y), shared by EVM and Tron.
pub fn keccak_account_id(key: &UncompressedPublicKey) -> [u8; 20] {
    let digest = keccak256(key.coordinates());
    let mut id = [0u8; 20];
    id.copy_from_slice(&digest[12..]);
    id
}

/// EIP-55 mixed-case rendering of a lowercase 40-digit hex address.
pub fn to_checksum_case(lower_hex: &str) -> String {
    let digest = keccak256(lower_hex.as_bytes());
    lower_hex
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let nibble = if i % 2 == 0 {
                digest[i / 2] >> 4
            } else {
                digest[i / 2] & 0x0f
            };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvmFormatter {
    pub checksum_case: bool,
}

impl AddressFormatter for EvmFormatter {
    fn family(&self) -> ChainFamily {
        ChainFamily::Evm
    }

    fn format(&self, key: &UncompressedPublicKey) -> String {
        let lower = hex::encode(keccak_account_id(key));
        if self.checksum_case {
            format!("0x{}", to_checksum_case(&lower))
        } else {
            format!("0x{lower}")
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TronFormatter;

impl AddressFormatter for TronFormatter {
    fn family(&self) -> ChainFamily {
        ChainFamily::Tron
    }

    fn format(&self, key: &UncompressedPublicKey) -> String {
        let mut payload = [0u8; 21];
        payload[0] = TRON_ADDRESS_PREFIX;
        payload[1..].copy_from_slice(&keccak_account_id(key));
        base58_check_encode(&payload)
    }
}

/// Legacy P2PKH over the compressed key encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BitcoinP2pkhFormatter;

impl AddressFormatter for BitcoinP2pkhFormatter {
    fn family(&self) -> ChainFamily {
        ChainFamily::Bitcoin
    }

    fn format(&self, key: &UncompressedPublicKey) -> String {
        let mut payload = [0u8; 21];
        payload[0] = BITCOIN_P2PKH_PREFIX;
        payload[1..].copy_from_slice(&hash160(&key.compress()));
        base58_check_encode(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::decompress;
    use crypto_utils::base58::base58_check_decode;
    use hex_literal::hex;

    fn key(compressed: [u8; 33]) -> UncompressedPublicKey {
        decompress(&compressed).unwrap()
    }

    // Public keys of private keys 1, 2 and 3.
    const K1: [u8; 33] = hex!("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");
    const K2: [u8; 33] = hex!("02c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5");
    const K3: [u8; 33] = hex!("02f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9");

    #[test]
    fn evm_known_addresses() {
        let evm = EvmFormatter::default();
        assert_eq!(evm.format(&key(K1)), "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf");
        assert_eq!(evm.format(&key(K2)), "0x2b5ad5c4795c026514f8317c7a215e218dccd6cf");
        assert_eq!(evm.format(&key(K3)), "0x6813eb9362372eef6200f3b1dbc3f819671cba69");
    }

    #[test]
    fn evm_checksum_case() {
        let evm = EvmFormatter {
            checksum_case: true,
        };
        assert_eq!(evm.format(&key(K1)), "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf");
        assert_eq!(evm.format(&key(K2)), "0x2B5AD5c4795c026514f8317c7a215E218DcCD6cF");
    }

    #[test]
    fn eip55_reference_vectors() {
        for expected in [
            "5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "fB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "dbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
            "D1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ] {
            assert_eq!(to_checksum_case(&expected.to_ascii_lowercase()), expected);
        }
    }

    #[test]
    fn tron_known_addresses() {
        let tron = TronFormatter;
        assert_eq!(tron.format(&key(K1)), "TMVQGm1qAQYVdetCeGRRkTWYYrLXuHK2HC");
        assert_eq!(tron.format(&key(K2)), "TDvSsdrNM5eeXNL3czpa6AxLDHZA9nwe9K");
        assert_eq!(tron.format(&key(K3)), "TKTX96CBxr5kvhjsDHcqoiPWZageGxoTW3");
    }

    #[test]
    fn tron_payload_wraps_evm_account_id() {
        let k = key(K1);
        let payload = base58_check_decode(&TronFormatter.format(&k)).unwrap();
        assert_eq!(payload.len(), 21);
        assert_eq!(payload[0], TRON_ADDRESS_PREFIX);
        assert_eq!(&payload[1..], &keccak_account_id(&k)[..]);
    }

    #[test]
    fn bitcoin_known_addresses() {
        let btc = BitcoinP2pkhFormatter;
        assert_eq!(btc.format(&key(K1)), "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
        assert_eq!(btc.format(&key(K2)), "1cMh228HTCiwS8ZsaakH8A8wze1JR5ZsP");
        assert_eq!(btc.format(&key(K3)), "1CUNEBjYrCn2y1SdiUMohaKUi4wpP326Lb");
    }

    #[test]
    fn families_produce_different_strings_for_one_point() {
        let k = key(K1);
        let formatters: [&dyn AddressFormatter; 3] =
            [&EvmFormatter::default(), &TronFormatter, &BitcoinP2pkhFormatter];
        let addresses: Vec<String> = formatters.iter().map(|f| f.format(&k)).collect();
        assert_ne!(addresses[0], addresses[1]);
        assert_ne!(addresses[1], addresses[2]);
        assert_ne!(addresses[0], addresses[2]);
        assert_eq!(formatters[0].family(), ChainFamily::Evm);
        assert_eq!(formatters[1].family(), ChainFamily::Tron);
        assert_eq!(formatters[2].family(), ChainFamily::Bitcoin);
    }
}
