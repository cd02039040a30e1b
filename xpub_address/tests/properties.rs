use crypto_utils::base58::{BASE58_ALPHABET, base58_check_encode, base58_decode, base58_encode};
use proptest::prelude::*;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use xpub_address::extended_key::{self, VERSION_MAINNET_PUBLIC};
use xpub_address::{ChainId, DepthConvention, DerivationEngine, KeyError};

const TV1_M: &str = "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8";

/// Serialize an xpub payload the way a hardware wallet hands it over.
fn xpub_from_parts(
    depth: u8,
    parent_fingerprint: u32,
    child_number: u32,
    chain_code: [u8; 32],
    public_key: &PublicKey,
) -> String {
    let mut payload = Vec::with_capacity(78);
    payload.extend(&VERSION_MAINNET_PUBLIC.to_be_bytes());
    payload.push(depth);
    payload.extend(&parent_fingerprint.to_be_bytes());
    payload.extend(&child_number.to_be_bytes());
    payload.extend(&chain_code);
    payload.extend(&public_key.serialize());
    base58_check_encode(&payload)
}

fn arb_public_key() -> impl Strategy<Value = PublicKey> {
    any::<[u8; 32]>().prop_filter_map("scalar out of range", |bytes| {
        let secp = Secp256k1::new();
        SecretKey::from_slice(&bytes)
            .ok()
            .map(|sk| PublicKey::from_secret_key(&secp, &sk))
    })
}

fn arb_chain() -> impl Strategy<Value = ChainId> {
    prop::sample::select(ChainId::ALL.to_vec())
}

proptest! {
    #[test]
    fn random_valid_xpubs_derive_deterministically(
        depth in 1u8..=5,
        parent_fingerprint in any::<u32>(),
        child_number in any::<u32>(),
        chain_code in any::<[u8; 32]>(),
        public_key in arb_public_key(),
        chain in arb_chain(),
    ) {
        let xpub = xpub_from_parts(depth, parent_fingerprint, child_number, chain_code, &public_key);
        let engine = DerivationEngine::new();
        let first = engine.derive_address(&xpub, chain).unwrap();
        let second = engine.derive_address(&xpub, chain).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.public_key.as_bytes(), &public_key.serialize_uncompressed());

        let record = extended_key::decode(&xpub, &[VERSION_MAINNET_PUBLIC], &DepthConvention::BIP44).unwrap();
        prop_assert_eq!(record.encode(), xpub);
        prop_assert_eq!(record.child_number(), child_number);
        prop_assert_eq!(record.index() | (record.is_hardened() as u32) << 31, child_number);
    }

    #[test]
    fn flipped_byte_is_caught_by_checksum(
        position in 0usize..82,
        mask in 1u8..=255,
        chain in arb_chain(),
    ) {
        let mut raw = base58_decode(TV1_M).unwrap();
        raw[position] ^= mask;
        let tampered = base58_encode(&raw);
        let err = DerivationEngine::new().derive_address(&tampered, chain).unwrap_err();
        prop_assert_eq!(err, KeyError::ChecksumMismatch);
    }

    #[test]
    fn replaced_character_never_yields_an_address(
        position in 0usize..111,
        replacement in 0usize..58,
        chain in arb_chain(),
    ) {
        let mut chars: Vec<u8> = TV1_M.as_bytes().to_vec();
        prop_assume!(position < chars.len());
        prop_assume!(chars[position] != BASE58_ALPHABET[replacement]);
        chars[position] = BASE58_ALPHABET[replacement];
        let tampered = String::from_utf8(chars).unwrap();
        let err = DerivationEngine::new().derive_address(&tampered, chain).unwrap_err();
        prop_assert!(
            matches!(err, KeyError::ChecksumMismatch | KeyError::WrongKeyLength(_)),
            "unexpected error {:?}",
            err
        );
    }

    #[test]
    fn wrong_lengths_are_rejected(
        bytes in prop::collection::vec(any::<u8>(), 0..200)
            .prop_filter("exactly 82 bytes", |b| b.len() != 82),
        chain in arb_chain(),
    ) {
        let encoded = base58_encode(&bytes);
        let err = DerivationEngine::new().derive_address(&encoded, chain).unwrap_err();
        if encoded.len() <= extended_key::MAX_BASE58_LEN {
            prop_assert_eq!(err, KeyError::WrongKeyLength(bytes.len()));
        } else {
            // Oversized strings report a lower bound without being decoded.
            prop_assert!(
                matches!(err, KeyError::WrongKeyLength(n) if n > extended_key::ENCODED_LEN && n <= bytes.len()),
                "unexpected error {:?}",
                err
            );
        }
    }
}
