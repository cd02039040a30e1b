use crate::hash::sha256d;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Base58Error {
    InvalidCharacter(char),
    InvalidLength,
    InvalidChecksum,
}

pub const BASE58_ALPHABET: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Length of the double-SHA256 checksum appended by Base58Check.
pub const CHECKSUM_LEN: usize = 4;

pub fn base58_encode(data: &[u8]) -> String {
    let zeros = data.iter().take_while(|&&b| b == 0).count();
    let mut input = data[zeros..].to_vec();
    // Little-endian base-58 digits of the non-zero tail.
    let mut digits: Vec<u8> = Vec::with_capacity(data.len() * 138 / 100 + 1);
    while !input.is_empty() {
        let mut remainder: u32 = 0;
        let mut quotient: Vec<u8> = Vec::with_capacity(input.len());
        for &byte in input.iter() {
            let acc = (remainder << 8) | byte as u32;
            let digit = (acc / 58) as u8;
            remainder = acc % 58;
            if !quotient.is_empty() || digit != 0 {
                quotient.push(digit);
            }
        }
        digits.push(remainder as u8);
        input = quotient;
    }
    let mut encoded = String::with_capacity(zeros + digits.len());
    encoded.extend(std::iter::repeat_n('1', zeros));
    encoded.extend(
        digits
            .iter()
            .rev()
            .map(|&d| BASE58_ALPHABET[d as usize] as char),
    );
    encoded
}

/// Raw Base58 decode. The checksum, if any, is left in place.
pub fn base58_decode(s: &str) -> Result<Vec<u8>, Base58Error> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return Err(Base58Error::InvalidLength);
    }
    let zeros = bytes
        .iter()
        .take_while(|&&b| b == b'1')
        .count();
    let mut input: Vec<u8> = Vec::with_capacity(bytes.len() - zeros);
    for c in s.chars().skip(zeros) {
        match BASE58_ALPHABET.iter().position(|&a| a as char == c) {
            Some(idx) => input.push(idx as u8),
            None => return Err(Base58Error::InvalidCharacter(c)),
        }
    }

    let mut decoded: Vec<u8> = Vec::new();
    while !input.is_empty() {
        let mut remainder: u32 = 0;
        let mut quotient: Vec<u8> = Vec::with_capacity(input.len());
        for &digit in input.iter() {
            let accumulator = remainder * 58 + digit as u32;
            let q = (accumulator / 256) as u8;
            remainder = accumulator % 256;
            if !quotient.is_empty() || q != 0 {
                quotient.push(q);
            }
        }
        decoded.push(remainder as u8);
        input = quotient;
    }

    decoded.extend(std::iter::repeat_n(0u8, zeros));
    decoded.reverse();
    Ok(decoded)
}

/// First four bytes of `sha256d(payload)`.
pub fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = sha256d(payload);
    [digest[0], digest[1], digest[2], digest[3]]
}

pub fn base58_check_encode(payload: &[u8]) -> String {
    let mut extended = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    extended.extend_from_slice(payload);
    extended.extend_from_slice(&checksum(payload));
    base58_encode(&extended)
}

pub fn base58_check_decode(s: &str) -> Result<Vec<u8>, Base58Error> {
    let raw = base58_decode(s)?;
    if raw.len() < CHECKSUM_LEN {
        return Err(Base58Error::InvalidLength);
    }
    let (payload, check) = raw.split_at(raw.len() - CHECKSUM_LEN);
    if checksum(payload) != check {
        return Err(Base58Error::InvalidChecksum);
    }
    Ok(payload.to_vec())
}
