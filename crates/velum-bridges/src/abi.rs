//! minimal ABI plumbing for the directory contract
//!
//! covers exactly what the directory read needs: Keccak-256 function
//! selectors computed from the signature at runtime, and a word-oriented
//! decoder for the `getBridges()` return shape, a dynamic array of
//! `(address bridgeAddress, uint256 bridgeAddressId, string label)`
//! tuples. every offset and length is bounds-checked; malformed payloads
//! fail with a positioned error instead of panicking.

use sha3::{Digest, Keccak256};

use crate::error::{DirectoryError, Result};
use velum_sdk::EthAddress;

const WORD: usize = 32;

/// first four bytes of keccak256 over the canonical signature
pub fn function_selector(signature: &str) -> [u8; 4] {
    let mut hasher = Keccak256::new();
    hasher.update(signature.as_bytes());
    let digest = hasher.finalize();
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&digest[..4]);
    selector
}

/// one decoded directory row
#[derive(Clone, Debug, PartialEq)]
pub struct BridgeRow {
    pub address: EthAddress,
    pub id: u64,
    pub label: String,
}

/// decode the `getBridges()` return payload
pub fn decode_bridge_rows(payload: &[u8]) -> Result<Vec<BridgeRow>> {
    let array = uint_at(payload, 0)? as usize;
    let len = uint_at(payload, array)? as usize;
    if len > payload.len() / WORD {
        return Err(DirectoryError::Abi(format!(
            "implausible array length {len} for {} bytes",
            payload.len()
        )));
    }

    // element offsets are relative to the start of the element region
    let elements = array + WORD;
    let mut rows = Vec::with_capacity(len);
    for i in 0..len {
        let head = uint_at(payload, elements + i * WORD)? as usize;
        let tuple = offset_add(elements, head)?;
        let address = address_at(payload, tuple)?;
        let id = uint_at(payload, tuple + WORD)?;
        let label_offset = uint_at(payload, tuple + 2 * WORD)? as usize;
        let label = string_at(payload, offset_add(tuple, label_offset)?)?;
        rows.push(BridgeRow { address, id, label });
    }
    Ok(rows)
}

// offsets come straight off the wire, so additions must not wrap
fn offset_add(base: usize, offset: usize) -> Result<usize> {
    base.checked_add(offset)
        .ok_or_else(|| DirectoryError::Abi(format!("offset overflow at byte {base}")))
}

fn word_at(data: &[u8], offset: usize) -> Result<&[u8]> {
    let end = offset_add(offset, WORD)?;
    data.get(offset..end)
        .ok_or_else(|| DirectoryError::Abi(format!("truncated word at byte {offset}")))
}

fn uint_at(data: &[u8], offset: usize) -> Result<u64> {
    let word = word_at(data, offset)?;
    if word[..WORD - 8].iter().any(|&b| b != 0) {
        return Err(DirectoryError::Abi(format!(
            "uint at byte {offset} exceeds u64"
        )));
    }
    Ok(word[WORD - 8..]
        .iter()
        .fold(0u64, |acc, &b| (acc << 8) | b as u64))
}

fn address_at(data: &[u8], offset: usize) -> Result<EthAddress> {
    let word = word_at(data, offset)?;
    if word[..12].iter().any(|&b| b != 0) {
        return Err(DirectoryError::Abi(format!(
            "address at byte {offset} has nonzero padding"
        )));
    }
    let mut out = [0u8; 20];
    out.copy_from_slice(&word[12..]);
    Ok(EthAddress(out))
}

fn string_at(data: &[u8], offset: usize) -> Result<String> {
    let len = uint_at(data, offset)? as usize;
    let start = offset + WORD;
    let end = offset_add(start, len)?;
    let bytes = data
        .get(start..end)
        .ok_or_else(|| DirectoryError::Abi(format!("truncated string at byte {start}")))?;
    String::from_utf8(bytes.to_vec())
        .map_err(|e| DirectoryError::Abi(format!("label is not utf-8: {e}")))
}
