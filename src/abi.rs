//! Calldata encoding for the reward token contract
//!
//! Only `claim(uint256,uint256)` is needed, so the encoder handles static
//! `uint256` arguments and nothing else.

use alloy_primitives::{keccak256, Bytes, U256};

pub const CLAIM_SIGNATURE: &str = "claim(uint256,uint256)";

/// First four bytes of the keccak hash of a canonical function signature
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash[..4]);
    selector
}

/// Selector followed by each argument as a 32-byte big-endian word
pub fn encode_call(signature: &str, args: &[U256]) -> Bytes {
    let mut data = Vec::with_capacity(4 + 32 * args.len());
    data.extend_from_slice(&function_selector(signature));
    for arg in args {
        data.extend_from_slice(&arg.to_be_bytes::<32>());
    }
    Bytes::from(data)
}

pub fn encode_claim_call(token_id: U256, amount: U256) -> Bytes {
    encode_call(CLAIM_SIGNATURE, &[token_id, amount])
}
