//! Utility functions for padding and block arithmetic

/// Append PKCS#7 padding so the result is a whole number of blocks.
///
/// Always adds between 1 and `block_size` bytes.
pub fn add_padding(data: &[u8], block_size: usize) -> Vec<u8> {
    let padding_needed = block_size - data.len() % block_size;
    let mut padded = Vec::with_capacity(data.len() + padding_needed);
    padded.extend_from_slice(data);
    padded.resize(data.len() + padding_needed, padding_needed as u8);
    padded
}

/// Length of `block` once its PKCS#7 padding is stripped.
///
/// Returns `None` when the padding bytes are malformed.
pub fn unpadded_len(block: &[u8]) -> Option<usize> {
    let pad = *block.last()? as usize;
    if pad == 0 || pad > block.len() {
        return None;
    }
    let (data, padding) = block.split_at(block.len() - pad);
    padding
        .iter()
        .all(|&b| b as usize == pad)
        .then_some(data.len())
}

/// XOR `mask` into `data` in place.
pub fn xor_in_place(data: &mut [u8], mask: &[u8]) {
    debug_assert_eq!(data.len(), mask.len());
    for (d, m) in data.iter_mut().zip(mask) {
        *d ^= m;
    }
}

/// Increment a big-endian counter spanning the whole slice, wrapping at the top.
pub fn increment_be(counter: &mut [u8]) {
    for byte in counter.iter_mut().rev() {
        let (value, carry) = byte.overflowing_add(1);
        *byte = value;
        if !carry {
            break;
        }
    }
}
