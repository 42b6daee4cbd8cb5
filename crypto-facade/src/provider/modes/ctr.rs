//! CTR (Counter) mode implementation

use crate::provider::block::BlockCipher;
use crate::utils;

pub struct Ctr {
    counter: Vec<u8>,
    keystream: Vec<u8>,
    position: usize,
}

impl Ctr {
    /// The whole IV is the initial counter block.
    pub fn new(iv: &[u8]) -> Self {
        Self {
            counter: iv.to_vec(),
            keystream: vec![0u8; iv.len()],
            position: iv.len(),
        }
    }

    /// CTR keystream application
    ///
    /// In CTR mode, a counter is used which is incremented for each block.
    /// The encryption of the counter is XORed with the data.
    ///
    /// Algorithm:
    /// 1. T_i = IV + i - 1 mod 2^(8 * block_size), big-endian
    /// 2. C_i = P_i ⊕ E(K, T_i)
    pub fn apply_keystream(&mut self, cipher: &dyn BlockCipher, data: &mut [u8]) {
        for byte in data.iter_mut() {
            if self.position == self.keystream.len() {
                self.keystream.copy_from_slice(&self.counter);
                cipher.encrypt_block(&mut self.keystream);
                utils::increment_be(&mut self.counter);
                self.position = 0;
            }
            *byte ^= self.keystream[self.position];
            self.position += 1;
        }
    }
}
