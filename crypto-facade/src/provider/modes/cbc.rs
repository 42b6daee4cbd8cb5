//! CBC (Cipher Block Chaining) mode implementation

use crate::provider::block::BlockCipher;
use crate::utils;

pub struct Cbc {
    previous_block: Vec<u8>,
}

impl Cbc {
    pub fn new(iv: &[u8]) -> Self {
        Self {
            previous_block: iv.to_vec(),
        }
    }

    /// CBC mode encryption
    ///
    /// C_i = E(K, P_i ⊕ C_{i-1}), with C_0 = IV
    pub fn encrypt(&mut self, cipher: &dyn BlockCipher, data: &mut [u8]) {
        for block in data.chunks_exact_mut(cipher.block_size()) {
            utils::xor_in_place(block, &self.previous_block);
            cipher.encrypt_block(block);
            self.previous_block.copy_from_slice(block);
        }
    }

    /// CBC mode decryption
    ///
    /// P_i = D(K, C_i) ⊕ C_{i-1}
    pub fn decrypt(&mut self, cipher: &dyn BlockCipher, data: &mut [u8]) {
        let mut saved = vec![0u8; self.previous_block.len()];
        for block in data.chunks_exact_mut(cipher.block_size()) {
            saved.copy_from_slice(block);
            cipher.decrypt_block(block);
            utils::xor_in_place(block, &self.previous_block);
            std::mem::swap(&mut self.previous_block, &mut saved);
        }
    }
}
