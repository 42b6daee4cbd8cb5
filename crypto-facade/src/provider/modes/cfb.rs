//! CFB (Cipher Feedback) mode implementation, full-block segments

use crate::provider::block::BlockCipher;

pub struct Cfb {
    register: Vec<u8>,
    keystream: Vec<u8>,
    position: usize,
}

impl Cfb {
    pub fn new(iv: &[u8]) -> Self {
        Self {
            register: iv.to_vec(),
            keystream: vec![0u8; iv.len()],
            position: iv.len(),
        }
    }

    /// CFB mode encryption
    ///
    /// Algorithm:
    /// 1. O_i = E(K, C_{i-1}), with C_0 = IV
    /// 2. C_i = P_i ⊕ O_i
    pub fn encrypt(&mut self, cipher: &dyn BlockCipher, data: &mut [u8]) {
        for byte in data.iter_mut() {
            let key_byte = self.next_key_byte(cipher);
            *byte ^= key_byte;
            self.register[self.position - 1] = *byte;
        }
    }

    /// CFB mode decryption
    ///
    /// The feedback is the ciphertext, so decryption keeps the input byte.
    pub fn decrypt(&mut self, cipher: &dyn BlockCipher, data: &mut [u8]) {
        for byte in data.iter_mut() {
            let key_byte = self.next_key_byte(cipher);
            self.register[self.position - 1] = *byte;
            *byte ^= key_byte;
        }
    }

    fn next_key_byte(&mut self, cipher: &dyn BlockCipher) -> u8 {
        if self.position == self.keystream.len() {
            self.keystream.copy_from_slice(&self.register);
            cipher.encrypt_block(&mut self.keystream);
            self.position = 0;
        }
        self.position += 1;
        self.keystream[self.position - 1]
    }
}
