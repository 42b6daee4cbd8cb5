//! CFB8 (8-bit Cipher Feedback) mode implementation

use crate::provider::block::BlockCipher;

pub struct Cfb8 {
    register: Vec<u8>,
    scratch: Vec<u8>,
}

impl Cfb8 {
    pub fn new(iv: &[u8]) -> Self {
        Self {
            register: iv.to_vec(),
            scratch: vec![0u8; iv.len()],
        }
    }

    /// CFB8 mode encryption
    ///
    /// Each byte is XORed with the first byte of E(K, register); the
    /// ciphertext byte is then shifted into the register.
    pub fn encrypt(&mut self, cipher: &dyn BlockCipher, data: &mut [u8]) {
        for byte in data.iter_mut() {
            *byte ^= self.key_byte(cipher);
            self.shift_in(*byte);
        }
    }

    /// CFB8 mode decryption
    pub fn decrypt(&mut self, cipher: &dyn BlockCipher, data: &mut [u8]) {
        for byte in data.iter_mut() {
            let ciphertext = *byte;
            *byte ^= self.key_byte(cipher);
            self.shift_in(ciphertext);
        }
    }

    fn key_byte(&mut self, cipher: &dyn BlockCipher) -> u8 {
        self.scratch.copy_from_slice(&self.register);
        cipher.encrypt_block(&mut self.scratch);
        self.scratch[0]
    }

    fn shift_in(&mut self, ciphertext: u8) {
        self.register.rotate_left(1);
        if let Some(last) = self.register.last_mut() {
            *last = ciphertext;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::modes::test_support::DummyCipher;

    #[test]
    fn test_cfb8_encrypt_decrypt() {
        let cipher = DummyCipher::new(16);
        let iv = b"initialization16";
        let plaintext = b"Hi".to_vec();

        let mut data = plaintext.clone();
        Cfb8::new(iv).encrypt(&cipher, &mut data);
        assert_eq!(data.len(), plaintext.len());

        Cfb8::new(iv).decrypt(&cipher, &mut data);
        assert_eq!(data, plaintext);
    }
}
