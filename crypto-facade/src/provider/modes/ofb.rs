//! OFB (Output Feedback) mode implementation

use crate::provider::block::BlockCipher;

pub struct Ofb {
    feedback: Vec<u8>,
    position: usize,
}

impl Ofb {
    pub fn new(iv: &[u8]) -> Self {
        Self {
            feedback: iv.to_vec(),
            position: iv.len(),
        }
    }

    /// OFB keystream application
    ///
    /// Algorithm:
    /// 1. O_0 = IV
    /// 2. O_i = E(K, O_{i-1}) for i = 1, 2, ..., n
    /// 3. C_i = P_i ⊕ O_i
    ///
    /// Since OFB is a stream cipher mode, decryption is identical to encryption.
    pub fn apply_keystream(&mut self, cipher: &dyn BlockCipher, data: &mut [u8]) {
        for byte in data.iter_mut() {
            if self.position == self.feedback.len() {
                cipher.encrypt_block(&mut self.feedback);
                self.position = 0;
            }
            *byte ^= self.feedback[self.position];
            self.position += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::modes::test_support::DummyCipher;

    #[test]
    fn test_ofb_encrypt_decrypt() {
        let cipher = DummyCipher::new(8);
        let iv = b"initialv";
        let plaintext = b"Hello World! This is a test message.".to_vec();

        let mut data = plaintext.clone();
        Ofb::new(iv).apply_keystream(&cipher, &mut data);
        Ofb::new(iv).apply_keystream(&cipher, &mut data);

        assert_eq!(data, plaintext);
    }

    #[test]
    fn test_ofb_partial_block() {
        let cipher = DummyCipher::new(8);
        let iv = b"initialv";
        let mut data = b"Hi".to_vec();

        Ofb::new(iv).apply_keystream(&cipher, &mut data);
        assert_eq!(data.len(), 2); // No padding in OFB
        Ofb::new(iv).apply_keystream(&cipher, &mut data);
        assert_eq!(&data, b"Hi");
    }
}
