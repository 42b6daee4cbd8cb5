//! ECB (Electronic Code Book) mode implementation

use crate::provider::block::BlockCipher;

pub struct Ecb;

impl Ecb {
    /// ECB mode encryption
    pub fn encrypt(&mut self, cipher: &dyn BlockCipher, data: &mut [u8]) {
        for block in data.chunks_exact_mut(cipher.block_size()) {
            cipher.encrypt_block(block);
        }
    }

    /// ECB mode decryption
    pub fn decrypt(&mut self, cipher: &dyn BlockCipher, data: &mut [u8]) {
        for block in data.chunks_exact_mut(cipher.block_size()) {
            cipher.decrypt_block(block);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::modes::test_support::DummyCipher;

    #[test]
    fn test_ecb_identical_blocks_leak() {
        let cipher = DummyCipher::new(8);
        let mut data = b"samesamesamesame".to_vec();

        Ecb.encrypt(&cipher, &mut data);
        assert_eq!(data[..8], data[8..]);

        Ecb.decrypt(&cipher, &mut data);
        assert_eq!(&data, b"samesamesamesame");
    }
}
