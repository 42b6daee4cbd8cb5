//! Chaining modes over a keyed block cipher
//!
//! ECB and CBC only ever see whole blocks; the caller buffers partial input
//! and applies padding. CFB, CFB8, OFB and CTR turn the block cipher into a
//! keystream and accept any length, carrying their position across calls.

pub mod cbc;
pub mod cfb;
pub mod cfb8;
pub mod ctr;
pub mod ecb;
pub mod ofb;

pub use cbc::Cbc;
pub use cfb::Cfb;
pub use cfb8::Cfb8;
pub use ctr::Ctr;
pub use ecb::Ecb;
pub use ofb::Ofb;

use super::block::BlockCipher;
use crate::algorithm::{Mode, Operation};
use crate::error::ProviderStatus;

/// Chaining state for one cipher context
pub enum Chaining {
    Ecb(Ecb),
    Cbc(Cbc),
    Cfb(Cfb),
    Cfb8(Cfb8),
    Ofb(Ofb),
    Ctr(Ctr),
}

impl Chaining {
    /// Start chaining for `mode`. `iv` must be one block long for every mode but ECB.
    pub fn new(mode: Mode, iv: &[u8]) -> Result<Self, ProviderStatus> {
        Ok(match mode {
            Mode::Ecb => Chaining::Ecb(Ecb),
            Mode::Cbc => Chaining::Cbc(Cbc::new(iv)),
            Mode::Cfb => Chaining::Cfb(Cfb::new(iv)),
            Mode::Cfb8 => Chaining::Cfb8(Cfb8::new(iv)),
            Mode::Ofb => Chaining::Ofb(Ofb::new(iv)),
            Mode::Ctr => Chaining::Ctr(Ctr::new(iv)),
            Mode::Rc4 => return Err(ProviderStatus::ParamError),
        })
    }

    /// Whether input must arrive in whole blocks.
    pub fn is_block_mode(&self) -> bool {
        matches!(self, Chaining::Ecb(_) | Chaining::Cbc(_))
    }

    /// Transform `data` in place.
    ///
    /// For ECB and CBC, `data.len()` must be a multiple of the block size.
    pub fn apply(&mut self, cipher: &dyn BlockCipher, operation: Operation, data: &mut [u8]) {
        match (self, operation) {
            (Chaining::Ecb(ecb), Operation::Encrypt) => ecb.encrypt(cipher, data),
            (Chaining::Ecb(ecb), Operation::Decrypt) => ecb.decrypt(cipher, data),
            (Chaining::Cbc(cbc), Operation::Encrypt) => cbc.encrypt(cipher, data),
            (Chaining::Cbc(cbc), Operation::Decrypt) => cbc.decrypt(cipher, data),
            (Chaining::Cfb(cfb), Operation::Encrypt) => cfb.encrypt(cipher, data),
            (Chaining::Cfb(cfb), Operation::Decrypt) => cfb.decrypt(cipher, data),
            (Chaining::Cfb8(cfb8), Operation::Encrypt) => cfb8.encrypt(cipher, data),
            (Chaining::Cfb8(cfb8), Operation::Decrypt) => cfb8.decrypt(cipher, data),
            (Chaining::Ofb(ofb), _) => ofb.apply_keystream(cipher, data),
            (Chaining::Ctr(ctr), _) => ctr.apply_keystream(cipher, data),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::BlockCipher;

    /// XOR with a repeating key; enough to exercise chaining without a real cipher.
    pub struct DummyCipher {
        pub key: Vec<u8>,
    }

    impl DummyCipher {
        pub fn new(block_size: usize) -> Self {
            Self {
                key: (1..=block_size as u8).collect(),
            }
        }
    }

    impl BlockCipher for DummyCipher {
        fn encrypt_block(&self, block: &mut [u8]) {
            for (b, k) in block.iter_mut().zip(&self.key) {
                *b = b.rotate_left(3) ^ k;
            }
        }

        fn decrypt_block(&self, block: &mut [u8]) {
            for (b, k) in block.iter_mut().zip(&self.key) {
                *b = (*b ^ k).rotate_right(3);
            }
        }

        fn block_size(&self) -> usize {
            self.key.len()
        }
    }
}
