//! Keyed block primitives

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256};
use blowfish::Blowfish;
use cast5::Cast5;
use des::{Des, TdesEde3};
use rc2::Rc2;

use crate::algorithm::Algorithm;
use crate::error::ProviderStatus;

/// A block cipher bound to its key
pub trait BlockCipher: Send {
    /// Encrypts a single block in place
    fn encrypt_block(&self, block: &mut [u8]);

    /// Decrypts a single block in place
    fn decrypt_block(&self, block: &mut [u8]);

    /// Returns the block size of the cipher
    fn block_size(&self) -> usize;
}

struct Keyed<C> {
    inner: C,
    block_size: usize,
}

impl<C> BlockCipher for Keyed<C>
where
    C: BlockEncrypt + BlockDecrypt + Send,
{
    fn encrypt_block(&self, block: &mut [u8]) {
        self.inner.encrypt_block(GenericArray::from_mut_slice(block));
    }

    fn decrypt_block(&self, block: &mut [u8]) {
        self.inner.decrypt_block(GenericArray::from_mut_slice(block));
    }

    fn block_size(&self) -> usize {
        self.block_size
    }
}

fn keyed<C>(key: &[u8], block_size: usize) -> Result<Box<dyn BlockCipher>, ProviderStatus>
where
    C: KeyInit + BlockEncrypt + BlockDecrypt + Send + 'static,
{
    let inner = C::new_from_slice(key).map_err(|_| ProviderStatus::KeySizeError)?;
    Ok(Box::new(Keyed { inner, block_size }))
}

/// Expand `key` for `algorithm`.
///
/// RC4 is a stream cipher and has no block primitive.
pub fn new_block_cipher(
    algorithm: Algorithm,
    key: &[u8],
) -> Result<Box<dyn BlockCipher>, ProviderStatus> {
    let block_size = algorithm.block_size();
    if !algorithm.is_valid_key_size(key.len()) {
        return Err(ProviderStatus::KeySizeError);
    }
    match algorithm {
        Algorithm::Aes => match key.len() {
            16 => keyed::<Aes128>(key, block_size),
            24 => keyed::<Aes192>(key, block_size),
            _ => keyed::<Aes256>(key, block_size),
        },
        Algorithm::Des => keyed::<Des>(key, block_size),
        Algorithm::TripleDes => keyed::<TdesEde3>(key, block_size),
        Algorithm::Cast => keyed::<Cast5>(key, block_size),
        Algorithm::Rc2 => keyed::<Rc2>(key, block_size),
        Algorithm::Blowfish => keyed::<Blowfish>(key, block_size),
        Algorithm::Rc4 => Err(ProviderStatus::ParamError),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aes128_known_answer() {
        // FIPS-197 appendix C.1
        let key = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let mut block = hex::decode("00112233445566778899aabbccddeeff").unwrap();
        let cipher = new_block_cipher(Algorithm::Aes, &key).unwrap();

        cipher.encrypt_block(&mut block);
        assert_eq!(hex::encode(&block), "69c4e0d86a7b0430d8cdb78070b4c55a");

        cipher.decrypt_block(&mut block);
        assert_eq!(hex::encode(&block), "00112233445566778899aabbccddeeff");
    }

    #[test]
    fn test_every_block_algorithm_inverts() {
        for algorithm in Algorithm::ALL.into_iter().filter(|a| *a != Algorithm::Rc4) {
            let key: Vec<u8> = (1..=algorithm.key_sizes().to_vec()[0] as u8).collect();
            let cipher = new_block_cipher(algorithm, &key).unwrap();
            assert_eq!(cipher.block_size(), algorithm.block_size());

            let original: Vec<u8> = (0..algorithm.block_size() as u8).collect();
            let mut block = original.clone();
            cipher.encrypt_block(&mut block);
            assert_ne!(block, original);
            cipher.decrypt_block(&mut block);
            assert_eq!(block, original);
        }
    }

    #[test]
    fn test_every_legal_key_length_is_accepted() {
        for algorithm in Algorithm::ALL.into_iter().filter(|a| *a != Algorithm::Rc4) {
            for len in algorithm.key_sizes().to_vec() {
                let key = vec![0x5au8; len];
                assert!(new_block_cipher(algorithm, &key).is_ok(), "{algorithm} with {len} bytes");
            }
        }
    }

    #[test]
    fn test_rejects_bad_key_size() {
        assert!(matches!(
            new_block_cipher(Algorithm::Aes, &[0u8; 15]),
            Err(ProviderStatus::KeySizeError)
        ));
        assert!(matches!(
            new_block_cipher(Algorithm::Rc4, &[0u8; 16]),
            Err(ProviderStatus::ParamError)
        ));
    }
}
