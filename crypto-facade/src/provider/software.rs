//! Pure-Rust provider built on the RustCrypto primitives

use hmac::{Hmac, Mac};
use md2::Md2;
use md4::Md4;
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

use super::block::{new_block_cipher, BlockCipher};
use super::modes::Chaining;
use super::rc4::Rc4;
use super::{CipherContext, CryptoProvider, HmacContext};
use crate::algorithm::{Algorithm, Mode, Operation, Padding};
use crate::digest::Digest;
use crate::error::ProviderStatus;
use crate::hmac::HmacAlgorithm;
use crate::utils;

/// Stateless provider; every call builds its own context.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftwareProvider;

impl CryptoProvider for SoftwareProvider {
    type Cipher = SoftwareCipherContext;
    type Hmac = SoftwareHmacContext;

    fn create(
        &self,
        operation: Operation,
        mode: Mode,
        algorithm: Algorithm,
        padding: Padding,
        iv: Option<&[u8]>,
        key: &[u8],
    ) -> Result<SoftwareCipherContext, ProviderStatus> {
        let engine = match (algorithm, mode) {
            (Algorithm::Rc4, Mode::Rc4) => Engine::Stream(Rc4::new(key)?),
            (Algorithm::Rc4, _) | (_, Mode::Rc4) => return Err(ProviderStatus::ParamError),
            _ => {
                let cipher = new_block_cipher(algorithm, key)?;
                let iv = match iv {
                    Some(iv) if iv.len() == cipher.block_size() => iv.to_vec(),
                    None if !mode.needs_iv() => vec![0u8; cipher.block_size()],
                    _ => return Err(ProviderStatus::ParamError),
                };
                let chaining = Chaining::new(mode, &iv)?;
                Engine::Block { cipher, chaining }
            }
        };

        Ok(SoftwareCipherContext {
            operation,
            padding,
            engine,
            pending: Zeroizing::new(Vec::new()),
            finished: false,
        })
    }

    fn hash(&self, digest: Digest, input: &[u8]) -> Vec<u8> {
        match digest {
            Digest::Md2 => one_shot::<Md2>(input),
            Digest::Md4 => one_shot::<Md4>(input),
            Digest::Md5 => one_shot::<Md5>(input),
            Digest::Sha1 => one_shot::<Sha1>(input),
            Digest::Sha224 => one_shot::<Sha224>(input),
            Digest::Sha256 => one_shot::<Sha256>(input),
            Digest::Sha384 => one_shot::<Sha384>(input),
            Digest::Sha512 => one_shot::<Sha512>(input),
        }
    }

    fn hmac_init(
        &self,
        algorithm: HmacAlgorithm,
        key: &[u8],
    ) -> Result<SoftwareHmacContext, ProviderStatus> {
        let context = match algorithm {
            HmacAlgorithm::Md5 => SoftwareHmacContext::Md5(keyed_mac(key)?),
            HmacAlgorithm::Sha1 => SoftwareHmacContext::Sha1(keyed_mac(key)?),
            HmacAlgorithm::Sha224 => SoftwareHmacContext::Sha224(keyed_mac(key)?),
            HmacAlgorithm::Sha256 => SoftwareHmacContext::Sha256(keyed_mac(key)?),
            HmacAlgorithm::Sha384 => SoftwareHmacContext::Sha384(keyed_mac(key)?),
            HmacAlgorithm::Sha512 => SoftwareHmacContext::Sha512(keyed_mac(key)?),
        };
        Ok(context)
    }
}

fn one_shot<D: sha2::Digest>(input: &[u8]) -> Vec<u8> {
    D::digest(input).to_vec()
}

fn keyed_mac<M: Mac + hmac::digest::KeyInit>(key: &[u8]) -> Result<M, ProviderStatus> {
    <M as Mac>::new_from_slice(key).map_err(|_| ProviderStatus::InvalidKey)
}

enum Engine {
    Block {
        cipher: Box<dyn BlockCipher>,
        chaining: Chaining,
    },
    Stream(Rc4),
}

/// Cipher context of [`SoftwareProvider`].
///
/// ECB and CBC buffer input until a whole block is available; with PKCS#7
/// decryption the last whole block is held back until [`finish`] so its
/// padding can be stripped.
///
/// [`finish`]: CipherContext::finish
pub struct SoftwareCipherContext {
    operation: Operation,
    padding: Padding,
    engine: Engine,
    pending: Zeroizing<Vec<u8>>,
    finished: bool,
}

impl SoftwareCipherContext {
    /// Bytes of buffered plus new input that `update` can emit right now.
    fn ready(&self, total: usize, block_size: usize) -> usize {
        let whole = total - total % block_size;
        let holds_last_block =
            self.operation == Operation::Decrypt && self.padding == Padding::Pkcs7;
        if holds_last_block && whole == total && whole > 0 {
            whole - block_size
        } else {
            whole
        }
    }
}

impl CipherContext for SoftwareCipherContext {
    fn output_length(&self, input_len: usize, is_final: bool) -> usize {
        let block_size = match &self.engine {
            Engine::Block { cipher, chaining } if chaining.is_block_mode() => cipher.block_size(),
            _ => return input_len,
        };
        let total = self.pending.len() + input_len;
        match (self.operation, self.padding) {
            (Operation::Encrypt, Padding::Pkcs7) if is_final => {
                (total / block_size + 1) * block_size
            }
            (Operation::Decrypt, _) => total,
            _ => total - total % block_size,
        }
    }

    fn update(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, ProviderStatus> {
        if self.finished {
            return Err(ProviderStatus::CallSequenceError);
        }

        let operation = self.operation;
        let block_size = match &mut self.engine {
            Engine::Stream(rc4) => {
                let out = output.get_mut(..input.len()).ok_or(ProviderStatus::BufferTooSmall)?;
                out.copy_from_slice(input);
                rc4.apply_keystream(out);
                return Ok(input.len());
            }
            Engine::Block { cipher, chaining } if !chaining.is_block_mode() => {
                let out = output.get_mut(..input.len()).ok_or(ProviderStatus::BufferTooSmall)?;
                out.copy_from_slice(input);
                chaining.apply(&**cipher, operation, out);
                return Ok(input.len());
            }
            Engine::Block { cipher, .. } => cipher.block_size(),
        };

        let ready = self.ready(self.pending.len() + input.len(), block_size);
        if output.len() < ready {
            return Err(ProviderStatus::BufferTooSmall);
        }
        self.pending.extend_from_slice(input);
        let out = &mut output[..ready];
        out.copy_from_slice(&self.pending[..ready]);
        self.pending.drain(..ready);

        if let Engine::Block { cipher, chaining } = &mut self.engine {
            chaining.apply(&**cipher, operation, out);
        }
        Ok(ready)
    }

    fn finish(&mut self, output: &mut [u8]) -> Result<usize, ProviderStatus> {
        if self.finished {
            return Err(ProviderStatus::CallSequenceError);
        }
        self.finished = true;

        let (cipher, chaining) = match &mut self.engine {
            Engine::Block { cipher, chaining } if chaining.is_block_mode() => (cipher, chaining),
            _ => return Ok(0),
        };
        let block_size = cipher.block_size();

        match (self.operation, self.padding) {
            (_, Padding::None) if self.pending.is_empty() => Ok(0),
            (_, Padding::None) => Err(ProviderStatus::AlignmentError),
            (Operation::Encrypt, Padding::Pkcs7) => {
                let mut block = Zeroizing::new(utils::add_padding(&self.pending, block_size));
                self.pending.clear();
                let out = output.get_mut(..block.len()).ok_or(ProviderStatus::BufferTooSmall)?;
                chaining.apply(&**cipher, Operation::Encrypt, &mut block);
                out.copy_from_slice(&block);
                Ok(block.len())
            }
            (Operation::Decrypt, Padding::Pkcs7) => {
                if self.pending.len() != block_size {
                    return Err(ProviderStatus::AlignmentError);
                }
                let mut block = Zeroizing::new(std::mem::take(&mut *self.pending));
                chaining.apply(&**cipher, Operation::Decrypt, &mut block);
                let len = utils::unpadded_len(&block).ok_or(ProviderStatus::DecodeError)?;
                let out = output.get_mut(..len).ok_or(ProviderStatus::BufferTooSmall)?;
                out.copy_from_slice(&block[..len]);
                Ok(len)
            }
        }
    }
}

/// HMAC context of [`SoftwareProvider`].
pub enum SoftwareHmacContext {
    Md5(Hmac<Md5>),
    Sha1(Hmac<Sha1>),
    Sha224(Hmac<Sha224>),
    Sha256(Hmac<Sha256>),
    Sha384(Hmac<Sha384>),
    Sha512(Hmac<Sha512>),
}

impl HmacContext for SoftwareHmacContext {
    fn update(&mut self, data: &[u8]) {
        match self {
            SoftwareHmacContext::Md5(mac) => mac.update(data),
            SoftwareHmacContext::Sha1(mac) => mac.update(data),
            SoftwareHmacContext::Sha224(mac) => mac.update(data),
            SoftwareHmacContext::Sha256(mac) => mac.update(data),
            SoftwareHmacContext::Sha384(mac) => mac.update(data),
            SoftwareHmacContext::Sha512(mac) => mac.update(data),
        }
    }

    fn finish(self, output: &mut [u8]) -> Result<usize, ProviderStatus> {
        let tag = match self {
            SoftwareHmacContext::Md5(mac) => mac.finalize().into_bytes().to_vec(),
            SoftwareHmacContext::Sha1(mac) => mac.finalize().into_bytes().to_vec(),
            SoftwareHmacContext::Sha224(mac) => mac.finalize().into_bytes().to_vec(),
            SoftwareHmacContext::Sha256(mac) => mac.finalize().into_bytes().to_vec(),
            SoftwareHmacContext::Sha384(mac) => mac.finalize().into_bytes().to_vec(),
            SoftwareHmacContext::Sha512(mac) => mac.finalize().into_bytes().to_vec(),
        };
        let out = output.get_mut(..tag.len()).ok_or(ProviderStatus::BufferTooSmall)?;
        out.copy_from_slice(&tag);
        Ok(tag.len())
    }
}
