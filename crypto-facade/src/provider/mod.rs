//! Cryptographic provider contract and the built-in software provider
//!
//! The engines in this crate never run a cipher round, a compression function
//! or an HMAC themselves. They validate their inputs and then drive a
//! [`CryptoProvider`] through a narrow protocol:
//!
//! - ciphers: [`create`](CryptoProvider::create) a context, query
//!   [`output_length`](CipherContext::output_length), then
//!   [`update`](CipherContext::update) and [`finish`](CipherContext::finish);
//! - digests: one-shot [`hash`](CryptoProvider::hash);
//! - HMAC: [`hmac_init`](CryptoProvider::hmac_init), then
//!   [`update`](HmacContext::update) and [`finish`](HmacContext::finish).
//!
//! Contexts are released when dropped.

pub mod block;
pub mod modes;
pub mod rc4;
mod software;

pub use software::{SoftwareCipherContext, SoftwareHmacContext, SoftwareProvider};

use crate::algorithm::{Algorithm, Mode, Operation, Padding};
use crate::digest::Digest;
use crate::error::ProviderStatus;
use crate::hmac::HmacAlgorithm;

/// A source of cipher, digest and HMAC primitives.
pub trait CryptoProvider {
    type Cipher: CipherContext;
    type Hmac: HmacContext;

    /// Create a cipher context.
    ///
    /// `iv` is `None` for modes that take no IV.
    fn create(
        &self,
        operation: Operation,
        mode: Mode,
        algorithm: Algorithm,
        padding: Padding,
        iv: Option<&[u8]>,
        key: &[u8],
    ) -> Result<Self::Cipher, ProviderStatus>;

    /// Hash `input` in one call. The result is `digest.length()` bytes.
    fn hash(&self, digest: Digest, input: &[u8]) -> Vec<u8>;

    /// Start a keyed hash. Any key length is accepted.
    fn hmac_init(&self, algorithm: HmacAlgorithm, key: &[u8]) -> Result<Self::Hmac, ProviderStatus>;
}

/// A live cipher operation.
pub trait CipherContext {
    /// Upper bound on the bytes produced by feeding `input_len` more bytes,
    /// including what [`finish`](Self::finish) flushes when `is_final` is set.
    fn output_length(&self, input_len: usize, is_final: bool) -> usize;

    /// Process `input`, writing into `output`. Returns the bytes written.
    fn update(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, ProviderStatus>;

    /// Flush buffered input, adding or removing padding. Returns the bytes written.
    fn finish(&mut self, output: &mut [u8]) -> Result<usize, ProviderStatus>;
}

/// A live HMAC computation.
pub trait HmacContext {
    fn update(&mut self, data: &[u8]);

    /// Write the tag into `output`. Returns the bytes written.
    fn finish(self, output: &mut [u8]) -> Result<usize, ProviderStatus>;
}
