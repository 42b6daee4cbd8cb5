//! Keyed-hash message authentication codes

use std::fmt;

use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{ProviderStatus, Result};
use crate::provider::{CryptoProvider, HmacContext, SoftwareProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HmacAlgorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl HmacAlgorithm {
    pub const ALL: [HmacAlgorithm; 6] = [
        HmacAlgorithm::Md5,
        HmacAlgorithm::Sha1,
        HmacAlgorithm::Sha224,
        HmacAlgorithm::Sha256,
        HmacAlgorithm::Sha384,
        HmacAlgorithm::Sha512,
    ];

    /// Tag length in bytes.
    pub fn digest_length(self) -> usize {
        match self {
            HmacAlgorithm::Md5 => 16,
            HmacAlgorithm::Sha1 => 20,
            HmacAlgorithm::Sha224 => 28,
            HmacAlgorithm::Sha256 => 32,
            HmacAlgorithm::Sha384 => 48,
            HmacAlgorithm::Sha512 => 64,
        }
    }
}

/// An HMAC algorithm together with its key.
///
/// Keys of any length are accepted; unlike the block ciphers there is no
/// key-size check.
#[derive(Clone, PartialEq, Eq)]
pub struct Hmac {
    algorithm: HmacAlgorithm,
    key: Zeroizing<Vec<u8>>,
}

impl Hmac {
    pub fn new(algorithm: HmacAlgorithm, key: impl AsRef<[u8]>) -> Self {
        Self {
            algorithm,
            key: Zeroizing::new(key.as_ref().to_vec()),
        }
    }

    pub fn algorithm(&self) -> HmacAlgorithm {
        self.algorithm
    }

    pub fn process(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.process_with(&SoftwareProvider, data)
    }

    pub fn process_with<P: CryptoProvider>(&self, provider: &P, data: &[u8]) -> Result<Vec<u8>> {
        debug!(algorithm = ?self.algorithm, len = data.len(), "computing hmac");
        let mut context = provider.hmac_init(self.algorithm, &self.key)?;
        context.update(data);

        let mut output = vec![0u8; self.algorithm.digest_length()];
        let written = context.finish(&mut output)?;
        if written != output.len() {
            return Err(ProviderStatus::DecodeError.into());
        }
        Ok(output)
    }
}

impl fmt::Debug for Hmac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hmac")
            .field("algorithm", &self.algorithm)
            .field("key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc2202_sha1() {
        let hmac = Hmac::new(HmacAlgorithm::Sha1, [0x0b; 20]);
        let tag = hmac.process(b"Hi There").unwrap();
        assert_eq!(hex::encode(tag), "b617318655057264e28bc0b6fb378c8ef146be00");
    }

    #[test]
    fn test_rfc4231_sha256() {
        let hmac = Hmac::new(HmacAlgorithm::Sha256, "Jefe");
        let tag = hmac.process(b"what do ya want for nothing?").unwrap();
        assert_eq!(
            hex::encode(tag),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_any_key_length() {
        for algorithm in HmacAlgorithm::ALL {
            for key_len in [0, 1, 7, 64, 200] {
                let tag = Hmac::new(algorithm, vec![0x5a; key_len]).process(b"data").unwrap();
                assert_eq!(tag.len(), algorithm.digest_length());
            }
        }
    }

    #[test]
    fn test_debug_redacts_key() {
        let hmac = Hmac::new(HmacAlgorithm::Md5, "super secret");
        assert!(!format!("{hmac:?}").contains("super secret"));
    }
}
