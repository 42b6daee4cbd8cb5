//! One-shot message digests

use tracing::debug;

use crate::provider::{CryptoProvider, SoftwareProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Digest {
    Md2,
    Md4,
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl Digest {
    pub const ALL: [Digest; 8] = [
        Digest::Md2,
        Digest::Md4,
        Digest::Md5,
        Digest::Sha1,
        Digest::Sha224,
        Digest::Sha256,
        Digest::Sha384,
        Digest::Sha512,
    ];

    /// Output length in bytes.
    pub fn length(self) -> usize {
        match self {
            Digest::Md2 | Digest::Md4 | Digest::Md5 => 16,
            Digest::Sha1 => 20,
            Digest::Sha224 => 28,
            Digest::Sha256 => 32,
            Digest::Sha384 => 48,
            Digest::Sha512 => 64,
        }
    }

    /// Hash `data` with the built-in provider.
    pub fn process(self, data: &[u8]) -> Vec<u8> {
        self.process_with(&SoftwareProvider, data)
    }

    pub fn process_with<P: CryptoProvider>(self, provider: &P, data: &[u8]) -> Vec<u8> {
        debug!(digest = ?self, len = data.len(), "hashing");
        let output = provider.hash(self, data);
        debug_assert_eq!(output.len(), self.length());
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_digest(digest: Digest, data: &[u8]) -> String {
        hex::encode(digest.process(data))
    }

    #[test]
    fn test_known_answers() {
        assert_eq!(hex_digest(Digest::Md2, b"abc"), "da853b0d3f88d99b30283a69e6ded6bb");
        assert_eq!(hex_digest(Digest::Md4, b"abc"), "a448017aaf21d8525fc10ae87aa6729d");
        assert_eq!(hex_digest(Digest::Md5, b"abc"), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(hex_digest(Digest::Sha1, b"abc"), "a9993e364706816aba3e25717850c26c9cd0d89d");
        assert_eq!(
            hex_digest(Digest::Sha256, b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_i_am_fine() {
        assert_eq!(hex_digest(Digest::Md5, b"I am fine"), "75dc9bbfa6b55441d6ea91dcb2e6e900");
        assert_eq!(
            hex_digest(Digest::Sha1, b"I am fine"),
            "a4b8d1d7b17bf814694770e6deec44b07ded3c98"
        );
    }

    #[test]
    fn test_lengths_and_determinism() {
        for digest in Digest::ALL {
            let first = digest.process(b"fixed input");
            assert_eq!(first.len(), digest.length());
            assert_eq!(first, digest.process(b"fixed input"));
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(hex_digest(Digest::Md5, b""), "d41d8cd98f00b204e9800998ecf8427e");
    }
}
