//! Declarative processing options and their dispatch
//!
//! A [`ProcessOptions`] value says what to do with a buffer (encrypt, decrypt,
//! hash, authenticate or only re-encode) and carries exactly the settings that
//! method needs. It can be built directly, through the preset constructors,
//! or from a [`Method`] plus a loosely filled [`Parameters`] bag.
//!
//! Byte input goes straight to the engine. Text input is first decoded with
//! the `from` encoding and the result is encoded with the `to` encoding; when
//! unset these default per method:
//!
//! | method          | from   | to     |
//! |-----------------|--------|--------|
//! | encrypt         | utf8   | base64 |
//! | decrypt         | base64 | utf8   |
//! | digest, hmac    | utf8   | hex    |
//! | change encoding | utf8   | utf8   |

use std::fmt;

use tracing::debug;
use zeroize::Zeroizing;

use crate::algorithm::{Algorithm, Mode, Operation, Padding};
use crate::cipher::CipherConfig;
use crate::digest::Digest;
use crate::encoding::{self, Encoding};
use crate::error::{CryptoError, Result};
use crate::hmac::{Hmac, HmacAlgorithm};
use crate::provider::{CryptoProvider, SoftwareProvider};

/// What a [`ProcessOptions`] value does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Encrypt(Algorithm),
    Decrypt(Algorithm),
    Digest(Digest),
    Hmac(HmacAlgorithm),
    ChangeEncoding,
}

/// Named options, any of which may be left unset.
///
/// Which ones matter depends on the [`Method`]; the rest are ignored.
#[derive(Clone, Default)]
pub struct Parameters {
    key: Option<Zeroizing<Vec<u8>>>,
    iv: Option<Vec<u8>>,
    mode: Option<Mode>,
    padding: Option<Padding>,
    from_encoding: Option<Encoding>,
    to_encoding: Option<Encoding>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: impl AsRef<[u8]>) -> Self {
        self.key = Some(Zeroizing::new(key.as_ref().to_vec()));
        self
    }

    pub fn iv(mut self, iv: impl AsRef<[u8]>) -> Self {
        self.iv = Some(iv.as_ref().to_vec());
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn from_encoding(mut self, encoding: Encoding) -> Self {
        self.from_encoding = Some(encoding);
        self
    }

    pub fn to_encoding(mut self, encoding: Encoding) -> Self {
        self.to_encoding = Some(encoding);
        self
    }
}

impl fmt::Debug for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameters")
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("iv", &self.iv.as_ref().map(hex::encode))
            .field("mode", &self.mode)
            .field("padding", &self.padding)
            .field("from_encoding", &self.from_encoding)
            .field("to_encoding", &self.to_encoding)
            .finish()
    }
}

/// Text encodings for the text-level entry points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextEncodings {
    pub from: Option<Encoding>,
    pub to: Option<Encoding>,
}

impl TextEncodings {
    pub const UNSET: TextEncodings = TextEncodings { from: None, to: None };

    fn resolve(self, from: Encoding, to: Encoding) -> (Encoding, Encoding) {
        (self.from.unwrap_or(from), self.to.unwrap_or(to))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherOptions {
    pub cipher: CipherConfig,
    pub encodings: TextEncodings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestOptions {
    pub digest: Digest,
    pub encodings: TextEncodings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HmacOptions {
    pub hmac: Hmac,
    pub encodings: TextEncodings,
}

/// A complete description of one transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOptions {
    Encrypt(CipherOptions),
    Decrypt(CipherOptions),
    Digest(DigestOptions),
    Hmac(HmacOptions),
    ChangeEncoding(TextEncodings),
}

macro_rules! digest_preset {
    ($($name:ident => $digest:ident),* $(,)?) => {
        $(
            pub const $name: ProcessOptions = ProcessOptions::Digest(DigestOptions {
                digest: Digest::$digest,
                encodings: TextEncodings::UNSET,
            });
        )*
    };
}

impl ProcessOptions {
    digest_preset! {
        MD2 => Md2,
        MD4 => Md4,
        MD5 => Md5,
        SHA1 => Sha1,
        SHA224 => Sha224,
        SHA256 => Sha256,
        SHA384 => Sha384,
        SHA512 => Sha512,
    }

    /// Build typed options from a method and a parameter bag.
    ///
    /// Encrypt, decrypt and HMAC require a key and fail with
    /// [`CryptoError::InvalidKey`] without one. Unset mode and padding fall
    /// back to CBC and PKCS#7; an unset IV is empty.
    pub fn new(method: Method, parameters: Parameters) -> Result<Self> {
        let encodings = TextEncodings {
            from: parameters.from_encoding,
            to: parameters.to_encoding,
        };
        let options = match method {
            Method::Encrypt(algorithm) | Method::Decrypt(algorithm) => {
                let key = parameters.key.ok_or(CryptoError::InvalidKey)?;
                let mut cipher = CipherConfig::new(algorithm, &*key)
                    .with_iv(parameters.iv.unwrap_or_default());
                if let Some(mode) = parameters.mode {
                    cipher = cipher.with_mode(mode);
                }
                if let Some(padding) = parameters.padding {
                    cipher = cipher.with_padding(padding);
                }
                let options = CipherOptions { cipher, encodings };
                if matches!(method, Method::Encrypt(_)) {
                    ProcessOptions::Encrypt(options)
                } else {
                    ProcessOptions::Decrypt(options)
                }
            }
            Method::Digest(digest) => ProcessOptions::Digest(DigestOptions { digest, encodings }),
            Method::Hmac(algorithm) => {
                let key = parameters.key.ok_or(CryptoError::InvalidKey)?;
                ProcessOptions::Hmac(HmacOptions {
                    hmac: Hmac::new(algorithm, &*key),
                    encodings,
                })
            }
            Method::ChangeEncoding => ProcessOptions::ChangeEncoding(encodings),
        };
        Ok(options)
    }

    pub fn encrypt(cipher: CipherConfig) -> Self {
        ProcessOptions::Encrypt(CipherOptions {
            cipher,
            encodings: TextEncodings::UNSET,
        })
    }

    pub fn decrypt(cipher: CipherConfig) -> Self {
        ProcessOptions::Decrypt(CipherOptions {
            cipher,
            encodings: TextEncodings::UNSET,
        })
    }

    pub fn digest(digest: Digest) -> Self {
        ProcessOptions::Digest(DigestOptions {
            digest,
            encodings: TextEncodings::UNSET,
        })
    }

    pub fn change_encoding(from: Encoding, to: Encoding) -> Self {
        ProcessOptions::ChangeEncoding(TextEncodings {
            from: Some(from),
            to: Some(to),
        })
    }

    /// Cipher options with CBC mode and PKCS#7 padding.
    ///
    /// RC4 always runs in its stream mode. The other presets can be moved to
    /// another mode or padding with [`with_mode`](Self::with_mode) and
    /// [`with_padding`](Self::with_padding).
    pub fn symmetric(
        algorithm: Algorithm,
        operation: Operation,
        key: impl AsRef<[u8]>,
        iv: impl AsRef<[u8]>,
    ) -> Self {
        let mut cipher = CipherConfig::new(algorithm, key).with_iv(iv);
        if algorithm == Algorithm::Rc4 {
            cipher = cipher.with_mode(Mode::Rc4);
        }
        match operation {
            Operation::Encrypt => Self::encrypt(cipher),
            Operation::Decrypt => Self::decrypt(cipher),
        }
    }

    pub fn aes(operation: Operation, key: impl AsRef<[u8]>, iv: impl AsRef<[u8]>) -> Self {
        Self::symmetric(Algorithm::Aes, operation, key, iv)
    }

    pub fn des(operation: Operation, key: impl AsRef<[u8]>, iv: impl AsRef<[u8]>) -> Self {
        Self::symmetric(Algorithm::Des, operation, key, iv)
    }

    pub fn triple_des(operation: Operation, key: impl AsRef<[u8]>, iv: impl AsRef<[u8]>) -> Self {
        Self::symmetric(Algorithm::TripleDes, operation, key, iv)
    }

    pub fn cast(operation: Operation, key: impl AsRef<[u8]>, iv: impl AsRef<[u8]>) -> Self {
        Self::symmetric(Algorithm::Cast, operation, key, iv)
    }

    pub fn rc2(operation: Operation, key: impl AsRef<[u8]>, iv: impl AsRef<[u8]>) -> Self {
        Self::symmetric(Algorithm::Rc2, operation, key, iv)
    }

    pub fn blowfish(operation: Operation, key: impl AsRef<[u8]>, iv: impl AsRef<[u8]>) -> Self {
        Self::symmetric(Algorithm::Blowfish, operation, key, iv)
    }

    pub fn rc4(operation: Operation, key: impl AsRef<[u8]>) -> Self {
        Self::symmetric(Algorithm::Rc4, operation, key, [0u8; 0])
    }

    pub fn hmac(algorithm: HmacAlgorithm, key: impl AsRef<[u8]>) -> Self {
        ProcessOptions::Hmac(HmacOptions {
            hmac: Hmac::new(algorithm, key),
            encodings: TextEncodings::UNSET,
        })
    }

    pub fn hmac_md5(key: impl AsRef<[u8]>) -> Self {
        Self::hmac(HmacAlgorithm::Md5, key)
    }

    pub fn hmac_sha1(key: impl AsRef<[u8]>) -> Self {
        Self::hmac(HmacAlgorithm::Sha1, key)
    }

    pub fn hmac_sha224(key: impl AsRef<[u8]>) -> Self {
        Self::hmac(HmacAlgorithm::Sha224, key)
    }

    pub fn hmac_sha256(key: impl AsRef<[u8]>) -> Self {
        Self::hmac(HmacAlgorithm::Sha256, key)
    }

    pub fn hmac_sha384(key: impl AsRef<[u8]>) -> Self {
        Self::hmac(HmacAlgorithm::Sha384, key)
    }

    pub fn hmac_sha512(key: impl AsRef<[u8]>) -> Self {
        Self::hmac(HmacAlgorithm::Sha512, key)
    }

    /// Override the encoding text input is decoded with.
    pub fn with_from_encoding(mut self, encoding: Encoding) -> Self {
        self.encodings_mut().from = Some(encoding);
        self
    }

    /// Override the encoding text output is produced in.
    pub fn with_to_encoding(mut self, encoding: Encoding) -> Self {
        self.encodings_mut().to = Some(encoding);
        self
    }

    /// Run the cipher in `mode`. Has no effect on non-cipher options.
    pub fn with_mode(self, mode: Mode) -> Self {
        self.map_cipher(|cipher| cipher.with_mode(mode))
    }

    /// Use `padding` for the cipher. Has no effect on non-cipher options.
    pub fn with_padding(self, padding: Padding) -> Self {
        self.map_cipher(|cipher| cipher.with_padding(padding))
    }

    fn map_cipher(self, f: impl FnOnce(CipherConfig) -> CipherConfig) -> Self {
        match self {
            ProcessOptions::Encrypt(CipherOptions { cipher, encodings }) => {
                ProcessOptions::Encrypt(CipherOptions { cipher: f(cipher), encodings })
            }
            ProcessOptions::Decrypt(CipherOptions { cipher, encodings }) => {
                ProcessOptions::Decrypt(CipherOptions { cipher: f(cipher), encodings })
            }
            other => other,
        }
    }

    pub fn method(&self) -> Method {
        match self {
            ProcessOptions::Encrypt(options) => Method::Encrypt(options.cipher.algorithm()),
            ProcessOptions::Decrypt(options) => Method::Decrypt(options.cipher.algorithm()),
            ProcessOptions::Digest(options) => Method::Digest(options.digest),
            ProcessOptions::Hmac(options) => Method::Hmac(options.hmac.algorithm()),
            ProcessOptions::ChangeEncoding(_) => Method::ChangeEncoding,
        }
    }

    fn encodings(&self) -> TextEncodings {
        match self {
            ProcessOptions::Encrypt(options) | ProcessOptions::Decrypt(options) => {
                options.encodings
            }
            ProcessOptions::Digest(options) => options.encodings,
            ProcessOptions::Hmac(options) => options.encodings,
            ProcessOptions::ChangeEncoding(encodings) => *encodings,
        }
    }

    fn encodings_mut(&mut self) -> &mut TextEncodings {
        match self {
            ProcessOptions::Encrypt(options) | ProcessOptions::Decrypt(options) => {
                &mut options.encodings
            }
            ProcessOptions::Digest(options) => &mut options.encodings,
            ProcessOptions::Hmac(options) => &mut options.encodings,
            ProcessOptions::ChangeEncoding(encodings) => encodings,
        }
    }

    /// The (from, to) encodings for text input, with defaults filled in.
    pub fn text_encodings(&self) -> (Encoding, Encoding) {
        let encodings = self.encodings();
        match self {
            ProcessOptions::Encrypt(_) => encodings.resolve(Encoding::Utf8, Encoding::Base64),
            ProcessOptions::Decrypt(_) => encodings.resolve(Encoding::Base64, Encoding::Utf8),
            ProcessOptions::Digest(_) | ProcessOptions::Hmac(_) => {
                encodings.resolve(Encoding::Utf8, Encoding::Hex)
            }
            ProcessOptions::ChangeEncoding(_) => encodings.resolve(Encoding::Utf8, Encoding::Utf8),
        }
    }

    /// Apply the transform to raw bytes with the built-in provider.
    pub fn process(&self, data: impl AsRef<[u8]>) -> Result<Vec<u8>> {
        self.process_with(&SoftwareProvider, data)
    }

    pub fn process_with<P: CryptoProvider>(
        &self,
        provider: &P,
        data: impl AsRef<[u8]>,
    ) -> Result<Vec<u8>> {
        let data = data.as_ref();
        debug!(method = ?self.method(), len = data.len(), "dispatching");
        match self {
            ProcessOptions::Encrypt(options) => {
                options.cipher.process_with(provider, Operation::Encrypt, data)
            }
            ProcessOptions::Decrypt(options) => {
                options.cipher.process_with(provider, Operation::Decrypt, data)
            }
            ProcessOptions::Digest(options) => Ok(options.digest.process_with(provider, data)),
            ProcessOptions::Hmac(options) => options.hmac.process_with(provider, data),
            ProcessOptions::ChangeEncoding(_) => Ok(data.to_vec()),
        }
    }

    /// Apply the transform to text with the built-in provider.
    pub fn process_text(&self, text: &str) -> Result<String> {
        self.process_text_with(&SoftwareProvider, text)
    }

    pub fn process_text_with<P: CryptoProvider>(&self, provider: &P, text: &str) -> Result<String> {
        let (from, to) = self.text_encodings();
        let input = Zeroizing::new(encoding::decode(text, from)?);
        let output = self.process_with(provider, &*input)?;
        encoding::encode(&output, to)
    }
}
