//! # Crypto Facade
//!
//! A configuration-driven front end over symmetric ciphers, message digests
//! and HMAC. Callers describe *what* to do with a [`ProcessOptions`] value
//! and the crate validates the configuration, drives a [`CryptoProvider`]
//! and converts between text encodings.
//!
//! ## Supported Primitives
//!
//! - **Ciphers**: AES, DES, 3DES, CAST5, RC2, Blowfish in ECB, CBC, CFB,
//!   CFB8, OFB and CTR, plus the RC4 stream cipher
//! - **Digests**: MD2, MD4, MD5, SHA-1, SHA-224, SHA-256, SHA-384, SHA-512
//! - **HMAC**: over MD5 and the SHA family
//! - **Encodings**: ASCII, UTF-8, hex, base64
//!
//! ## Usage
//!
//! ```rust
//! use crypto_facade::{Operation, ProcessOptions};
//!
//! let key = "1111111111111111";
//! let iv = "1111111111111111";
//!
//! // utf8 in, base64 out
//! let encrypted = ProcessOptions::aes(Operation::Encrypt, key, iv).process_text("I am fine")?;
//!
//! // base64 in, utf8 out
//! let decrypted = ProcessOptions::aes(Operation::Decrypt, key, iv).process_text(&encrypted)?;
//! assert_eq!(decrypted, "I am fine");
//!
//! let digest = ProcessOptions::MD5.process_text("I am fine")?;
//! assert_eq!(digest, "75dc9bbfa6b55441d6ea91dcb2e6e900");
//! # Ok::<(), crypto_facade::CryptoError>(())
//! ```

pub mod algorithm;
pub mod cipher;
pub mod digest;
pub mod encoding;
pub mod error;
pub mod hmac;
pub mod options;
pub mod provider;
pub mod utils;

pub use crate::algorithm::{
    Algorithm, KeySizes, Mode, Operation, Padding, DEFAULT_MODE, DEFAULT_PADDING,
};
pub use crate::cipher::CipherConfig;
pub use crate::digest::Digest;
pub use crate::encoding::Encoding;
pub use crate::error::{CryptoError, ProviderStatus, Result};
pub use crate::hmac::{Hmac, HmacAlgorithm};
pub use crate::options::{Method, Parameters, ProcessOptions, TextEncodings};
pub use crate::provider::{CipherContext, CryptoProvider, HmacContext, SoftwareProvider};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
