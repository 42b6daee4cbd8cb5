//! Error types for cipher, digest, HMAC and encoding operations

use thiserror::Error;

use crate::encoding::Encoding;

/// Status reported by a cryptographic provider.
///
/// The set is closed; [`ProviderStatus::from_code`] folds any status code it
/// does not recognise into [`ProviderStatus::Unspecified`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderStatus {
    #[error("Illegal parameter value")]
    ParamError,

    #[error("Insufficient buffer provided for specified operation")]
    BufferTooSmall,

    #[error("Memory allocation failure")]
    MemoryFailure,

    #[error("Input size was not aligned properly")]
    AlignmentError,

    #[error("Input data did not decode or decrypt properly")]
    DecodeError,

    #[error("Function not implemented for the current algorithm")]
    Unimplemented,

    #[error("Overflow")]
    Overflow,

    #[error("Random number generator failure")]
    RngFailure,

    #[error("Unspecified provider error")]
    Unspecified,

    #[error("Call sequence error")]
    CallSequenceError,

    #[error("Key size error")]
    KeySizeError,

    #[error("Key is not valid")]
    InvalidKey,
}

impl ProviderStatus {
    pub const ALL: [ProviderStatus; 12] = [
        ProviderStatus::ParamError,
        ProviderStatus::BufferTooSmall,
        ProviderStatus::MemoryFailure,
        ProviderStatus::AlignmentError,
        ProviderStatus::DecodeError,
        ProviderStatus::Unimplemented,
        ProviderStatus::Overflow,
        ProviderStatus::RngFailure,
        ProviderStatus::Unspecified,
        ProviderStatus::CallSequenceError,
        ProviderStatus::KeySizeError,
        ProviderStatus::InvalidKey,
    ];

    /// Numeric status code, as reported over the provider boundary.
    pub fn code(self) -> i32 {
        match self {
            ProviderStatus::ParamError => -4300,
            ProviderStatus::BufferTooSmall => -4301,
            ProviderStatus::MemoryFailure => -4302,
            ProviderStatus::AlignmentError => -4303,
            ProviderStatus::DecodeError => -4304,
            ProviderStatus::Unimplemented => -4305,
            ProviderStatus::Overflow => -4306,
            ProviderStatus::RngFailure => -4307,
            ProviderStatus::Unspecified => -4308,
            ProviderStatus::CallSequenceError => -4309,
            ProviderStatus::KeySizeError => -4310,
            ProviderStatus::InvalidKey => -4311,
        }
    }

    /// Map a raw status code to its variant.
    pub fn from_code(code: i32) -> Self {
        Self::ALL
            .into_iter()
            .find(|status| status.code() == code)
            .unwrap_or(ProviderStatus::Unspecified)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Invalid IV length (must match block size)")]
    InvalidIv,

    #[error("Invalid key (missing or wrong size for algorithm)")]
    InvalidKey,

    #[error("Invalid mode or padding for algorithm")]
    InvalidModeOrPadding,

    #[error("Invalid parameter: {0}")]
    InvalidParams(String),

    #[error("Could not convert between bytes and {0}")]
    Coding(Encoding),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderStatus),
}

pub type Result<T> = std::result::Result<T, CryptoError>;
