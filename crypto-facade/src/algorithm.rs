//! Static metadata for the supported symmetric algorithms, modes and paddings

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::error::{CryptoError, ProviderStatus, Result};

/// Mode used when none is configured.
pub const DEFAULT_MODE: Mode = Mode::Cbc;

/// Padding used when none is configured.
pub const DEFAULT_PADDING: Padding = Padding::Pkcs7;

/// Symmetric cipher algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Aes,
    Des,
    TripleDes,
    Cast,
    Rc4,
    Rc2,
    Blowfish,
}

/// Mode of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Ecb,
    Cbc,
    Cfb,
    Ctr,
    Ofb,
    Rc4,
    Cfb8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Padding {
    None,
    Pkcs7,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Encrypt,
    Decrypt,
}

/// Legal key lengths in bytes for an algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySizes {
    /// An explicit set of lengths.
    Set(&'static [usize]),
    /// Every length in a contiguous range.
    Range(RangeInclusive<usize>),
}

impl KeySizes {
    pub fn contains(&self, size: usize) -> bool {
        match self {
            KeySizes::Set(sizes) => sizes.contains(&size),
            KeySizes::Range(range) => range.contains(&size),
        }
    }

    /// All legal lengths in ascending order.
    pub fn to_vec(&self) -> Vec<usize> {
        match self {
            KeySizes::Set(sizes) => sizes.to_vec(),
            KeySizes::Range(range) => range.clone().collect(),
        }
    }
}

pub const AES_KEY_SIZES: &[usize] = &[16, 24, 32];
pub const DES_KEY_SIZES: &[usize] = &[8];
pub const TRIPLE_DES_KEY_SIZES: &[usize] = &[24];
pub const CAST_KEY_SIZES: RangeInclusive<usize> = 5..=16;
pub const RC4_KEY_SIZES: RangeInclusive<usize> = 1..=512;
pub const RC2_KEY_SIZES: RangeInclusive<usize> = 1..=128;
pub const BLOWFISH_KEY_SIZES: RangeInclusive<usize> = 8..=56;

impl Algorithm {
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Aes,
        Algorithm::Des,
        Algorithm::TripleDes,
        Algorithm::Cast,
        Algorithm::Rc4,
        Algorithm::Rc2,
        Algorithm::Blowfish,
    ];

    /// Block size in bytes.
    pub fn block_size(self) -> usize {
        match self {
            Algorithm::Aes => 16,
            _ => 8,
        }
    }

    pub fn key_sizes(self) -> KeySizes {
        match self {
            Algorithm::Aes => KeySizes::Set(AES_KEY_SIZES),
            Algorithm::Des => KeySizes::Set(DES_KEY_SIZES),
            Algorithm::TripleDes => KeySizes::Set(TRIPLE_DES_KEY_SIZES),
            Algorithm::Cast => KeySizes::Range(CAST_KEY_SIZES),
            Algorithm::Rc4 => KeySizes::Range(RC4_KEY_SIZES),
            Algorithm::Rc2 => KeySizes::Range(RC2_KEY_SIZES),
            Algorithm::Blowfish => KeySizes::Range(BLOWFISH_KEY_SIZES),
        }
    }

    pub fn is_valid_key_size(self, size: usize) -> bool {
        self.key_sizes().contains(size)
    }

    /// IV length required by `mode`; zero when the mode takes no IV.
    pub fn iv_size(self, mode: Mode) -> usize {
        if mode.needs_iv() {
            self.block_size()
        } else {
            0
        }
    }

    /// Whether the algorithm/mode/padding triple may be used together.
    ///
    /// RC4 only runs in RC4 stream mode. Every other algorithm needs padding
    /// in ECB and CBC and may not use the RC4 stream mode.
    pub fn is_valid(self, mode: Mode, padding: Padding) -> bool {
        match self {
            Algorithm::Rc4 => mode == Mode::Rc4,
            _ => match mode {
                Mode::Ecb | Mode::Cbc => padding != Padding::None,
                Mode::Rc4 => false,
                Mode::Cfb | Mode::Ctr | Mode::Ofb | Mode::Cfb8 => true,
            },
        }
    }

    /// Key length used by [`Algorithm::generate_random_key`] when no size is given.
    ///
    /// This default is not checked against [`Algorithm::key_sizes`]; pass an
    /// explicit size when a particular strength is required.
    pub fn default_key_size(self) -> usize {
        match self {
            Algorithm::Aes | Algorithm::TripleDes => 24,
            _ => 8,
        }
    }

    /// Random key from the operating system RNG.
    pub fn generate_random_key(self, size: Option<usize>) -> Result<Vec<u8>> {
        self.generate_random_key_with(&mut OsRng, size)
    }

    pub fn generate_random_key_with<R: RngCore + CryptoRng>(
        self,
        rng: &mut R,
        size: Option<usize>,
    ) -> Result<Vec<u8>> {
        let size = match size {
            Some(size) if !self.is_valid_key_size(size) => {
                return Err(ProviderStatus::KeySizeError.into());
            }
            Some(size) => size,
            None => self.default_key_size(),
        };
        random_bytes(rng, size)
    }

    /// Random IV of one block from the operating system RNG.
    pub fn generate_random_iv(self) -> Result<Vec<u8>> {
        self.generate_random_iv_with(&mut OsRng)
    }

    pub fn generate_random_iv_with<R: RngCore + CryptoRng>(self, rng: &mut R) -> Result<Vec<u8>> {
        random_bytes(rng, self.block_size())
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Aes => "aes",
            Algorithm::Des => "des",
            Algorithm::TripleDes => "3des",
            Algorithm::Cast => "cast",
            Algorithm::Rc4 => "rc4",
            Algorithm::Rc2 => "rc2",
            Algorithm::Blowfish => "blowfish",
        }
    }
}

fn random_bytes<R: RngCore + CryptoRng>(rng: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut bytes = vec![0u8; len];
    rng.try_fill_bytes(&mut bytes)
        .map_err(|_| CryptoError::Provider(ProviderStatus::RngFailure))?;
    Ok(bytes)
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Ecb,
        Mode::Cbc,
        Mode::Cfb,
        Mode::Ctr,
        Mode::Ofb,
        Mode::Rc4,
        Mode::Cfb8,
    ];

    /// ECB and the RC4 stream take no IV; every other mode needs one block of IV.
    pub fn needs_iv(self) -> bool {
        !matches!(self, Mode::Ecb | Mode::Rc4)
    }

    /// Modes that only process whole blocks and therefore use padding.
    pub fn is_block_mode(self) -> bool {
        matches!(self, Mode::Ecb | Mode::Cbc)
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Ecb => "ecb",
            Mode::Cbc => "cbc",
            Mode::Cfb => "cfb",
            Mode::Ctr => "ctr",
            Mode::Ofb => "ofb",
            Mode::Rc4 => "rc4",
            Mode::Cfb8 => "cfb8",
        }
    }
}

impl Padding {
    pub const ALL: [Padding; 2] = [Padding::None, Padding::Pkcs7];

    pub fn name(self) -> &'static str {
        match self {
            Padding::None => "none",
            Padding::Pkcs7 => "pkcs7",
        }
    }
}

macro_rules! named {
    ($ty:ident, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = CryptoError;

            fn from_str(s: &str) -> Result<Self> {
                let wanted = s.to_ascii_lowercase();
                $ty::ALL
                    .into_iter()
                    .find(|item| item.name() == wanted)
                    .ok_or_else(|| CryptoError::InvalidParams(format!("unknown {} `{}`", $what, s)))
            }
        }
    };
}

named!(Algorithm, "algorithm");
named!(Mode, "mode");
named!(Padding, "padding");
