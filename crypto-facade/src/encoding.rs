//! Conversions between byte buffers and text representations

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{CryptoError, Result};

/// Text representation of a byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Ascii,
    Utf8,
    Hex,
    Base64,
}

impl Encoding {
    pub const ALL: [Encoding; 4] = [
        Encoding::Ascii,
        Encoding::Utf8,
        Encoding::Hex,
        Encoding::Base64,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Encoding::Ascii => "ascii",
            Encoding::Utf8 => "utf8",
            Encoding::Hex => "hex",
            Encoding::Base64 => "base64",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" => Ok(Encoding::Ascii),
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "hex" => Ok(Encoding::Hex),
            "base64" => Ok(Encoding::Base64),
            _ => Err(CryptoError::InvalidParams(format!("unknown encoding `{s}`"))),
        }
    }
}

/// Decode `text` into bytes according to `encoding`.
pub fn decode(text: &str, encoding: Encoding) -> Result<Vec<u8>> {
    match encoding {
        Encoding::Ascii if text.is_ascii() => Ok(text.as_bytes().to_vec()),
        Encoding::Ascii => Err(CryptoError::Coding(encoding)),
        Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
        Encoding::Hex => decode_hex(text),
        Encoding::Base64 => STANDARD
            .decode(text)
            .map_err(|_| CryptoError::Coding(encoding)),
    }
}

/// Encode `bytes` as text according to `encoding`.
pub fn encode(bytes: &[u8], encoding: Encoding) -> Result<String> {
    match encoding {
        Encoding::Ascii if bytes.is_ascii() => Ok(bytes.iter().map(|&b| b as char).collect()),
        Encoding::Ascii => Err(CryptoError::Coding(encoding)),
        Encoding::Utf8 => {
            String::from_utf8(bytes.to_vec()).map_err(|_| CryptoError::Coding(encoding))
        }
        Encoding::Hex => Ok(hex::encode(bytes)),
        Encoding::Base64 => Ok(STANDARD.encode(bytes)),
    }
}

/// Hex decoding with an optional `0x` prefix.
///
/// Digits are case-insensitive. An odd trailing digit becomes a byte of its
/// own, so `"abc"` decodes to `[0xab, 0x0c]`.
pub fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    let even = digits.len() - digits.len() % 2;
    if !digits.is_ascii() {
        return Err(CryptoError::Coding(Encoding::Hex));
    }

    let mut bytes = hex::decode(&digits[..even]).map_err(|_| CryptoError::Coding(Encoding::Hex))?;
    if let Some(last) = digits[even..].chars().next() {
        let nibble = last
            .to_digit(16)
            .ok_or(CryptoError::Coding(Encoding::Hex))?;
        bytes.push(nibble as u8);
    }
    Ok(bytes)
}
