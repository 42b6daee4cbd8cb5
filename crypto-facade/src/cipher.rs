//! Validated symmetric encryption and decryption

use std::fmt;

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::algorithm::{Algorithm, Mode, Operation, Padding, DEFAULT_MODE, DEFAULT_PADDING};
use crate::error::{CryptoError, ProviderStatus, Result};
use crate::provider::{CipherContext, CryptoProvider, SoftwareProvider};

/// Everything needed to run a symmetric cipher over a buffer.
///
/// The configuration is checked on every call to [`CipherConfig::process`]
/// before the provider sees any input: the IV must be one block long when the
/// mode needs one, the key length must be legal for the algorithm, and the
/// algorithm/mode/padding triple must pass [`Algorithm::is_valid`].
#[derive(Clone, PartialEq, Eq)]
pub struct CipherConfig {
    algorithm: Algorithm,
    key: Zeroizing<Vec<u8>>,
    iv: Vec<u8>,
    padding: Padding,
    mode: Mode,
}

impl CipherConfig {
    /// New configuration with an empty IV, CBC mode and PKCS#7 padding.
    pub fn new(algorithm: Algorithm, key: impl AsRef<[u8]>) -> Self {
        Self {
            algorithm,
            key: Zeroizing::new(key.as_ref().to_vec()),
            iv: Vec::new(),
            padding: DEFAULT_PADDING,
            mode: DEFAULT_MODE,
        }
    }

    pub fn with_iv(mut self, iv: impl AsRef<[u8]>) -> Self {
        self.iv = iv.as_ref().to_vec();
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<()> {
        if self.mode.needs_iv() && self.iv.len() != self.algorithm.block_size() {
            return Err(CryptoError::InvalidIv);
        }
        if !self.algorithm.is_valid_key_size(self.key.len()) {
            return Err(CryptoError::InvalidKey);
        }
        if !self.algorithm.is_valid(self.mode, self.padding) {
            return Err(CryptoError::InvalidModeOrPadding);
        }
        Ok(())
    }

    pub fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.process(Operation::Encrypt, data)
    }

    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.process(Operation::Decrypt, data)
    }

    pub fn process(&self, operation: Operation, data: &[u8]) -> Result<Vec<u8>> {
        self.process_with(&SoftwareProvider, operation, data)
    }

    /// Run `operation` over `data` through `provider`.
    ///
    /// The output buffer is sized once from the provider's reported maximum
    /// and only the written prefix is returned. An encryption that writes
    /// less than that maximum is reported as a decode error.
    pub fn process_with<P: CryptoProvider>(
        &self,
        provider: &P,
        operation: Operation,
        data: &[u8],
    ) -> Result<Vec<u8>> {
        if let Err(err) = self.validate() {
            warn!(
                algorithm = %self.algorithm,
                mode = %self.mode,
                padding = %self.padding,
                %err,
                "rejected cipher configuration"
            );
            return Err(err);
        }
        debug!(
            algorithm = %self.algorithm,
            mode = %self.mode,
            ?operation,
            len = data.len(),
            "running cipher"
        );

        let iv = self.mode.needs_iv().then_some(self.iv.as_slice());
        let mut context =
            provider.create(operation, self.mode, self.algorithm, self.padding, iv, &self.key)?;

        let capacity = context.output_length(data.len(), true);
        let mut output = vec![0u8; capacity];

        let updated = context.update(data, &mut output)?;
        if updated > capacity {
            return Err(ProviderStatus::DecodeError.into());
        }
        let finished = context.finish(&mut output[updated..])?;
        let total = updated + finished;
        if total > capacity || (operation == Operation::Encrypt && total != capacity) {
            return Err(ProviderStatus::DecodeError.into());
        }

        output.truncate(total);
        Ok(output)
    }
}

impl fmt::Debug for CipherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherConfig")
            .field("algorithm", &self.algorithm)
            .field("key", &"<redacted>")
            .field("iv", &hex::encode(&self.iv))
            .field("padding", &self.padding)
            .field("mode", &self.mode)
            .finish()
    }
}
