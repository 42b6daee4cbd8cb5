//! Engine behaviour observed through a recording provider

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crypto_facade::provider::{SoftwareCipherContext, SoftwareHmacContext};
use crypto_facade::{
    Algorithm, CipherConfig, CipherContext, CryptoError, CryptoProvider, Digest, Hmac,
    HmacAlgorithm, Mode, Operation, Padding, ProcessOptions, ProviderStatus, SoftwareProvider,
};

#[derive(Default)]
struct Counters {
    created: AtomicUsize,
    released: AtomicUsize,
    hashed: AtomicUsize,
    hmacs: AtomicUsize,
}

impl Counters {
    fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Copy, Default)]
enum Fault {
    #[default]
    None,
    Update(ProviderStatus),
    OverreportUpdate,
    ShortFinish,
}

#[derive(Default)]
struct RecordingProvider {
    counters: Arc<Counters>,
    fault: Fault,
}

impl RecordingProvider {
    fn with_fault(fault: Fault) -> Self {
        Self {
            fault,
            ..Self::default()
        }
    }
}

struct RecordingContext {
    inner: SoftwareCipherContext,
    counters: Arc<Counters>,
    fault: Fault,
}

impl Drop for RecordingContext {
    fn drop(&mut self) {
        self.counters.released.fetch_add(1, Ordering::SeqCst);
    }
}

impl CipherContext for RecordingContext {
    fn output_length(&self, input_len: usize, is_final: bool) -> usize {
        self.inner.output_length(input_len, is_final)
    }

    fn update(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, ProviderStatus> {
        match self.fault {
            Fault::Update(status) => Err(status),
            Fault::OverreportUpdate => self.inner.update(input, output).map(|_| output.len() + 1),
            _ => self.inner.update(input, output),
        }
    }

    fn finish(&mut self, output: &mut [u8]) -> Result<usize, ProviderStatus> {
        let written = self.inner.finish(output)?;
        match self.fault {
            Fault::ShortFinish => Ok(written.saturating_sub(1)),
            _ => Ok(written),
        }
    }
}

impl CryptoProvider for RecordingProvider {
    type Cipher = RecordingContext;
    type Hmac = SoftwareHmacContext;

    fn create(
        &self,
        operation: Operation,
        mode: Mode,
        algorithm: Algorithm,
        padding: Padding,
        iv: Option<&[u8]>,
        key: &[u8],
    ) -> Result<RecordingContext, ProviderStatus> {
        self.counters.created.fetch_add(1, Ordering::SeqCst);
        let inner = SoftwareProvider.create(operation, mode, algorithm, padding, iv, key)?;
        Ok(RecordingContext {
            inner,
            counters: Arc::clone(&self.counters),
            fault: self.fault,
        })
    }

    fn hash(&self, digest: Digest, input: &[u8]) -> Vec<u8> {
        self.counters.hashed.fetch_add(1, Ordering::SeqCst);
        SoftwareProvider.hash(digest, input)
    }

    fn hmac_init(
        &self,
        algorithm: HmacAlgorithm,
        key: &[u8],
    ) -> Result<SoftwareHmacContext, ProviderStatus> {
        self.counters.hmacs.fetch_add(1, Ordering::SeqCst);
        SoftwareProvider.hmac_init(algorithm, key)
    }
}

fn aes_cbc() -> CipherConfig {
    CipherConfig::new(Algorithm::Aes, [0x42u8; 16]).with_iv([0x24u8; 16])
}

#[test]
fn test_validation_precedes_provider() {
    let provider = RecordingProvider::default();
    let rejected = [
        CipherConfig::new(Algorithm::Aes, [0u8; 15]).with_iv([0u8; 16]),
        CipherConfig::new(Algorithm::Aes, [0u8; 16]).with_iv([0u8; 15]),
        CipherConfig::new(Algorithm::Aes, [0u8; 16])
            .with_mode(Mode::Ecb)
            .with_padding(Padding::None),
        CipherConfig::new(Algorithm::Rc4, [0u8; 16]).with_mode(Mode::Cbc).with_iv([0u8; 8]),
    ];

    for config in rejected {
        for operation in [Operation::Encrypt, Operation::Decrypt] {
            assert!(config.process_with(&provider, operation, b"payload").is_err());
        }
    }
    assert_eq!(provider.counters.created(), 0);
    assert_eq!(provider.counters.released(), 0);
}

#[test]
fn test_context_released_after_success() {
    let provider = RecordingProvider::default();
    let ciphertext = aes_cbc().process_with(&provider, Operation::Encrypt, b"released").unwrap();
    let plaintext = aes_cbc().process_with(&provider, Operation::Decrypt, &ciphertext).unwrap();

    assert_eq!(plaintext, b"released");
    assert_eq!(provider.counters.created(), 2);
    assert_eq!(provider.counters.released(), 2);
}

#[test]
fn test_provider_status_surfaces_and_releases() {
    let provider = RecordingProvider::with_fault(Fault::Update(ProviderStatus::MemoryFailure));
    let result = aes_cbc().process_with(&provider, Operation::Encrypt, b"payload");

    assert_eq!(result, Err(CryptoError::Provider(ProviderStatus::MemoryFailure)));
    assert_eq!(provider.counters.created(), 1);
    assert_eq!(provider.counters.released(), 1);
}

#[test]
fn test_overreported_update_is_decode_error() {
    let provider = RecordingProvider::with_fault(Fault::OverreportUpdate);
    let result = aes_cbc().process_with(&provider, Operation::Encrypt, b"payload");

    assert_eq!(result, Err(CryptoError::Provider(ProviderStatus::DecodeError)));
    assert_eq!(provider.counters.released(), 1);
}

#[test]
fn test_encrypt_shortfall_is_decode_error() {
    let provider = RecordingProvider::with_fault(Fault::ShortFinish);
    let result = aes_cbc().process_with(&provider, Operation::Encrypt, b"payload");

    assert_eq!(result, Err(CryptoError::Provider(ProviderStatus::DecodeError)));
    assert_eq!(provider.counters.released(), 1);
}

#[test]
fn test_decrypt_may_shrink() {
    let ciphertext = aes_cbc().encrypt(b"shrinks").unwrap();
    assert_eq!(ciphertext.len(), 16);

    let provider = RecordingProvider::default();
    let plaintext = aes_cbc().process_with(&provider, Operation::Decrypt, &ciphertext).unwrap();
    assert_eq!(plaintext, b"shrinks");
}

#[test]
fn test_bad_padding_releases_context() {
    let provider = RecordingProvider::default();
    // the second block is all padding; flipping byte 15 of the first
    // ciphertext block turns its final 0x10 into 0xef
    let mut ciphertext = aes_cbc().encrypt(b"sixteen byte msg").unwrap();
    assert_eq!(ciphertext.len(), 32);
    ciphertext[15] ^= 0xff;

    let result = aes_cbc().process_with(&provider, Operation::Decrypt, &ciphertext);
    assert_eq!(result, Err(CryptoError::Provider(ProviderStatus::DecodeError)));
    assert_eq!(provider.counters.created(), 1);
    assert_eq!(provider.counters.released(), 1);
}

#[test]
fn test_digest_and_hmac_use_provider() {
    let provider = RecordingProvider::default();

    let digest = ProcessOptions::SHA256.process_with(&provider, b"abc").unwrap();
    assert_eq!(digest.len(), 32);
    assert_eq!(provider.counters.hashed.load(Ordering::SeqCst), 1);

    let tag = Hmac::new(HmacAlgorithm::Sha384, [0u8; 300]).process_with(&provider, b"abc").unwrap();
    assert_eq!(tag.len(), 48);
    assert_eq!(provider.counters.hmacs.load(Ordering::SeqCst), 1);
    assert_eq!(provider.counters.created(), 0);
}

#[test]
fn test_dispatcher_threads_provider_through() {
    let provider = RecordingProvider::default();
    let options = ProcessOptions::encrypt(aes_cbc());
    let text = options.process_text_with(&provider, "via dispatcher").unwrap();

    assert!(!text.is_empty());
    assert_eq!(provider.counters.created(), 1);
    assert_eq!(provider.counters.released(), 1);
}
