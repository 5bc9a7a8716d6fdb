//! Passphrase-based authenticated encryption.
//!
//! Layout of an encrypted payload:
//!
//! ```text
//! b"Salt" | salt_len: u8 | salt | nonce (12 bytes) | ciphertext + tag
//! ```
//!
//! The key is derived with PBKDF2-HMAC-SHA256 from the passphrase and a fresh
//! random salt; the payload is sealed with AES-256-GCM.

use crate::pipeline::{PipelineStopped, Transform, TransformEntry, TransformParams};

/// Tag that opens every encrypted payload.
pub const SALT_TAG: &[u8] = b"Salt";

pub const SALT_LEN: usize = 16;
pub const NONCE_LEN: usize = 12;
pub const KEY_LEN: usize = 32;
pub const PBKDF2_ROUNDS: u32 = 100_000;

/// Stop message for every decryption failure.
pub const WRONG_PASSPHRASE: &str = "Wrong passphrase or corrupted file";

/// Stop message when the transform runs without a passphrase.
pub const NO_PASSPHRASE: &str = "No passphrase supplied";

pub const ENTRY: TransformEntry = TransformEntry {
    name: "Encrypt",
    is_ready: ready,
    create,
};

fn ready() -> bool {
    cfg!(feature = "encryption")
}

#[cfg(feature = "encryption")]
fn create(params: &TransformParams) -> Result<Box<dyn Transform>, PipelineStopped> {
    Ok(Box::new(EncryptTransform::new(params.passphrase.clone())))
}

#[cfg(not(feature = "encryption"))]
fn create(_params: &TransformParams) -> Result<Box<dyn Transform>, PipelineStopped> {
    Err(PipelineStopped::new("Encryption support is not compiled in"))
}

#[cfg(feature = "encryption")]
pub use imp::EncryptTransform;

#[cfg(feature = "encryption")]
mod imp {
    use aes_gcm::aead::{Aead, KeyInit};
    use aes_gcm::{Aes256Gcm, Nonce};
    use rand::RngCore;
    use sha2::Sha256;

    use super::{
        KEY_LEN, NO_PASSPHRASE, NONCE_LEN, PBKDF2_ROUNDS, SALT_LEN, SALT_TAG, WRONG_PASSPHRASE,
    };
    use crate::pipeline::{Transform, TransformError};

    /// Seals the payload with a key derived from a passphrase.
    ///
    /// Without a passphrase both directions stop the pipeline, except that
    /// untagged input is still passed through on read.
    #[derive(Clone)]
    pub struct EncryptTransform {
        passphrase: Option<String>,
    }

    impl std::fmt::Debug for EncryptTransform {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("EncryptTransform")
                .field("passphrase", &self.passphrase.as_ref().map(|_| "***"))
                .finish()
        }
    }

    impl EncryptTransform {
        pub fn new(passphrase: Option<String>) -> Self {
            Self { passphrase }
        }

        fn passphrase(&self) -> Result<&str, TransformError> {
            self.passphrase
                .as_deref()
                .ok_or_else(|| TransformError::stop(NO_PASSPHRASE))
        }

        fn cipher(passphrase: &str, salt: &[u8]) -> Result<Aes256Gcm, TransformError> {
            let mut key = [0u8; KEY_LEN];
            pbkdf2::pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, PBKDF2_ROUNDS, &mut key);
            Aes256Gcm::new_from_slice(&key).map_err(|_| TransformError::other("invalid key length"))
        }
    }

    impl Transform for EncryptTransform {
        fn display_name(&self) -> &'static str {
            "Encrypt"
        }

        fn write(&self, data: Vec<u8>) -> Result<Vec<u8>, TransformError> {
            let passphrase = self.passphrase()?;

            let mut rng = rand::thread_rng();
            let mut salt = [0u8; SALT_LEN];
            rng.fill_bytes(&mut salt);
            let mut nonce = [0u8; NONCE_LEN];
            rng.fill_bytes(&mut nonce);

            let cipher = Self::cipher(passphrase, &salt)?;
            let ciphertext = cipher
                .encrypt(Nonce::from_slice(&nonce), data.as_slice())
                .map_err(|_| TransformError::other("encryption failed"))?;

            let mut out =
                Vec::with_capacity(SALT_TAG.len() + 1 + SALT_LEN + NONCE_LEN + ciphertext.len());
            out.extend_from_slice(SALT_TAG);
            out.push(SALT_LEN as u8);
            out.extend_from_slice(&salt);
            out.extend_from_slice(&nonce);
            out.extend_from_slice(&ciphertext);

            log::debug!("Encrypt: sealed {} bytes", data.len());
            Ok(out)
        }

        fn read(&self, data: Vec<u8>) -> Result<Vec<u8>, TransformError> {
            let Some(rest) = data.strip_prefix(SALT_TAG) else {
                log::warn!("Encrypt: input is not encrypted, passing it through");
                return Ok(data);
            };
            let passphrase = self.passphrase()?;

            let (&salt_len, rest) = rest
                .split_first()
                .ok_or_else(|| TransformError::stop(WRONG_PASSPHRASE))?;
            let salt_len = usize::from(salt_len);
            if rest.len() < salt_len + NONCE_LEN {
                return Err(TransformError::stop(WRONG_PASSPHRASE));
            }
            let (salt, rest) = rest.split_at(salt_len);
            let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

            let cipher = Self::cipher(passphrase, salt)?;
            let plain = cipher
                .decrypt(Nonce::from_slice(nonce), ciphertext)
                .map_err(|_| TransformError::stop(WRONG_PASSPHRASE))?;

            log::debug!("Encrypt: opened {} bytes", plain.len());
            Ok(plain)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn transform(passphrase: &str) -> EncryptTransform {
            EncryptTransform::new(Some(passphrase.to_string()))
        }

        fn stop_message(result: Result<Vec<u8>, TransformError>) -> String {
            match result {
                Err(TransformError::Stop(message)) => message,
                other => panic!("expected stop, got {:?}", other),
            }
        }

        #[test]
        fn test_write_layout() {
            let sealed = transform("hunter2").write(b"Circle\n\tradius: 2".to_vec()).unwrap();

            assert!(sealed.starts_with(SALT_TAG));
            assert_eq!(sealed[SALT_TAG.len()] as usize, SALT_LEN);
            // tag + length byte + salt + nonce + 17 bytes + 16-byte GCM tag
            assert_eq!(sealed.len(), 4 + 1 + SALT_LEN + NONCE_LEN + 17 + 16);
        }

        #[test]
        fn test_read_inverts_write() {
            let data = b"Container\n\tcoordinates: 0 0\n\titems:".to_vec();
            let sealed = transform("hunter2").write(data.clone()).unwrap();
            assert_eq!(transform("hunter2").read(sealed).unwrap(), data);
        }

        #[test]
        fn test_fresh_salt_per_write() {
            let t = transform("hunter2");
            let a = t.write(b"same".to_vec()).unwrap();
            let b = t.write(b"same".to_vec()).unwrap();
            assert_ne!(a, b);
        }

        #[test]
        fn test_wrong_passphrase_stops() {
            let sealed = transform("hunter2").write(b"secret".to_vec()).unwrap();
            assert_eq!(stop_message(transform("letmein").read(sealed)), WRONG_PASSPHRASE);
        }

        #[test]
        fn test_missing_passphrase_stops() {
            let sealed = transform("hunter2").write(b"secret".to_vec()).unwrap();
            let none = EncryptTransform::new(None);
            assert_eq!(stop_message(none.read(sealed)), NO_PASSPHRASE);
            assert_eq!(stop_message(none.write(b"secret".to_vec())), NO_PASSPHRASE);
            assert_ne!(NO_PASSPHRASE, WRONG_PASSPHRASE);
        }

        #[test]
        fn test_corrupted_payload_stops() {
            let mut sealed = transform("hunter2").write(b"secret".to_vec()).unwrap();
            let last = sealed.len() - 1;
            sealed[last] ^= 0xff;
            assert_eq!(stop_message(transform("hunter2").read(sealed)), WRONG_PASSPHRASE);

            let truncated = b"Salt\x10abc".to_vec();
            assert_eq!(stop_message(transform("hunter2").read(truncated)), WRONG_PASSPHRASE);
        }

        #[test]
        fn test_untagged_input_passes_through() {
            let data = b"Circle\n\tradius: 2".to_vec();
            assert_eq!(EncryptTransform::new(None).read(data.clone()).unwrap(), data);
        }

        #[test]
        fn test_debug_hides_passphrase() {
            assert!(!format!("{:?}", transform("hunter2")).contains("hunter2"));
        }
    }
}
