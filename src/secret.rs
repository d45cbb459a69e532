//! Shared-secret generation and base32 codec.
//!
//! Secrets are 160-bit values from the OS CSPRNG, exchanged as RFC 4648
//! base32 text (uppercase, unpadded) for authenticator apps. The in-memory
//! representation zeroizes on drop and redacts its `Debug` output.

use crate::error::Error;
use data_encoding::{BASE32, BASE32_NOPAD};
use rand::{RngCore, rngs::OsRng};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use zeroize::Zeroize;

/// Secret length in bytes (160 bits, the RFC 4226 recommended minimum).
pub const SECRET_LEN: usize = 20;

/// TOTP shared secret with zeroize-on-drop.
#[derive(Clone)]
pub struct Secret(Vec<u8>);

impl Secret {
    /// Generate a fresh secret from the OS CSPRNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; SECRET_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Raw key material for HMAC.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Base32 text form: uppercase `A-Z2-7`, no padding.
    #[must_use]
    pub fn encode(&self) -> String {
        BASE32_NOPAD.encode(&self.0)
    }

    /// Parse the base32 text form.
    ///
    /// Input is uppercased and re-padded to a multiple of eight characters
    /// before strict decoding, so `jbswy3dpehpk3pxp` and unpadded exports
    /// are both accepted. Generated secrets are always 20 bytes, but any
    /// non-empty base32 payload decodes so externally provisioned secrets
    /// verify.
    ///
    /// # Errors
    /// Returns [`Error::InvalidSecretFormat`] for empty input, characters
    /// outside the base32 alphabet, or impossible lengths.
    pub fn decode(input: &str) -> Result<Self, Error> {
        let mut normalized = input.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(Error::InvalidSecretFormat);
        }
        while normalized.len() % 8 != 0 {
            normalized.push('=');
        }
        let bytes = BASE32
            .decode(normalized.as_bytes())
            .map_err(|_| Error::InvalidSecretFormat)?;
        if bytes.is_empty() {
            return Err(Error::InvalidSecretFormat);
        }
        Ok(Self(bytes))
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([REDACTED])")
    }
}

impl Serialize for Secret {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Self::decode(&text).map_err(de::Error::custom)
    }
}
