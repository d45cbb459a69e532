//! Single-use backup codes.
//!
//! Codes are minted in sets of ten alongside TOTP enrollment; each is eight
//! uppercase hex characters from four CSPRNG bytes. Only SHA-256 hashes are
//! persisted; consuming a code removes its hash so it never verifies twice.

use data_encoding::{HEXLOWER, HEXUPPER};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;

/// Codes per set.
pub const BACKUP_CODE_COUNT: usize = 10;

/// Random bytes per code (eight hex characters).
pub const BACKUP_CODE_BYTES: usize = 4;

/// A freshly minted backup-code set: plaintext for the user, hashes for the
/// store. The plaintext exists only in this value.
#[derive(Debug)]
pub struct BackupCodeSet {
    pub codes: Vec<String>,
    pub hashes: BTreeSet<String>,
}

impl BackupCodeSet {
    /// Mint a new set from the OS CSPRNG.
    ///
    /// Draws again on the (astronomically rare) duplicate so a set always
    /// holds ten distinct usable codes.
    #[must_use]
    pub fn generate() -> Self {
        let mut rng = OsRng;
        let mut codes = Vec::with_capacity(BACKUP_CODE_COUNT);
        let mut hashes = BTreeSet::new();
        while codes.len() < BACKUP_CODE_COUNT {
            let mut raw = [0u8; BACKUP_CODE_BYTES];
            rng.fill_bytes(&mut raw);
            let code = HEXUPPER.encode(&raw);
            if hashes.insert(hash_backup_code(&code)) {
                codes.push(code);
            }
        }
        Self { codes, hashes }
    }
}

/// Hash a backup code for storage or lookup.
///
/// Input is uppercased first so user entry is case-insensitive; the digest
/// is lowercase hex SHA-256.
#[must_use]
pub fn hash_backup_code(code: &str) -> String {
    let normalized = code.trim().to_ascii_uppercase();
    HEXLOWER.encode(&Sha256::digest(normalized.as_bytes()))
}
