//! Persisted two-factor state.

use crate::secret::Secret;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Per-account two-factor record, owned by the store.
///
/// Invariants: a secret is present exactly while two-factor is enabled, and
/// the hash set only shrinks (one entry per consumed backup code) until the
/// set is regenerated. A missing record means two-factor was never set up.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TwoFactorRecord {
    /// Whether two-factor authentication is required for the account.
    pub enabled: bool,
    /// Shared TOTP secret, present exactly while enabled. Serializes as
    /// base32 text.
    pub secret: Option<Secret>,
    /// Lowercase hex SHA-256 hashes of unused backup codes.
    pub backup_code_hashes: BTreeSet<String>,
}
