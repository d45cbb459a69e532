//! Two-factor lifecycle orchestration.
//!
//! [`TwoFactorService`] drives enrollment, verification, and teardown against
//! an injected [`TwoFactorStore`]. State mutations are single full-record
//! saves; backup-code consumption is one conditional store call, so the store
//! is the only place atomicity matters. Secret material and codes never reach
//! the logs.

use crate::{
    backup::{self, BackupCodeSet},
    config::TwoFactorConfig,
    error::Error,
    models::TwoFactorRecord,
    otp,
    secret::Secret,
    store::TwoFactorStore,
    uri,
};
use tracing::{info, warn};
use uuid::Uuid;

/// Everything the user needs to enroll an authenticator app.
///
/// Nothing is persisted when this value is returned; enrollment completes in
/// [`TwoFactorService::verify_and_enable`] once the user proves possession.
pub struct TwoFactorSetup {
    /// Freshly generated shared secret; render [`Secret::encode`] for manual
    /// entry.
    pub secret: Secret,
    /// `otpauth://` provisioning URI for QR rendering.
    pub uri: String,
}

/// Lifecycle engine for TOTP two-factor authentication.
pub struct TwoFactorService<S> {
    store: S,
    config: TwoFactorConfig,
}

impl<S: TwoFactorStore> TwoFactorService<S> {
    #[must_use]
    pub fn new(store: S, config: TwoFactorConfig) -> Self {
        Self { store, config }
    }

    /// Begin enrollment: generate a fresh secret and provisioning URI.
    ///
    /// May be called repeatedly while disabled; each call issues a new secret
    /// and persists nothing.
    ///
    /// # Errors
    /// [`Error::AlreadyEnabled`] if two-factor is already on, or
    /// [`Error::Persistence`] from the store.
    pub async fn setup(&self, account_id: Uuid, label: &str) -> Result<TwoFactorSetup, Error> {
        if self.is_enabled(account_id).await? {
            return Err(Error::AlreadyEnabled);
        }

        let secret = Secret::generate();
        let uri = uri::provisioning_uri(self.config.issuer(), label, &secret);

        info!(account_id = %account_id, "Two-factor setup initiated");

        Ok(TwoFactorSetup { secret, uri })
    }

    /// Complete enrollment: verify the first code against the unpersisted
    /// secret from [`setup`](Self::setup), then persist the enabled record.
    ///
    /// Returns the plaintext backup codes; this is the only time they exist.
    ///
    /// # Errors
    /// [`Error::InvalidSecretFormat`] if `secret` does not decode,
    /// [`Error::InvalidCode`] if the code misses the verification window, or
    /// [`Error::Persistence`] from the store.
    pub async fn verify_and_enable(
        &self,
        account_id: Uuid,
        secret: &str,
        code: &str,
    ) -> Result<Vec<String>, Error> {
        let secret = Secret::decode(secret)?;

        if !otp::verify_now(secret.as_bytes(), code, self.config.window()) {
            warn!(account_id = %account_id, "Two-factor code verification failed");
            return Err(Error::InvalidCode);
        }

        let backup = BackupCodeSet::generate();
        let record = TwoFactorRecord {
            enabled: true,
            secret: Some(secret),
            backup_code_hashes: backup.hashes,
        };
        self.store.save(account_id, &record).await?;

        info!(account_id = %account_id, "Two-factor enabled");

        Ok(backup.codes)
    }

    /// Verify a login code: the TOTP window first, then the single-use
    /// backup-code set.
    ///
    /// Returns `true` when two-factor is disabled for the account: two-factor
    /// is not required, which is not the same as a factor having been
    /// checked. Callers gating privileged actions should consult
    /// [`is_enabled`](Self::is_enabled) as well.
    ///
    /// # Errors
    /// [`Error::Persistence`] from the store. A wrong code is `Ok(false)`,
    /// not an error.
    pub async fn verify_code(&self, account_id: Uuid, code: &str) -> Result<bool, Error> {
        let Some(record) = self.store.load(account_id).await? else {
            // two-factor never set up
            return Ok(true);
        };
        if !record.enabled {
            return Ok(true);
        }

        let Some(secret) = record.secret.as_ref() else {
            warn!(account_id = %account_id, "Two-factor enabled without a secret");
            return Ok(false);
        };

        if otp::verify_now(secret.as_bytes(), code, self.config.window()) {
            return Ok(true);
        }

        let hash = backup::hash_backup_code(code);
        if self.store.consume_backup_code_hash(account_id, &hash).await? {
            info!(account_id = %account_id, "Backup code consumed");
            return Ok(true);
        }

        warn!(account_id = %account_id, "Two-factor code verification failed");
        Ok(false)
    }

    /// Switch two-factor off after verifying a current code.
    ///
    /// Clears the secret and backup-code hashes in one store write. Calling
    /// while already disabled is not an error: verification trivially
    /// succeeds and the record stays cleared.
    ///
    /// # Errors
    /// [`Error::InvalidCode`] if verification fails, or
    /// [`Error::Persistence`] from the store.
    pub async fn disable(&self, account_id: Uuid, code: &str) -> Result<(), Error> {
        if !self.verify_code(account_id, code).await? {
            return Err(Error::InvalidCode);
        }

        self.store
            .save(account_id, &TwoFactorRecord::default())
            .await?;

        info!(account_id = %account_id, "Two-factor disabled");
        Ok(())
    }

    /// Replace the backup-code set with ten fresh codes.
    ///
    /// Old codes are invalid as soon as this returns. The enabled check runs
    /// before code verification because [`verify_code`](Self::verify_code) is
    /// trivially true while disabled.
    ///
    /// # Errors
    /// [`Error::NotEnabled`] if two-factor is off,
    /// [`Error::InvalidCode`] if verification fails, or
    /// [`Error::Persistence`] from the store.
    pub async fn regenerate_backup_codes(
        &self,
        account_id: Uuid,
        code: &str,
    ) -> Result<Vec<String>, Error> {
        let Some(mut record) = self.store.load(account_id).await? else {
            return Err(Error::NotEnabled);
        };
        if !record.enabled {
            return Err(Error::NotEnabled);
        }

        if !self.verify_code(account_id, code).await? {
            return Err(Error::InvalidCode);
        }

        let backup = BackupCodeSet::generate();
        record.backup_code_hashes = backup.hashes;
        self.store.save(account_id, &record).await?;

        info!(account_id = %account_id, "Backup codes regenerated");
        Ok(backup.codes)
    }

    /// Whether two-factor authentication is enabled for the account.
    ///
    /// # Errors
    /// [`Error::Persistence`] from the store.
    pub async fn is_enabled(&self, account_id: Uuid) -> Result<bool, Error> {
        Ok(self
            .store
            .load(account_id)
            .await?
            .is_some_and(|record| record.enabled))
    }
}
