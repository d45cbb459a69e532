//! # Konfirmo (TOTP Two-Factor Engine)
//!
//! `konfirmo` is the two-factor authentication engine: it creates per-account
//! shared secrets, computes time-windowed passcodes (RFC 4226/6238), verifies
//! user-supplied codes (live TOTP or single-use backup codes), and manages
//! the enable/disable lifecycle against an injected persistence port.
//!
//! ## Enrollment Flow
//!
//! [`TwoFactorService::setup`] issues an unpersisted secret plus an
//! `otpauth://` provisioning URI. Nothing is stored until the user proves
//! possession in [`TwoFactorService::verify_and_enable`], which also mints
//! ten single-use backup codes and persists the enabled record in one write.
//!
//! ## Verification
//!
//! [`TwoFactorService::verify_code`] checks the TOTP drift window first
//! (constant-time comparison), then falls back to the backup-code set, where
//! a hit atomically consumes the code. When two-factor is disabled the call
//! reports `true` (two-factor is not required), which callers must not read
//! as "a factor was checked".
//!
//! ## Persistence
//!
//! The engine never talks to a database; implement [`TwoFactorStore`] for
//! your storage layer. [`MemoryStore`] ships for tests and single-process
//! setups. Secrets serialize as base32 text and zeroize on drop; only
//! SHA-256 hashes of backup codes are ever persisted.

pub mod backup;
pub mod config;
pub mod error;
pub mod models;
pub mod otp;
pub mod secret;
pub mod service;
pub mod store;
pub mod uri;

pub use config::TwoFactorConfig;
pub use error::Error;
pub use models::TwoFactorRecord;
pub use secret::Secret;
pub use service::{TwoFactorService, TwoFactorSetup};
pub use store::{MemoryStore, TwoFactorStore};
