use thiserror::Error;

/// Failures surfaced by the two-factor engine.
///
/// `InvalidCode` is an authentication failure (the caller decides how to
/// rate-limit or count it); the precondition variants map to caller-side
/// 4xx responses; `Persistence` wraps whatever the store implementation
/// reports and is never swallowed.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid secret format")]
    InvalidSecretFormat,
    #[error("invalid code")]
    InvalidCode,
    #[error("two-factor already enabled")]
    AlreadyEnabled,
    #[error("two-factor not enabled")]
    NotEnabled,
    #[error("persistence failure")]
    Persistence(#[from] anyhow::Error),
}
