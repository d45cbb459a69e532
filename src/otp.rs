//! HOTP (RFC 4226) and TOTP (RFC 6238) primitives.
//!
//! The code path is the standard one: HMAC-SHA1 over the big-endian
//! counter, dynamic truncation, six decimal digits with leading zeros.
//! Window verification compares every candidate step in constant time and
//! never returns early, so timing does not reveal which step matched.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::time::{SystemTime, UNIX_EPOCH};
use subtle::ConstantTimeEq;

type HmacSha1 = Hmac<Sha1>;

/// Passcode length in decimal digits.
pub const DIGITS: u32 = 6;

/// Time step in seconds; the counter is `unix_seconds / TIME_STEP`.
pub const TIME_STEP: u64 = 30;

/// Steps of clock drift accepted on either side during verification.
pub const DEFAULT_WINDOW: u32 = 1;

/// Compute the HOTP code for a counter value.
#[must_use]
pub fn hotp(secret: &[u8], counter: u64) -> String {
    let mut mac = HmacSha1::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(&counter.to_be_bytes());
    let digest = mac.finalize().into_bytes();

    // Dynamic truncation per RFC 4226 §5.3
    let offset = (digest[19] & 0x0f) as usize;
    let binary = u32::from_be_bytes([
        digest[offset] & 0x7f,
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ]);

    format!("{:06}", binary % 1_000_000)
}

/// Compute the TOTP code for a Unix timestamp.
#[must_use]
pub fn totp_at(secret: &[u8], unix_seconds: u64) -> String {
    hotp(secret, unix_seconds / TIME_STEP)
}

/// Compute the TOTP code for the current wall clock.
#[must_use]
pub fn totp_now(secret: &[u8]) -> String {
    totp_at(secret, unix_now())
}

/// Verify a candidate code at a Unix timestamp, accepting `window` steps of
/// drift on either side.
///
/// Candidates that are not exactly six ASCII digits are rejected before any
/// computation; the shape of a code is public. Matching itself is
/// constant-time over the whole window. Steps that would land before the
/// Unix epoch are skipped.
#[must_use]
pub fn verify_at(secret: &[u8], candidate: &str, window: u32, unix_seconds: u64) -> bool {
    let candidate = candidate.trim();
    if candidate.len() != DIGITS as usize || !candidate.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let base = unix_seconds / TIME_STEP;
    let mut matched = false;
    for offset in -i64::from(window)..=i64::from(window) {
        let Some(counter) = base.checked_add_signed(offset) else {
            continue;
        };
        let expected = hotp(secret, counter);
        matched |= bool::from(expected.as_bytes().ct_eq(candidate.as_bytes()));
    }
    matched
}

/// Verify a candidate code against the current wall clock.
#[must_use]
pub fn verify_now(secret: &[u8], candidate: &str, window: u32) -> bool {
    verify_at(secret, candidate, window, unix_now())
}

/// Seconds since the Unix epoch.
#[must_use]
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}
