//! Provisioning URI for authenticator apps.

use crate::{otp, secret::Secret};

/// Build the `otpauth://` provisioning URI an authenticator app enrolls from.
///
/// The path label is `issuer:label` percent-encoded as a single segment
/// (`Kybo:user@example.com` becomes `Kybo%3Auser%40example.com`); the secret
/// is already URL-safe base32 and stays literal. Parameter order is fixed so
/// emitted URIs are byte-stable across releases.
#[must_use]
pub fn provisioning_uri(issuer: &str, label: &str, secret: &Secret) -> String {
    let naming = format!("{issuer}:{label}");
    format!(
        "otpauth://totp/{}?secret={}&issuer={}&algorithm=SHA1&digits={}&period={}",
        urlencoding::encode(&naming),
        secret.encode(),
        urlencoding::encode(issuer),
        otp::DIGITS,
        otp::TIME_STEP,
    )
}
