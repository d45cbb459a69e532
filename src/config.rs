//! Engine configuration.

use crate::otp;

/// Tunable knobs for the two-factor engine.
#[derive(Clone, Debug)]
pub struct TwoFactorConfig {
    issuer: String,
    window: u32,
}

impl TwoFactorConfig {
    /// Config with the given issuer and the default one-step window.
    #[must_use]
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            window: otp::DEFAULT_WINDOW,
        }
    }

    /// Set the verification window in steps.
    #[must_use]
    pub fn with_window(mut self, window: u32) -> Self {
        self.window = window;
        self
    }

    /// Issuer shown in authenticator apps and embedded in provisioning URIs.
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Steps of clock drift accepted on either side of "now".
    #[must_use]
    pub fn window(&self) -> u32 {
        self.window
    }
}
