//! Security event logging with email masking.
//!
//! Login failures are interesting to operators but must not spray
//! addresses through the logs, so emails are masked down to their first
//! character plus domain.

use std::fmt;

use tracing::warn;

use crate::trace_ctx;

/// Display wrapper that masks the local part of an email address.
/// Non-email strings pass through unchanged.
pub struct MaskedEmail<'a>(pub &'a str);

impl fmt::Display for MaskedEmail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.split_once('@') {
            Some((local, domain)) if !local.is_empty() => {
                let first = local.chars().next().unwrap_or('*');
                write!(f, "{first}***@{domain}")
            }
            _ => write!(f, "{}", self.0),
        }
    }
}

/// Log a failed login attempt.
pub fn login_failed(reason: &str, email: Option<&str>) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        email = %email.map(MaskedEmail).unwrap_or(MaskedEmail("")),
        reason,
        "Authentication failure"
    );
}
