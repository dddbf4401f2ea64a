//! Operator session derived from the bearer token.
//!
//! Platform tokens are JWTs. The console only reads the payload (identity,
//! role, expiry) to label the session and to refuse an expired token before
//! the first request; the signature is the backend's business.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use time::OffsetDateTime;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub business_id: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl Claims {
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        match self.exp {
            Some(exp) => exp <= now.unix_timestamp(),
            None => false,
        }
    }

    pub fn is_platform_admin(&self) -> bool {
        matches!(
            self.role.as_deref().map(str::to_ascii_uppercase).as_deref(),
            Some("PLATFORM_ADMIN") | Some("SUPER_ADMIN")
        )
    }

    pub fn expires_at(&self) -> Option<OffsetDateTime> {
        self.exp
            .and_then(|e| OffsetDateTime::from_unix_timestamp(e).ok())
    }

    /// Short label for headers: email, else subject.
    pub fn label(&self) -> String {
        self.email
            .clone()
            .or_else(|| self.sub.clone())
            .unwrap_or_else(|| "(unknown operator)".to_string())
    }
}

/// Decodes the payload of a JWT. Opaque tokens (not three dot-separated
/// segments, or a payload that is not JSON) yield `None`.
pub fn decode_claims(token: &str) -> Option<Claims> {
    let mut parts = token.split('.');
    let (_header, payload, _sig) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    // Some issuers pad; the URL-safe alphabet is shared either way.
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Refuses tokens whose payload says they are already expired.
pub fn check_token(token: &str, now: OffsetDateTime) -> anyhow::Result<Option<Claims>> {
    let claims = decode_claims(token);
    if let Some(c) = &claims
        && c.is_expired(now)
    {
        anyhow::bail!("token expired (run `nvi-console login --url ... --token ...`)");
    }
    Ok(claims)
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
