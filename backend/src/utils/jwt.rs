//! Session token codec.
//!
//! One implementation signs and verifies every token in the system; the
//! edge gatekeeper, the identity resolver, and the handlers all share this
//! module and the single `SESSION_SECRET`, so the verification paths cannot
//! drift apart.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: String,
    pub role: String,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: String, role: String, email: String, ttl_days: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::days(ttl_days as i64);

        Self {
            sub: user_id,
            role,
            email,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("admin")
    }
}

/// Signs a session token for the given subject. Pure function of its inputs
/// and the server secret.
pub fn issue_token(
    user_id: String,
    role: String,
    email: String,
    secret: &str,
    ttl_days: u64,
) -> anyhow::Result<String> {
    let claims = Claims::new(user_id, role, email, ttl_days);
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;

    Ok(token)
}

/// Verifies signature and expiry. Returns `None` for anything invalid:
/// bad signature, malformed input, or an expired token. Callers on the
/// request path treat `None` as "anonymous".
pub fn verify_token(token: &str, secret: &str) -> Option<Claims> {
    let validation = Validation::default();
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .ok()
}
