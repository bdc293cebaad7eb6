//! Verification of Google ID tokens against the tokeninfo endpoint.

use crate::error::AppError;
use serde::Deserialize;

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleTokenInfo {
    pub email: Option<String>,
    pub name: Option<String>,
    /// Google's stable subject id for the account.
    pub sub: Option<String>,
    pub aud: Option<String>,
}

/// Exchanges a client-side Google credential for the verified token info.
pub async fn verify_credential(
    client: &reqwest::Client,
    credential: &str,
) -> Result<GoogleTokenInfo, AppError> {
    let response = client
        .get(TOKENINFO_URL)
        .query(&[("id_token", credential)])
        .send()
        .await
        .map_err(|err| AppError::InternalServerError(err.into()))?;

    if !response.status().is_success() {
        return Err(AppError::BadRequest("Invalid Google token".to_string()));
    }

    response
        .json::<GoogleTokenInfo>()
        .await
        .map_err(|_| AppError::BadRequest("Invalid Google token response".to_string()))
}

/// Rejects credentials minted for a different OAuth client. Skipped when no
/// client id is configured or the token carries no audience.
pub fn check_audience(info: &GoogleTokenInfo, expected: Option<&str>) -> Result<(), AppError> {
    if let (Some(expected), Some(aud)) = (expected, info.aud.as_deref()) {
        if aud != expected {
            return Err(AppError::BadRequest("Token audience mismatch".to_string()));
        }
    }
    Ok(())
}
