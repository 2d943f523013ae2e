//! Verification of HS256 access tokens issued by the identity provider.
//!
//! The token's `sub` claim carries the caller's user id as a UUID string.
//! [`generate_access_token`] mints compatible tokens for local development
//! and tests.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use promptdeck_core::types::UserId;
use serde::{Deserialize, Serialize};

/// JWT claims read from every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's UUID.
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

/// Configuration for JWT validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the identity provider.
    pub secret: String,
    /// Expected `aud` claim. Audience is not checked when `None`.
    pub audience: Option<String>,
    /// Lifetime of locally minted tokens, in minutes (default: 60).
    pub access_token_expiry_mins: i64,
}

/// Default lifetime of locally minted tokens in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                  | Required | Default |
    /// |--------------------------|----------|---------|
    /// | `JWT_SECRET`             | **yes**  | --      |
    /// | `JWT_AUDIENCE`           | no       | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS` | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let audience = std::env::var("JWT_AUDIENCE").ok().filter(|s| !s.is_empty());

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        Self {
            secret,
            audience,
            access_token_expiry_mins,
        }
    }
}

/// Mint an HS256 access token for `user_id`.
pub fn generate_access_token(
    user_id: &UserId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + config.access_token_expiry_mins * 60,
        iat: now,
        aud: config.audience.clone(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Checks the signature and expiry, and the audience when one is configured.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    match &config.audience {
        Some(aud) => validation.set_audience(&[aud]),
        None => validation.validate_aud = false,
    }

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(audience: Option<&str>) -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            audience: audience.map(str::to_string),
            access_token_expiry_mins: 5,
        }
    }

    fn user() -> UserId {
        UserId::parse("0b6f5d3c-1a2b-4c3d-9e8f-7a6b5c4d3e2f").unwrap()
    }

    #[test]
    fn generated_token_validates() {
        let cfg = config(None);
        let token = generate_access_token(&user(), &cfg).unwrap();
        let claims = validate_token(&token, &cfg).unwrap();
        assert_eq!(claims.sub, user().to_string());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_access_token(&user(), &config(None)).unwrap();
        let mut other = config(None);
        other.secret = "different".to_string();
        assert!(validate_token(&token, &other).is_err());
    }

    #[test]
    fn audience_is_enforced_when_configured() {
        let issued = generate_access_token(&user(), &config(Some("authenticated"))).unwrap();
        assert!(validate_token(&issued, &config(Some("authenticated"))).is_ok());
        assert!(validate_token(&issued, &config(Some("service_role"))).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut cfg = config(None);
        cfg.access_token_expiry_mins = -10;
        let token = generate_access_token(&user(), &cfg).unwrap();
        assert!(validate_token(&token, &cfg).is_err());
    }
}
