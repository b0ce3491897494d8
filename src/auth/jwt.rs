use jsonwebtoken::{decode, DecodingKey, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Audience the identity provider stamps on signed-in user tokens.
pub const AUTHENTICATED_AUDIENCE: &str = "authenticated";

/// Claims of an identity-provider access token. This service only verifies
/// them; issuing and refreshing tokens happens at the provider.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub aud: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

pub fn verify_token(token: &str, config: &Config) -> AppResult<TokenData<Claims>> {
    let mut validation = Validation::default();
    validation.validate_exp = true;
    validation.set_audience(&[AUTHENTICATED_AUDIENCE]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.session_jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "Rejected session token");
        AppError::Unauthorized
    })
}

#[cfg(test)]
pub fn sign_for_tests(user_id: Uuid, ttl_secs: i64, config: &Config) -> String {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        email: Some("someone@example.com".into()),
        exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        iat: Some(now.timestamp()),
        aud: Some(AUTHENTICATED_AUDIENCE.into()),
        role: Some("authenticated".into()),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.session_jwt_secret.as_bytes()),
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_token_verifies() {
        let config = Config::for_tests("http://unused");
        let user = Uuid::new_v4();
        let token = sign_for_tests(user, 600, &config);

        let data = verify_token(&token, &config).unwrap();
        assert_eq!(data.claims.sub, user);
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = Config::for_tests("http://unused");
        let token = sign_for_tests(Uuid::new_v4(), -3600, &config);

        assert!(matches!(verify_token(&token, &config), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let config = Config::for_tests("http://unused");
        let mut other = config.clone();
        other.session_jwt_secret = "someone-else".into();
        let token = sign_for_tests(Uuid::new_v4(), 600, &other);

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let config = Config::for_tests("http://unused");
        assert!(verify_token("not.a.jwt", &config).is_err());
    }
}
