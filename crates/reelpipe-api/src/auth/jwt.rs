use crate::auth::models::JwtClaims;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use reelpipe_core::AppError;
use uuid::Uuid;

/// HS256 token validation (and issuance, for tooling and tests).
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Validate a token and return its claims.
    pub fn validate_token(&self, token: &str) -> Result<JwtClaims, AppError> {
        let token_data =
            decode::<JwtClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                tracing::debug!("JWT validation failed: {}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::Unauthorized("Token has expired".to_string())
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::Unauthorized("Invalid token signature".to_string())
                    }
                    _ => AppError::Unauthorized(format!("Invalid token: {}", e)),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Sign a token for `user_id` valid for `ttl`.
    pub fn issue_token(&self, user_id: Uuid, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_then_validate() {
        let jwt = JwtService::new("test-secret");
        let user_id = Uuid::new_v4();
        let token = jwt.issue_token(user_id, Duration::hours(1)).unwrap();

        let claims = jwt.validate_token(&token).unwrap();
        assert_eq!(claims.sub, user_id);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let jwt = JwtService::new("test-secret");
        let token = jwt
            .issue_token(Uuid::new_v4(), Duration::hours(-1))
            .unwrap();

        let err = jwt.validate_token(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(ref msg) if msg.contains("expired")));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = JwtService::new("secret-a")
            .issue_token(Uuid::new_v4(), Duration::hours(1))
            .unwrap();

        let result = JwtService::new("secret-b").validate_token(&token);
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let result = JwtService::new("secret").validate_token("not-a-jwt");
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
