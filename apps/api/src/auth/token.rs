use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::Role;

/// How long an issued token stays valid.
pub const TOKEN_TTL_DAYS: i64 = 30;

/// Payload carried by every bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    /// Expiry as seconds since the Unix epoch.
    pub exp: i64,
}

/// Issues and verifies HS256 tokens with the process-wide signing secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn issue(&self, user_id: Uuid, email: &str, role: Role) -> Result<String, AppError> {
        self.issue_at(user_id, email, role, Utc::now())
    }

    /// Issues a token as if it were minted at `issued_at`.
    pub fn issue_at(
        &self,
        user_id: Uuid,
        email: &str,
        role: Role,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = Claims {
            user_id,
            email: email.to_string(),
            role,
            exp: (issued_at + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to sign token: {e}")))
    }

    /// Checks signature and expiry. Every failure collapses into `Unauthorized`.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Rejected bearer token: {e}");
                AppError::Unauthorized
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_then_verify_round_trips_claims() {
        let tokens = TokenService::new("secret");
        let user_id = Uuid::new_v4();
        let token = tokens
            .issue(user_id, "ravi@example.com", Role::Teacher)
            .unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.email, "ravi@example.com");
        assert_eq!(claims.role, Role::Teacher);
    }

    #[test]
    fn test_expiry_is_thirty_days_after_issue() {
        let tokens = TokenService::new("secret");
        let issued_at = Utc::now();
        let token = tokens
            .issue_at(Uuid::new_v4(), "a@example.com", Role::Student, issued_at)
            .unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.exp, (issued_at + Duration::days(30)).timestamp());
    }

    #[test]
    fn test_token_is_valid_just_before_expiry() {
        let tokens = TokenService::new("secret");
        let issued_at = Utc::now() - Duration::days(29);
        let token = tokens
            .issue_at(Uuid::new_v4(), "a@example.com", Role::Student, issued_at)
            .unwrap();
        assert!(tokens.verify(&token).is_ok());
    }

    #[test]
    fn test_expired_token_is_unauthorized() {
        let tokens = TokenService::new("secret");
        let issued_at = Utc::now() - Duration::days(31);
        let token = tokens
            .issue_at(Uuid::new_v4(), "a@example.com", Role::Student, issued_at)
            .unwrap();
        assert!(matches!(tokens.verify(&token), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_unauthorized() {
        let token = TokenService::new("one")
            .issue(Uuid::new_v4(), "a@example.com", Role::Student)
            .unwrap();
        let result = TokenService::new("two").verify(&token);
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_garbage_token_is_unauthorized() {
        let tokens = TokenService::new("secret");
        assert!(matches!(
            tokens.verify("not.a.jwt"),
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(tokens.verify(""), Err(AppError::Unauthorized)));
    }
}
