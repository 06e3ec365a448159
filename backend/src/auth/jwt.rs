//! JWT token generation and validation
//!
//! Access tokens are HS256-signed, self-contained and never stored: validity
//! is purely a matter of signature and expiry. Keys are derived once and
//! shared behind `Arc`.

use chrono::{Duration, Utc};
use course_enrollment_shared::Role;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Id of the account the token was issued to
    pub uid: i64,
    /// Role at the time of issue
    pub role: Role,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Token id, for log correlation only
    pub jti: String,
}

/// Identity carried by a valid token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub account_id: i64,
    pub username: String,
    pub role: Role,
}

/// Token failures
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Failed to sign token: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                TokenError::InvalidSignature
            }
            _ => TokenError::Malformed(err.to_string()),
        }
    }
}

/// Pre-computed JWT keys for efficient token operations
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: Arc::new(EncodingKey::from_secret(bytes)),
            decoding: Arc::new(DecodingKey::from_secret(bytes)),
        }
    }
}

/// Token issuer and validator
///
/// Built once from configuration at startup and stored in `AppState`.
#[derive(Clone)]
pub struct TokenService {
    keys: JwtKeys,
    validation: Arc<Validation>,
    default_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &SecretString, default_ttl: Duration) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            keys: JwtKeys::new(secret),
            validation: Arc::new(validation),
            default_ttl,
        }
    }

    /// Issue a token with the configured lifetime
    #[inline]
    pub fn issue(
        &self,
        account_id: i64,
        username: &str,
        role: Role,
    ) -> Result<String, TokenError> {
        self.issue_with_ttl(account_id, username, role, self.default_ttl)
    }

    /// Issue a token that expires `ttl` from now
    pub fn issue_with_ttl(
        &self,
        account_id: i64,
        username: &str,
        role: Role,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            uid: account_id,
            role,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(ALGORITHM), &claims, &self.keys.encoding)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Validate signature, algorithm and expiry, returning the identity
    pub fn validate(&self, token: &str) -> Result<TokenIdentity, TokenError> {
        let data = decode::<Claims>(token, &self.keys.decoding, &self.validation)?;
        let claims = data.claims;

        // jsonwebtoken accepts exp == now; a token must expire strictly in the future
        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }
        if claims.sub.is_empty() {
            return Err(TokenError::Malformed("empty subject".to_string()));
        }

        Ok(TokenIdentity {
            account_id: claims.uid,
            username: claims.sub,
            role: claims.role,
        })
    }

    /// Default token lifetime in seconds
    #[inline]
    pub fn default_ttl_secs(&self) -> i64 {
        self.default_ttl.num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    fn secret(value: &str) -> SecretString {
        SecretString::new(value.to_string())
    }

    fn create_test_service() -> TokenService {
        TokenService::new(&secret("test-secret"), Duration::minutes(30))
    }

    #[test]
    fn test_issue_and_validate() {
        let service = create_test_service();

        let token = service.issue(1, "alice", Role::Faculty).unwrap();
        let identity = assert_ok!(service.validate(&token));

        assert_eq!(identity.account_id, 1);
        assert_eq!(identity.username, "alice");
        assert_eq!(identity.role, Role::Faculty);
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        let service = create_test_service();
        let token = service
            .issue_with_ttl(1, "alice", Role::Student, Duration::zero())
            .unwrap();

        assert!(matches!(service.validate(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_past_expiry_is_rejected() {
        let service = create_test_service();
        let token = service
            .issue_with_ttl(1, "alice", Role::Student, Duration::minutes(-5))
            .unwrap();

        assert!(matches!(service.validate(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_token_with_wrong_secret_is_rejected() {
        let issuer = TokenService::new(&secret("some-other-secret"), Duration::minutes(30));
        let token = issuer.issue(9, "mallory", Role::Admin).unwrap();

        let result = create_test_service().validate(&token);
        assert!(matches!(result, Err(TokenError::InvalidSignature)));
    }

    #[test]
    fn test_other_algorithm_is_rejected() {
        // Same secret, different HMAC algorithm
        let claims = json!({
            "sub": "mallory",
            "uid": 9,
            "role": "admin",
            "exp": Utc::now().timestamp() + 600,
            "iat": Utc::now().timestamp(),
            "jti": "x",
        });
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_err!(create_test_service().validate(&token));
    }

    #[test]
    fn test_missing_role_claim_is_rejected() {
        let claims = json!({
            "sub": "alice",
            "uid": 1,
            "exp": Utc::now().timestamp() + 600,
            "iat": Utc::now().timestamp(),
            "jti": "x",
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(
            create_test_service().validate(&token),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_missing_subject_claim_is_rejected() {
        let claims = json!({
            "uid": 1,
            "role": "student",
            "exp": Utc::now().timestamp() + 600,
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_err!(create_test_service().validate(&token));
    }

    #[test]
    fn test_missing_expiry_is_rejected() {
        let claims = json!({ "sub": "alice", "uid": 1, "role": "student" });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_err!(create_test_service().validate(&token));
    }

    #[test]
    fn test_missing_account_id_claim_is_rejected() {
        let claims = json!({
            "sub": "alice",
            "role": "student",
            "exp": Utc::now().timestamp() + 600,
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(
            create_test_service().validate(&token),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_invalid_token_rejected() {
        let service = create_test_service();
        assert!(matches!(
            service.validate("invalid.token.here"),
            Err(TokenError::Malformed(_))
        ));
        assert_err!(service.validate(""));
    }

    #[test]
    fn test_tokens_are_unique_per_issue() {
        let service = create_test_service();
        let t1 = service.issue(1, "alice", Role::Student).unwrap();
        let t2 = service.issue(1, "alice", Role::Student).unwrap();
        assert_ne!(t1, t2);
    }

    #[test]
    fn test_default_ttl_secs() {
        assert_eq!(create_test_service().default_ttl_secs(), 1800);
    }
}
