use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::SessionClaims;
use super::errors::TokenError;

/// Issues and validates stateless session tokens.
///
/// Tokens are HS256 JWTs carrying [`SessionClaims`]. The signing secret is
/// fixed at construction; nothing about a token is stored server-side.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenService {
    pub const DEFAULT_TTL_HOURS: i64 = 24;

    /// Create a token service with the default 24 hour lifetime.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Load it from the environment or a vault, never from code
    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttl(secret, Duration::hours(Self::DEFAULT_TTL_HOURS))
    }

    /// Create a token service with a custom token lifetime.
    pub fn with_ttl(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl,
        }
    }

    /// Lifetime of issued tokens.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `user_id`, expiring one TTL from now.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue(&self, user_id: &str) -> Result<String, TokenError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token as if the current time were `issued_at`.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue_at(&self, user_id: &str, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = SessionClaims::new(user_id, issued_at, self.ttl);

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Validate a token and return the user identifier it carries.
    ///
    /// Signature is checked first, then expiry against the current time with
    /// no leeway.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, malformed token or missing claims
    /// * `TokenExpired` - Signature is valid but `exp` has passed
    pub fn validate(&self, token: &str) -> Result<String, TokenError> {
        self.decode(token).map(|claims| claims.user_id)
    }

    /// Validate a token and return its full claims.
    ///
    /// # Errors
    /// Same as [`TokenService::validate`]
    pub fn decode(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    _ => TokenError::InvalidToken(e.to_string()),
                }
            })?;

        // The library compares with `exp < now - leeway`; repeat the check so
        // the boundary matches `SessionClaims::is_expired`.
        if token_data.claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::TokenExpired);
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[test]
    fn test_issue_and_validate() {
        let service = TokenService::new(SECRET);

        let token = service.issue("user123").expect("Failed to issue token");
        assert!(!token.is_empty());

        let user_id = service.validate(&token).expect("Failed to validate token");
        assert_eq!(user_id, "user123");
    }

    #[test]
    fn test_issued_token_lifetime() {
        let service = TokenService::new(SECRET);
        let token = service.issue("user123").unwrap();

        let claims = service.decode(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_validate_expired_token() {
        let service = TokenService::new(SECRET);
        let issued_at = Utc::now() - Duration::hours(25);

        let token = service.issue_at("user123", issued_at).unwrap();

        assert_eq!(service.validate(&token), Err(TokenError::TokenExpired));
    }

    #[test]
    fn test_validate_token_just_before_expiry() {
        let service = TokenService::new(SECRET);
        let issued_at = Utc::now() - Duration::hours(23);

        let token = service.issue_at("user123", issued_at).unwrap();

        assert_eq!(service.validate(&token).unwrap(), "user123");
    }

    #[test]
    fn test_validate_garbage() {
        let service = TokenService::new(SECRET);

        let result = service.validate("invalid.token.here");
        assert!(matches!(result, Err(TokenError::InvalidToken(_))));
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let issuer = TokenService::new(b"secret1_at_least_32_bytes_long_key!");
        let verifier = TokenService::new(b"secret2_at_least_32_bytes_long_key!");

        let token = issuer.issue("user123").unwrap();

        assert!(matches!(
            verifier.validate(&token),
            Err(TokenError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_expired_token_with_wrong_secret_is_invalid() {
        let issuer = TokenService::new(b"secret1_at_least_32_bytes_long_key!");
        let verifier = TokenService::new(b"secret2_at_least_32_bytes_long_key!");

        let token = issuer
            .issue_at("user123", Utc::now() - Duration::hours(48))
            .unwrap();

        assert!(matches!(
            verifier.validate(&token),
            Err(TokenError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_validate_missing_user_id() {
        #[derive(Serialize)]
        struct Partial {
            exp: i64,
        }

        let service = TokenService::new(SECRET);
        let token = encode(
            &Header::new(Algorithm::HS256),
            &Partial {
                exp: (Utc::now() + Duration::hours(1)).timestamp(),
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(
            service.validate(&token),
            Err(TokenError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_validate_token_without_iat() {
        #[derive(Serialize)]
        struct Minimal {
            user_id: String,
            exp: i64,
        }

        let service = TokenService::new(SECRET);
        let token = encode(
            &Header::new(Algorithm::HS256),
            &Minimal {
                user_id: "u1".to_string(),
                exp: (Utc::now() + Duration::hours(1)).timestamp(),
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(service.validate(&token).unwrap(), "u1");

        let claims = service.decode(&token).unwrap();
        assert_eq!(claims.iat, 0);
    }

    #[test]
    fn test_validate_expired_token_without_iat() {
        #[derive(Serialize)]
        struct Minimal {
            user_id: String,
            exp: i64,
        }

        let service = TokenService::new(SECRET);
        let token = encode(
            &Header::new(Algorithm::HS256),
            &Minimal {
                user_id: "u1".to_string(),
                exp: (Utc::now() - Duration::hours(1)).timestamp(),
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(service.validate(&token), Err(TokenError::TokenExpired));
    }

    #[test]
    fn test_validate_missing_exp() {
        #[derive(Serialize)]
        struct Partial {
            user_id: String,
        }

        let service = TokenService::new(SECRET);
        let token = encode(
            &Header::new(Algorithm::HS256),
            &Partial {
                user_id: "user123".to_string(),
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(
            service.validate(&token),
            Err(TokenError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_custom_ttl() {
        let service = TokenService::with_ttl(SECRET, Duration::minutes(5));
        let token = service.issue("user123").unwrap();
        let claims = service.decode(&token).unwrap();

        assert_eq!(service.ttl(), Duration::minutes(5));
        assert_eq!(claims.exp - claims.iat, 5 * 60);
    }
}
