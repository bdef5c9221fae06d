use crate::credentials::CredentialError;
use crate::credentials::CredentialStore;
use crate::token::TokenError;
use crate::token::TokenService;

/// Authentication coordinator combining the credential store and token
/// service.
///
/// One instance is built at startup from configuration and shared read-only
/// between request handlers.
pub struct Authenticator {
    credential_store: CredentialStore,
    token_service: TokenService,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Credential error: {0}")]
    CredentialError(#[from] CredentialError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create an authenticator with default hashing cost and token lifetime.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::from_parts(CredentialStore::new(), TokenService::new(jwt_secret))
    }

    /// Create an authenticator from preconfigured components.
    pub fn from_parts(credential_store: CredentialStore, token_service: TokenService) -> Self {
        Self {
            credential_store,
            token_service,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, CredentialError> {
        self.credential_store.hash(password)
    }

    /// Verify a password against the stored hash and issue a session token
    /// for `user_id`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `CredentialError` - Stored hash is malformed
    /// * `TokenError` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.credential_store.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_service.issue(user_id)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a session token without password verification.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn generate_token(&self, user_id: &str) -> Result<String, TokenError> {
        self.token_service.issue(user_id)
    }

    /// Validate a session token and return the user identifier it carries.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature or claims are invalid
    /// * `TokenExpired` - Token lifetime has elapsed
    pub fn validate_token(&self, token: &str) -> Result<String, TokenError> {
        self.token_service.validate(token)
    }

    /// Access the underlying token service.
    pub fn token_service(&self) -> &TokenService {
        &self.token_service
    }
}
