//! Authentication utilities library
//!
//! Provides the authentication building blocks of the expense service:
//! - Password hashing (Argon2id)
//! - Session token issuance and validation (HS256 JWT)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::CredentialStore;
//!
//! let store = CredentialStore::new();
//! let hash = store.hash("my_password").unwrap();
//! assert!(store.verify("my_password", &hash).unwrap());
//! assert!(!store.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::TokenService;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!");
//! let token = tokens.issue("user123").unwrap();
//! assert_eq!(tokens.validate(&token).unwrap(), "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, "user123").unwrap();
//!
//! // Protected request: validate token
//! let user_id = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(user_id, "user123");
//! ```

pub mod authenticator;
pub mod credentials;
pub mod token;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use credentials::CredentialError;
pub use credentials::CredentialStore;
pub use credentials::HashCost;
pub use token::SessionClaims;
pub use token::TokenError;
pub use token::TokenService;
