use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Payload of a session token.
///
/// `exp` and `iat` are Unix timestamps in seconds. Only `user_id` and `exp`
/// are required when decoding; a missing `iat` reads as 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Identifier of the user the session belongs to
    pub user_id: String,

    /// Expiration time
    pub exp: i64,

    /// Issued at
    #[serde(default)]
    pub iat: i64,
}

impl SessionClaims {
    /// Build claims for `user_id`, valid for `ttl` from `issued_at`.
    pub fn new(user_id: impl ToString, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            user_id: user_id.to_string(),
            exp: (issued_at + ttl).timestamp(),
            iat: issued_at.timestamp(),
        }
    }

    /// Check if the claims are expired at `current_timestamp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
