pub mod argon2;
pub mod errors;

pub use self::argon2::CredentialStore;
pub use self::argon2::HashCost;
pub use errors::CredentialError;
