mod auth;
mod credentials;

pub use auth::TokenAuthority;
pub use credentials::CREDENTIALS_SECTION;
pub use credentials::ConfigError;
pub use credentials::CredentialStore;
