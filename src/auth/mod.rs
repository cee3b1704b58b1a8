//! Token issuance and verification, and the GitHub identity provider.

pub mod github;
pub mod jwt;

pub use github::{ExternalProfile, GithubOAuth, IdentityProvider};
pub use jwt::{Claims, JwtKeys};
