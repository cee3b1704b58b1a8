//! Runtime settings resolved from the environment.

use std::path::PathBuf;
use std::time::Duration;

/// Server settings. Built by [`crate::config::from_env`] or [`Settings::from_lookup`].
#[derive(Clone, Debug)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub server: ServerSettings,
    pub jwt: JwtSettings,
    pub uploads: UploadSettings,
    /// Present only when both client id and secret are configured.
    pub github: Option<GithubSettings>,
}

#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Clone, Debug)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub ttl: Duration,
}

impl std::fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct UploadSettings {
    pub dir: PathBuf,
    /// Base for returned file URLs, without trailing slash. Derived per request when unset.
    pub public_url: Option<String>,
}

#[derive(Clone)]
pub struct GithubSettings {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for GithubSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubSettings")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}
