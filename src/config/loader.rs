//! Load settings from process environment (after `.env`) or from any key lookup.

use crate::config::types::*;
use crate::error::ConfigError;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/memories";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3333;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_JWT_TTL_DAYS: u64 = 30;
pub const DEFAULT_UPLOADS_DIR: &str = "uploads";

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Read settings from the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
pub fn from_env() -> Result<Settings, ConfigError> {
    Settings::from_lookup(|key| std::env::var(key).ok())
}

impl Settings {
    /// Build settings from a key lookup. Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database = DatabaseSettings {
            url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", get("DATABASE_MAX_CONNECTIONS"), DEFAULT_MAX_CONNECTIONS)?,
        };
        let server = ServerSettings {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.into()),
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
        };
        let ttl_days: u64 = parse_or("JWT_TTL_DAYS", get("JWT_TTL_DAYS"), DEFAULT_JWT_TTL_DAYS)?;
        let ttl_secs = ttl_days.checked_mul(SECONDS_PER_DAY).ok_or_else(|| ConfigError::Invalid {
            var: "JWT_TTL_DAYS",
            value: ttl_days.to_string(),
            reason: "too large".into(),
        })?;
        let jwt = JwtSettings {
            secret: get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?,
            ttl: Duration::from_secs(ttl_secs),
        };
        let uploads = UploadSettings {
            dir: PathBuf::from(get("UPLOADS_DIR").unwrap_or_else(|| DEFAULT_UPLOADS_DIR.into())),
            public_url: get("PUBLIC_URL").map(|u| u.trim_end_matches('/').to_string()),
        };
        let github = match (get("GITHUB_CLIENT_ID"), get("GITHUB_CLIENT_SECRET")) {
            (Some(client_id), Some(client_secret)) => Some(GithubSettings {
                client_id,
                client_secret,
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing("GITHUB_CLIENT_SECRET")),
            (None, Some(_)) => return Err(ConfigError::Missing("GITHUB_CLIENT_ID")),
        };

        let settings = Settings {
            database,
            server,
            jwt,
            uploads,
            github,
        };
        crate::config::validate(&settings)?;
        Ok(settings)
    }
}

fn parse_or<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let settings = Settings::from_lookup(lookup(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(settings.server.port, 3333);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(settings.database.max_connections, 5);
        assert_eq!(settings.jwt.ttl, Duration::from_secs(30 * SECONDS_PER_DAY));
        assert_eq!(settings.uploads.dir, PathBuf::from("uploads"));
        assert!(settings.uploads.public_url.is_none());
        assert!(settings.github.is_none());
    }

    #[test]
    fn jwt_secret_is_required() {
        let err = Settings::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
        let err = Settings::from_lookup(lookup(&[("JWT_SECRET", "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let err = Settings::from_lookup(lookup(&[("JWT_SECRET", "s"), ("PORT", "http")])).unwrap_err();
        match err {
            ConfigError::Invalid { var, value, .. } => {
                assert_eq!(var, "PORT");
                assert_eq!(value, "http");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn github_requires_both_halves() {
        let err = Settings::from_lookup(lookup(&[("JWT_SECRET", "s"), ("GITHUB_CLIENT_ID", "id")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("GITHUB_CLIENT_SECRET")));

        let settings = Settings::from_lookup(lookup(&[
            ("JWT_SECRET", "s"),
            ("GITHUB_CLIENT_ID", "id"),
            ("GITHUB_CLIENT_SECRET", "secret"),
        ]))
        .unwrap();
        assert_eq!(settings.github.unwrap().client_id, "id");
    }

    #[test]
    fn public_url_trailing_slash_is_trimmed() {
        let settings = Settings::from_lookup(lookup(&[
            ("JWT_SECRET", "s"),
            ("PUBLIC_URL", "https://cdn.example.com/"),
        ]))
        .unwrap();
        assert_eq!(settings.uploads.public_url.as_deref(), Some("https://cdn.example.com"));
    }
}
