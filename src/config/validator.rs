//! Settings validation: values that parse but cannot be served.

use crate::config::Settings;
use crate::error::ConfigError;

pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.server.port == 0 {
        return Err(ConfigError::Invalid {
            var: "PORT",
            value: "0".into(),
            reason: "port must be non-zero".into(),
        });
    }
    if settings.database.max_connections == 0 {
        return Err(ConfigError::Invalid {
            var: "DATABASE_MAX_CONNECTIONS",
            value: "0".into(),
            reason: "pool needs at least one connection".into(),
        });
    }
    if settings.jwt.ttl.is_zero() {
        return Err(ConfigError::Invalid {
            var: "JWT_TTL_DAYS",
            value: "0".into(),
            reason: "tokens would expire on issue".into(),
        });
    }
    if let Some(url) = &settings.uploads.public_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: "PUBLIC_URL",
                value: url.clone(),
                reason: "expected an http(s) URL".into(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::config::Settings;
    use crate::error::ConfigError;

    #[test]
    fn zero_port_is_rejected() {
        let err = Settings::from_lookup(|k| match k {
            "JWT_SECRET" => Some("s".into()),
            "PORT" => Some("0".into()),
            _ => None,
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));
    }

    #[test]
    fn public_url_must_be_http() {
        let err = Settings::from_lookup(|k| match k {
            "JWT_SECRET" => Some("s".into()),
            "PUBLIC_URL" => Some("ftp://files".into()),
            _ => None,
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "PUBLIC_URL", .. }));
    }
}
