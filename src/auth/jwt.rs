//! HS256 session tokens: `sub` is the user id; `name` and `avatarUrl` ride along for clients.

use crate::config::JwtSettings;
use crate::error::AppError;
use crate::models::User;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub name: String,
    #[serde(rename = "avatarUrl")]
    pub avatar_url: String,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
}

impl Claims {
    pub fn for_user(user: &User, ttl: Duration) -> Self {
        let now = chrono::Utc::now().timestamp().max(0) as usize;
        Claims {
            sub: user.id.to_string(),
            name: user.name.clone(),
            avatar_url: user.avatar_url.clone(),
            iat: now,
            exp: now + ttl.as_secs() as usize,
        }
    }

    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::Unauthorized("token subject is not a user id".into()))
    }
}

/// Signing and verification keys derived from one shared secret.
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        JwtKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn from_settings(settings: &JwtSettings) -> Self {
        Self::new(&settings.secret, settings.ttl)
    }

    /// Issue a token for `user` valid for the configured ttl.
    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        self.sign(&Claims::for_user(user, self.ttl))
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("JWT encoding error: {}", e)))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::Unauthorized("token expired".into()),
                ErrorKind::InvalidSignature => AppError::Unauthorized("invalid token signature".into()),
                _ => AppError::Unauthorized(format!("invalid token: {}", e)),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            github_id: 7,
            name: "Grace".into(),
            login: "grace".into(),
            avatar_url: "https://avatars.example/grace.png".into(),
        }
    }

    #[test]
    fn issued_token_round_trips() {
        let keys = JwtKeys::new("secret", 30 * DAY);
        let user = user();
        let token = keys.issue(&user).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.name, "Grace");
        assert_eq!(claims.avatar_url, user.avatar_url);
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let token = JwtKeys::new("one", DAY).issue(&user()).unwrap();
        let err = JwtKeys::new("two", DAY).verify(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = JwtKeys::new("secret", DAY);
        let mut claims = Claims::for_user(&user(), DAY);
        claims.iat -= 3 * 24 * 60 * 60;
        claims.exp = claims.iat + 60;
        let token = keys.sign(&claims).unwrap();
        match keys.verify(&token).unwrap_err() {
            AppError::Unauthorized(msg) => assert_eq!(msg, "token expired"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn garbage_is_rejected() {
        let keys = JwtKeys::new("secret", DAY);
        assert!(matches!(keys.verify("not.a.jwt"), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn avatar_claim_uses_camel_case() {
        let v = serde_json::to_value(Claims::for_user(&user(), DAY)).unwrap();
        assert!(v.get("avatarUrl").is_some());
    }
}
