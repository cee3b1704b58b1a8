//! GitHub OAuth: exchange an authorization code for the caller's profile.

use crate::config::GithubSettings;
use crate::error::AppError;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

pub const GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
pub const GITHUB_USER_URL: &str = "https://api.github.com/user";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Profile of the account behind an OAuth code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalProfile {
    pub id: i64,
    pub login: String,
    pub name: String,
    pub avatar_url: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn exchange_code(&self, code: &str) -> Result<ExternalProfile, AppError>;
}

pub struct GithubOAuth {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    token_url: String,
    user_url: String,
}

impl GithubOAuth {
    pub fn new(settings: &GithubSettings) -> Result<Self, AppError> {
        Self::with_urls(settings, GITHUB_TOKEN_URL, GITHUB_USER_URL)
    }

    /// Same client against other token and profile endpoints.
    pub(crate) fn with_urls(settings: &GithubSettings, token_url: &str, user_url: &str) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Upstream(format!("http client: {}", e)))?;
        Ok(GithubOAuth {
            http,
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
            token_url: token_url.into(),
            user_url: user_url.into(),
        })
    }

    async fn access_token(&self, code: &str) -> Result<String, AppError> {
        let resp: TokenResponse = self
            .http
            .post(&self.token_url)
            .query(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
            ])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| AppError::Upstream(format!("github token exchange: {}", e)))?
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("github token response: {}", e)))?;
        resp.into_token()
    }
}

#[async_trait]
impl IdentityProvider for GithubOAuth {
    async fn exchange_code(&self, code: &str) -> Result<ExternalProfile, AppError> {
        let token = self.access_token(code).await?;
        let user: GithubUser = self
            .http
            .get(&self.user_url)
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| AppError::Upstream(format!("github user lookup: {}", e)))?
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("github user response: {}", e)))?;
        let profile = user.into_profile()?;
        tracing::info!(github_id = profile.id, login = %profile.login, "github code exchanged");
        Ok(profile)
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

impl TokenResponse {
    /// GitHub reports a bad code with 200 and an `error` field.
    fn into_token(self) -> Result<String, AppError> {
        match (self.access_token, self.error) {
            (Some(token), None) => Ok(token),
            (_, Some(error)) => Err(AppError::Upstream(format!(
                "github rejected code: {}{}",
                error,
                self.error_description.map(|d| format!(" ({})", d)).unwrap_or_default()
            ))),
            (None, None) => Err(AppError::Upstream("github returned no access token".into())),
        }
    }
}

#[derive(Deserialize)]
struct GithubUser {
    id: i64,
    login: String,
    name: Option<String>,
    avatar_url: String,
}

impl GithubUser {
    fn into_profile(self) -> Result<ExternalProfile, AppError> {
        reqwest::Url::parse(&self.avatar_url)
            .map_err(|e| AppError::Upstream(format!("github avatar_url is not a URL: {}", e)))?;
        let name = self.name.filter(|n| !n.trim().is_empty()).unwrap_or_else(|| self.login.clone());
        Ok(ExternalProfile {
            id: self.id,
            login: self.login,
            name,
            avatar_url: self.avatar_url,
        })
    }
}
