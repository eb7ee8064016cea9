//! Twitch client-credentials authentication for the IGDB API
//!
//! The provider caches one access token with its expiry and refreshes it on
//! demand. It is owned by the IGDB client and borrowed mutably per request.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::config::Config;
use crate::error::{PipelineError, Result};

/// Access token and the moment it stops being valid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl Token {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

pub struct TokenProvider {
    client_id: String,
    client_secret: String,
    token_url: String,
    http: reqwest::blocking::Client,
    token: Option<Token>,
}

impl TokenProvider {
    pub fn new(config: &Config, http: reqwest::blocking::Client) -> Self {
        Self {
            client_id: config.twitch_client_id.clone(),
            client_secret: config.twitch_client_secret.clone(),
            token_url: config.token_url.clone(),
            http,
            token: None,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Return the cached token, requesting a new one if absent or expired
    pub fn get_valid_token(&mut self) -> Result<Token> {
        let now = Utc::now();
        match &self.token {
            Some(token) if !token.is_expired_at(now) => Ok(token.clone()),
            _ => {
                tracing::info!("Token expired or missing, requesting a new one");
                let token = self.request_token()?;
                self.token = Some(token.clone());
                Ok(token)
            }
        }
    }

    /// Drop the cached token so the next call re-authenticates
    pub fn invalidate(&mut self) {
        self.token = None;
    }

    #[cfg(test)]
    pub fn has_cached_token(&self) -> bool {
        self.token.is_some()
    }

    fn request_token(&self) -> Result<Token> {
        let url = format!(
            "{}?client_id={}&client_secret={}&grant_type=client_credentials",
            self.token_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.client_secret)
        );

        let response = self.http.post(&url).send()?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(PipelineError::Auth(format!(
                "token endpoint returned {}: {}",
                status, body
            )));
        }

        let data: TokenResponse = response.json()?;
        tracing::debug!("Obtained token valid for {}s", data.expires_in);

        Ok(Token {
            access_token: data.access_token,
            expires_at: Utc::now() + Duration::seconds(data.expires_in),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_token(mut self, token: Token) -> Self {
        self.token = Some(token);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> TokenProvider {
        TokenProvider::new(&Config::default(), reqwest::blocking::Client::new())
    }

    fn token(expires_at: DateTime<Utc>) -> Token {
        Token { access_token: "abc".to_string(), expires_at }
    }

    #[test]
    fn test_token_expiry() {
        let now = Utc::now();
        assert!(token(now).is_expired_at(now));
        assert!(!token(now + Duration::seconds(60)).is_expired_at(now));
        assert!(token(now - Duration::seconds(1)).is_expired_at(now));
    }

    #[test]
    fn test_cached_token_is_reused() {
        let cached = token(Utc::now() + Duration::hours(1));
        let mut provider = provider().with_token(cached.clone());
        assert_eq!(provider.get_valid_token().unwrap(), cached);
    }

    #[test]
    fn test_invalidate_drops_token() {
        let mut provider = provider().with_token(token(Utc::now() + Duration::hours(1)));
        assert!(provider.has_cached_token());
        provider.invalidate();
        assert!(!provider.has_cached_token());
    }

    #[test]
    #[ignore] // Requires network access and TWITCH_ID / TWITCH_SECRET
    fn test_request_token() {
        let mut provider = TokenProvider::new(&Config::load(), reqwest::blocking::Client::new());
        let token = provider.get_valid_token().unwrap();
        assert!(!token.access_token.is_empty());
    }
}
