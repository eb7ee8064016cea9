//! IGDB transport
//!
//! Queries are POSTed as plain text to `{base_url}/{endpoint}` with the
//! `Client-ID` and bearer token headers. A 401 invalidates the cached token
//! and the request is retried once with a fresh one.

use igdb_features_core::constants::TOTAL_COUNT_HEADER;
use igdb_features_core::Query;
use reqwest::StatusCode;

use crate::auth::TokenProvider;
use crate::config::Config;
use crate::error::Result;

/// Raw response of one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
    /// Value of the `x-count` header, if present
    pub total_count: Option<String>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one query against one resource endpoint
pub trait Transport {
    fn post_query(&mut self, endpoint: &str, query: &Query) -> Result<ApiResponse>;
}

pub struct IgdbClient {
    base_url: String,
    http: reqwest::blocking::Client,
    tokens: TokenProvider,
}

impl IgdbClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent("igdb-features/0.1")
            .build()?;

        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            tokens: TokenProvider::new(config, http.clone()),
            http,
        })
    }

    fn send(&mut self, url: &str, query: &Query) -> Result<reqwest::blocking::Response> {
        let token = self.tokens.get_valid_token()?;
        let response = self
            .http
            .post(url)
            .header("Client-ID", self.tokens.client_id())
            .header("Authorization", format!("Bearer {}", token.access_token))
            .header("Accept", "application/json")
            .body(query.to_string())
            .send()?;
        Ok(response)
    }
}

impl Transport for IgdbClient {
    fn post_query(&mut self, endpoint: &str, query: &Query) -> Result<ApiResponse> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let mut response = self.send(&url, query)?;
        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!("Token rejected by {}, re-authenticating", endpoint);
            self.tokens.invalidate();
            response = self.send(&url, query)?;
        }

        let status = response.status().as_u16();
        let total_count = response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response.text()?;

        Ok(ApiResponse { status, body, total_count })
    }
}
