//! Async HTTP client for the directory's GraphQL endpoint.

use std::{
  sync::Arc,
  time::{Duration, Instant},
};

use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;
use tokio::sync::Mutex;

use crate::{Error, Result};

/// Tokens are refreshed this long before the issuer says they expire.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(30);

// ─── Configuration ───────────────────────────────────────────────────────────

/// Connection settings for the directory service.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
  /// Base URL; queries are posted to `{url}/graphql`.
  pub url:          String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
  /// Client credentials; requests are sent unauthenticated when absent.
  #[serde(default)]
  pub auth:         Option<AuthConfig>,
}

fn default_timeout_secs() -> u64 { 30 }

/// OAuth2 client-credentials grant settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
  pub token_url:     String,
  pub client_id:     String,
  pub client_secret: String,
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
  data:   Option<T>,
  #[serde(default)]
  errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
  message: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
  access_token: String,
  expires_in:   u64,
}

// ─── Token source ────────────────────────────────────────────────────────────

struct CachedToken {
  value:      String,
  expires_at: Instant,
}

/// Fetches bearer tokens and reuses them until shortly before expiry.
struct TokenSource {
  config: AuthConfig,
  cached: Mutex<Option<CachedToken>>,
}

impl TokenSource {
  async fn token(&self, client: &Client) -> Result<String> {
    let mut cached = self.cached.lock().await;
    if let Some(token) = cached.as_ref()
      && Instant::now() < token.expires_at
    {
      return Ok(token.value.clone());
    }

    tracing::debug!(
      token_url = %self.config.token_url,
      "fetching access token"
    );
    let resp = client
      .post(&self.config.token_url)
      .form(&[
        ("grant_type", "client_credentials"),
        ("client_id", self.config.client_id.as_str()),
        ("client_secret", self.config.client_secret.as_str()),
      ])
      .send()
      .await?;

    if !resp.status().is_success() {
      return Err(Error::Auth(resp.status().to_string()));
    }
    let body: TokenResponse = resp.json().await?;

    let lifetime = Duration::from_secs(body.expires_in)
      .saturating_sub(TOKEN_EXPIRY_MARGIN);
    *cached = Some(CachedToken {
      value:      body.access_token.clone(),
      expires_at: Instant::now() + lifetime,
    });
    Ok(body.access_token)
  }
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Posts GraphQL queries to the directory.
///
/// Cheap to clone: the inner [`reqwest::Client`] and token cache are
/// `Arc`-based.
#[derive(Clone)]
pub struct GraphqlClient {
  client:   Client,
  endpoint: String,
  tokens:   Option<Arc<TokenSource>>,
}

impl GraphqlClient {
  pub fn new(config: &DirectoryConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;
    let tokens = config.auth.clone().map(|config| {
      Arc::new(TokenSource { config, cached: Mutex::new(None) })
    });
    Ok(Self {
      client,
      endpoint: format!("{}/graphql", config.url.trim_end_matches('/')),
      tokens,
    })
  }

  /// Run `query` with `variables` and decode the `data` member as `T`.
  ///
  /// Non-2xx statuses and GraphQL-level errors are returned as errors.
  pub async fn execute<T: DeserializeOwned>(
    &self,
    query: &str,
    variables: serde_json::Value,
  ) -> Result<T> {
    let mut req = self
      .client
      .post(&self.endpoint)
      .json(&json!({ "query": query, "variables": variables }));
    if let Some(tokens) = &self.tokens {
      req = req.bearer_auth(tokens.token(&self.client).await?);
    }

    let resp = req.send().await?.error_for_status()?;
    let body: GraphqlResponse<T> = resp.json().await?;

    if !body.errors.is_empty() {
      return Err(Error::Graphql(
        body.errors.into_iter().map(|e| e.message).collect(),
      ));
    }
    body.data.ok_or(Error::MissingData)
  }
}
