//! HTTP event intake for orgmail.
//!
//! Exposes an axum [`Router`] that accepts change events and hands them to
//! the configured [`Agents`]. Delivery guarantees and redelivery are the
//! sender's concern: a failed event answers `500` and may be posted again.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/events` | Body: a change event; answers the agent outcomes |
//! | `GET`  | `/health` | Liveness check |

pub mod error;
pub mod events;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use orgmail_agents::{AgentKind, Agents};
use orgmail_core::{directory::Directory, mail::Mailer};
use orgmail_graphql::DirectoryConfig;
use orgmail_smtp::SmtpConfig;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration, deserialised from `config.toml` and `ORGMAIL_*`
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  #[serde(default = "default_host")]
  pub host:          String,
  #[serde(default = "default_port")]
  pub port:          u16,
  /// Who receives every notification.
  #[serde(default)]
  pub receivers:     Vec<String>,
  #[serde(default = "default_agents")]
  pub active_agents: Vec<AgentKind>,
  pub directory:     DirectoryConfig,
  pub smtp:          SmtpConfig,
}

fn default_host() -> String { "0.0.0.0".to_string() }

fn default_port() -> u16 { 8000 }

fn default_agents() -> Vec<AgentKind> { AgentKind::ALL.to_vec() }

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the intake router around a shared agent table.
pub fn router<D, M>(agents: Arc<Agents<D, M>>) -> Router
where
  D: Directory + 'static,
  M: Mailer + 'static,
{
  Router::new()
    .route("/events", post(events::receive::<D, M>))
    .route("/health", get(health))
    .layer(TraceLayer::new_for_http())
    .with_state(agents)
}

async fn health() -> &'static str { "ok" }

// ─── Integration tests ────────────────────────────────────────────────────────
