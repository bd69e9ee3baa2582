//! [`SmtpMailer`], the lettre implementation of [`Mailer`].

use lettre::{
  AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
  message::{Mailbox, header::ContentType},
  transport::smtp::authentication::Credentials,
};
use orgmail_core::mail::{Email, Mailer};
use serde::Deserialize;

use crate::{Error, Result};

// ─── Configuration ───────────────────────────────────────────────────────────

/// How the connection to the SMTP server is secured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Security {
  /// Plain connection; only suitable for a local relay.
  #[default]
  None,
  /// Upgrade with `STARTTLS` after connecting.
  Starttls,
  /// Implicit TLS from the first byte.
  Tls,
}

/// SMTP settings, deserialised from the `smtp` config section.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
  pub host:     String,
  #[serde(default = "default_port")]
  pub port:     u16,
  /// The `From` address on every notification.
  pub sender:   String,
  #[serde(default)]
  pub security: Security,
  #[serde(default)]
  pub username: Option<String>,
  #[serde(default)]
  pub password: Option<String>,
  /// Log messages instead of sending them.
  #[serde(default)]
  pub dry_run:  bool,
}

fn default_port() -> u16 { 25 }

// ─── Mailer ──────────────────────────────────────────────────────────────────

/// Sends [`Email`]s over SMTP.
///
/// Cloning is cheap; the lettre transport pools its connections internally.
#[derive(Clone)]
pub struct SmtpMailer {
  sender:    Mailbox,
  /// `None` in dry-run mode.
  transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

impl SmtpMailer {
  pub fn new(config: &SmtpConfig) -> Result<Self> {
    if config.dry_run {
      return Self::dry_run(&config.sender);
    }

    let mut builder = match config.security {
      Security::None => {
        AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
      }
      Security::Starttls => {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
      }
      Security::Tls => {
        AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
      }
    }
    .port(config.port);

    if let (Some(username), Some(password)) =
      (&config.username, &config.password)
    {
      builder = builder
        .credentials(Credentials::new(username.clone(), password.clone()));
    }

    Ok(Self {
      sender:    config.sender.parse()?,
      transport: Some(builder.build()),
    })
  }

  /// A mailer that composes messages but only logs them.
  pub fn dry_run(sender: &str) -> Result<Self> {
    Ok(Self { sender: sender.parse()?, transport: None })
  }

  /// Compose the plain-text message for `email`.
  pub fn build_message(&self, email: &Email) -> Result<Message> {
    let mut builder = Message::builder()
      .from(self.sender.clone())
      .subject(email.subject.as_str())
      .header(ContentType::TEXT_PLAIN);
    for to in &email.to {
      builder = builder.to(to.parse()?);
    }
    Ok(builder.body(email.body.clone())?)
  }
}

impl Mailer for SmtpMailer {
  type Error = Error;

  async fn send(&self, email: Email) -> Result<()> {
    if email.to.is_empty() {
      tracing::warn!(
        subject = %email.subject,
        "no recipients configured; dropping email"
      );
      return Ok(());
    }

    let message = self.build_message(&email)?;
    match &self.transport {
      Some(transport) => {
        transport.send(message).await?;
        tracing::info!(
          subject = %email.subject,
          recipients = email.to.len(),
          "email sent"
        );
      }
      None => {
        tracing::info!(
          subject = %email.subject,
          to = ?email.to,
          body = %email.body,
          "dry run: email not sent"
        );
      }
    }
    Ok(())
  }
}
