//! Outgoing email and the `Mailer` trait.

use std::future::Future;

/// A composed plain-text notification, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
  pub to:      Vec<String>,
  pub subject: String,
  pub body:    String,
}

impl Email {
  pub fn new(
    to: Vec<String>,
    subject: impl Into<String>,
    body: impl Into<String>,
  ) -> Self {
    Self { to, subject: subject.into(), body: body.into() }
  }
}

/// Abstraction over the mail transport.
///
/// Delivery retries, if any, are the transport's concern.
pub trait Mailer: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn send(
    &self,
    email: Email,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
