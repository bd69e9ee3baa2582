//! SMTP mail transport for orgmail.
//!
//! Implements [`orgmail_core::mail::Mailer`] on top of [`lettre`]'s async
//! SMTP transport. A dry-run mode logs composed messages instead of sending
//! them.

pub mod error;
mod mailer;

pub use error::{Error, Result};
pub use mailer::{Security, SmtpConfig, SmtpMailer};
