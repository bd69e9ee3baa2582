//! Error type for the notification agents.
//!
//! Business-rule rejections are not errors; they are reported as
//! [`crate::Outcome::Rejected`]. Only collaborator failures end up here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("directory error: {0}")]
  Directory(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("mail error: {0}")]
  Mail(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn directory<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Directory(Box::new(e))
  }

  pub(crate) fn mail<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Mail(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
