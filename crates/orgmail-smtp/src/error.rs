//! Error types for the orgmail SMTP transport.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid mail address: {0}")]
  Address(#[from] lettre::address::AddressError),

  #[error("cannot build message: {0}")]
  Message(#[from] lettre::error::Error),

  #[error("smtp error: {0}")]
  Transport(#[from] lettre::transport::smtp::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
