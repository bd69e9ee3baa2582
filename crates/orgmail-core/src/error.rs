//! Error types for `orgmail-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A queried entity came back without a single version to choose from.
  #[error("cannot select a current version from an empty record set")]
  EmptyInput,

  #[error("invalid routing key: {0:?}")]
  InvalidRoutingKey(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
