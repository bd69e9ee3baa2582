//! Error type for `orgmail-graphql`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] orgmail_core::Error),

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// The endpoint answered, but with GraphQL-level errors.
  #[error("graphql errors: {}", .0.join("; "))]
  Graphql(Vec<String>),

  #[error("graphql response carried neither data nor errors")]
  MissingData,

  #[error("token endpoint rejected client credentials: {0}")]
  Auth(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
