//! GraphQL backend for the orgmail directory.
//!
//! Wraps a [`reqwest`] client that posts queries to the directory's GraphQL
//! endpoint, optionally authenticated with an OAuth2 client-credentials
//! token, and resolves every response down to the currently valid version.

mod client;
mod decode;
mod directory;
mod queries;

pub mod error;

pub use client::{AuthConfig, DirectoryConfig, GraphqlClient};
pub use directory::GraphqlDirectory;
pub use error::{Error, Result};
