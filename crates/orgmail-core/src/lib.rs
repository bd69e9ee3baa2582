//! Core types and trait definitions for the orgmail notification agent.
//!
//! This crate is free of HTTP, GraphQL and SMTP dependencies.
//! The directory backend, the mail transport and the agents all depend on it.

pub mod directory;
pub mod entity;
pub mod error;
pub mod event;
pub mod mail;
pub mod validity;

pub use error::{Error, Result};
