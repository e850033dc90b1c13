//! HTTP client for the Meshguard control plane API
//!
//! The provider never talks to the control plane directly; every CRUD
//! dispatcher goes through [`Client::do_request`], which handles bearer
//! authentication, JSON encoding, and error mapping.

mod client;
mod error;

pub use client::{Client, ClientConfig};
pub use error::Error;

/// Result type alias using the client Error
pub type Result<T> = std::result::Result<T, Error>;
