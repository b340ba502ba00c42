//! HTTP server exposing the Letterboxd graph.

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod error;
mod server;

pub use error::Error;
pub use server::{router, serve, ServerConfig};

/// The server result type
pub type Result<T> = std::result::Result<T, Error>;
