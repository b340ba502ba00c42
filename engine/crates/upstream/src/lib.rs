//! Signed access to the Letterboxd REST API.
//!
//! Requests are signed with the API key and secret, sent with [`reqwest`], and identified by a
//! [`CacheKey`] that ignores the signing parameters. GET responses are shared within one
//! inbound request, and optionally across requests.

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod auth;
mod cache;
mod cache_key;
mod client;
mod config;
mod error;
mod memo;
mod params;
mod request;
mod resources;
pub mod signing;

pub use auth::AuthContext;
pub use cache::CacheSettings;
pub use cache_key::CacheKey;
pub use client::UpstreamClient;
pub use config::{production_base_url, ClientConfig, Target, PRODUCTION_BASE_URL};
pub use error::{ConfigError, UpstreamError};
pub use params::QueryParams;
pub use request::{RequestBody, UpstreamRequest};
pub use signing::{Credentials, RequestSigner, SignedRequest, SigningSalt};
