use std::net::SocketAddr;

use letterboxd_engine::SchemaError;
use letterboxd_upstream::ConfigError;

/// The Letterboxd gateway error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing credentials or an unusable upstream setting
    #[error("configuring the Letterboxd client: {0}")]
    Upstream(#[from] ConfigError),
    /// The bundled schema could not be built
    #[error("building the schema: {0}")]
    Schema(#[from] SchemaError),
    /// Cannot listen on the given address
    #[error("binding {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    /// Cannot start the HTTP server
    #[error("starting server: {0}")]
    Server(#[source] std::io::Error),
}
