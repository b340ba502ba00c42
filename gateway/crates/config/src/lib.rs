#![cfg_attr(test, allow(unused_crate_dependencies))]

mod cache;
mod upstream;

use std::net::SocketAddr;

pub use cache::*;
pub use upstream::*;

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Configuration of the Letterboxd gateway, read from `letterboxd.toml`.
pub struct Config {
    /// Graph location and features, such as introspection
    pub graph: GraphConfig,
    /// Server bind settings
    pub network: NetworkConfig,
    /// Where and how the Letterboxd API is reached
    pub upstream: UpstreamConfig,
    /// Response cache shared between requests
    pub cache: CacheConfig,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    pub path: Option<String>,
    pub introspection: bool,
    /// Serve GraphiQL on `GET`.
    pub playground: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            path: None,
            introspection: true,
            playground: true,
        }
    }
}

impl GraphConfig {
    pub const DEFAULT_PATH: &'static str = "/graphql";

    pub fn path(&self) -> &str {
        self.path.as_deref().unwrap_or(Self::DEFAULT_PATH)
    }
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    pub listen_address: Option<SocketAddr>,
}
