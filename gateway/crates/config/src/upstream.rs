use std::time::Duration;

use url::Url;

/// Which deployment of the Letterboxd API to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, strum::EnumString, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    #[default]
    Production,
    Development,
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpstreamConfig {
    pub environment: Environment,
    /// Per request timeout. Defaults to 30s
    #[serde(deserialize_with = "duration_str::deserialize_option_duration")]
    pub timeout: Option<Duration>,
    /// Overrides the production base URL.
    pub base_url: Option<Url>,
    /// The base URL requests are signed against, if not the production one.
    pub signature_base_url: Option<Url>,
    /// Only read in the development environment.
    pub development: DevelopmentConfig,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DevelopmentConfig {
    /// Defaults to the local proxy at `https://localhost:62917/api/v0`.
    pub base_url: Url,
    /// Accept self-signed certificates of a local proxy.
    pub accept_invalid_certs: bool,
}

impl DevelopmentConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://localhost:62917/api/v0";
}

impl Default for DevelopmentConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(Self::DEFAULT_BASE_URL).expect("must be correct"),
            accept_invalid_certs: false,
        }
    }
}
