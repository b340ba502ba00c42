use std::time::Duration;

use url::Url;

use crate::CacheSettings;

pub const PRODUCTION_BASE_URL: &str = "https://api.letterboxd.com/api/v0";

/// Where requests are sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Production {
        base_url: Url,
    },
    /// A local reverse proxy in front of the API. Only this variant can relax certificate
    /// validation.
    Development {
        base_url: Url,
        accept_invalid_certs: bool,
    },
}

impl Target {
    pub fn production() -> Self {
        Target::Production {
            base_url: production_base_url(),
        }
    }

    pub fn base_url(&self) -> &Url {
        match self {
            Target::Production { base_url } | Target::Development { base_url, .. } => base_url,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub target: Target,
    /// The base URL covered by request signatures.
    pub signature_base_url: Url,
    pub timeout: Duration,
    /// Cross-request response cache, off when `None`.
    pub cache: Option<CacheSettings>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            target: Target::production(),
            signature_base_url: production_base_url(),
            timeout: Duration::from_secs(30),
            cache: None,
        }
    }
}

pub fn production_base_url() -> Url {
    Url::parse(PRODUCTION_BASE_URL).expect("must be correct")
}
