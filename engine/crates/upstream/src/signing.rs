//! HMAC signing of API requests.
//!
//! Every request carries `apikey`, `nonce`, `timestamp` and `signature` query parameters, appended
//! in that order. The signature is the hex HMAC-SHA256, keyed with the API secret, of
//! `METHOD \0 URL \0 BODY`, where URL is the full request URL with the first three parameters
//! already appended.

use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use url::Url;

use crate::{
    error::ConfigError,
    request::{join, RequestBody, UpstreamRequest},
    QueryParams,
};

pub const API_KEY_PARAM: &str = "apikey";
pub const NONCE_PARAM: &str = "nonce";
pub const TIMESTAMP_PARAM: &str = "timestamp";
pub const SIGNATURE_PARAM: &str = "signature";

/// Parameters that only exist because of signing.
pub const SIGNING_PARAMS: [&str; 4] = [API_KEY_PARAM, NONCE_PARAM, SIGNATURE_PARAM, TIMESTAMP_PARAM];

type HmacSha256 = Hmac<Sha256>;

/// The API key and secret issued by Letterboxd.
pub struct Credentials {
    api_key: SecretString,
    api_secret: SecretString,
}

impl Credentials {
    pub fn new(api_key: SecretString, api_secret: SecretString) -> Result<Self, ConfigError> {
        if api_key.expose_secret().trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        if api_secret.expose_secret().trim().is_empty() {
            return Err(ConfigError::MissingApiSecret);
        }

        Ok(Credentials { api_key, api_secret })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").finish_non_exhaustive()
    }
}

/// The per-call random parts of a signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningSalt {
    pub nonce: String,
    pub timestamp: u64,
}

impl SigningSalt {
    /// A new v4 UUID and the current time. Never reuse a salt, not even to retry a request.
    pub fn fresh() -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();

        SigningSalt {
            nonce: uuid::Uuid::new_v4().to_string(),
            timestamp,
        }
    }
}

/// A request with its signing parameters. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedRequest {
    method: Method,
    path: Vec<String>,
    params: QueryParams,
    body: Option<RequestBody>,
}

impl SignedRequest {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    pub fn signature(&self) -> Option<&str> {
        self.params.get(SIGNATURE_PARAM)
    }

    /// The URL to send this request to.
    pub fn url(&self, base_url: &Url) -> Url {
        join(base_url, &self.path, &self.params)
    }

    pub(crate) fn into_body(self) -> Option<RequestBody> {
        self.body
    }
}

pub struct RequestSigner {
    api_key: SecretString,
    mac: HmacSha256,
    signature_base_url: Url,
}

impl RequestSigner {
    /// `signature_base_url` is the base URL the API itself sees. It stays the production URL when
    /// requests go through a development proxy, since the API checks the signature against its
    /// own address.
    pub fn new(credentials: Credentials, signature_base_url: Url) -> Result<Self, ConfigError> {
        if signature_base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl(signature_base_url));
        }

        let Credentials { api_key, api_secret } = credentials;
        let mac = HmacSha256::new_from_slice(api_secret.expose_secret().as_bytes())
            .map_err(|_| ConfigError::MissingApiSecret)?;

        Ok(RequestSigner {
            api_key,
            mac,
            signature_base_url,
        })
    }

    pub fn sign(&self, request: &UpstreamRequest) -> SignedRequest {
        self.sign_with(request, SigningSalt::fresh())
    }

    /// Signs with the given salt. The caller's parameters are left untouched.
    pub fn sign_with(&self, request: &UpstreamRequest, salt: SigningSalt) -> SignedRequest {
        let mut params = request.params.clone();
        params.push(API_KEY_PARAM, self.api_key.expose_secret().as_str());
        params.push(NONCE_PARAM, salt.nonce);
        params.push(TIMESTAMP_PARAM, salt.timestamp.to_string());

        let url = join(&self.signature_base_url, &request.path, &params);
        let signature = self.signature(&request.method, url.as_str(), request.body_text());
        params.push(SIGNATURE_PARAM, signature);

        SignedRequest {
            method: request.method.clone(),
            path: request.path.clone(),
            params,
            body: request.body.clone(),
        }
    }

    fn signature(&self, method: &Method, url: &str, body: &str) -> String {
        let mut mac = self.mac.clone();

        mac.update(method.as_str().as_bytes());
        mac.update(b"\0");
        mac.update(url.as_bytes());
        mac.update(b"\0");
        mac.update(body.as_bytes());

        hex::encode(mac.finalize().into_bytes())
    }
}
