use std::sync::Arc;

use futures::FutureExt;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Method,
};
use serde_json::Value;
use url::Url;

use crate::{
    cache::ResponseCache,
    memo::RequestMemo,
    request::RequestBody,
    signing::{Credentials, RequestSigner},
    AuthContext, CacheKey, ClientConfig, ConfigError, Target, UpstreamError, UpstreamRequest,
};

/// Signed HTTP access to the Letterboxd API.
///
/// The HTTP client, signer and response cache are shared by every clone. GET responses are
/// memoized per instance: call [`UpstreamClient::for_request`] once per inbound request.
#[derive(Clone)]
pub struct UpstreamClient {
    shared: Arc<Shared>,
    memo: Arc<RequestMemo>,
}

struct Shared {
    http: reqwest::Client,
    signer: RequestSigner,
    base_url: Url,
    cache: Option<ResponseCache>,
}

impl UpstreamClient {
    pub fn new(config: ClientConfig, credentials: Credentials) -> Result<Self, ConfigError> {
        let ClientConfig {
            target,
            signature_base_url,
            timeout,
            cache,
        } = config;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let builder = reqwest::Client::builder()
            .default_headers(default_headers)
            .gzip(true)
            .timeout(timeout);

        let (builder, base_url) = match target {
            Target::Production { base_url } => (builder, base_url),
            Target::Development {
                base_url,
                accept_invalid_certs,
            } => {
                if accept_invalid_certs {
                    tracing::warn!("Accepting invalid certificates from the development upstream at {base_url}");
                }

                (builder.danger_accept_invalid_certs(accept_invalid_certs), base_url)
            }
        };

        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }

        Ok(UpstreamClient {
            shared: Arc::new(Shared {
                http: builder.build()?,
                signer: RequestSigner::new(credentials, signature_base_url)?,
                base_url,
                cache: cache.map(ResponseCache::new),
            }),
            memo: Arc::default(),
        })
    }

    /// A handle sharing everything but the memoized responses.
    #[must_use]
    pub fn for_request(&self) -> Self {
        UpstreamClient {
            shared: self.shared.clone(),
            memo: Arc::default(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.shared.base_url
    }

    /// Signs and sends a request, returning the decoded JSON body.
    ///
    /// GETs go through the per-request memo, then the response cache for anonymous calls.
    pub async fn send(&self, request: UpstreamRequest, auth: Option<&AuthContext>) -> Result<Value, UpstreamError> {
        let signed = self.shared.signer.sign(&request);
        let url = signed.url(&self.shared.base_url);
        let key = CacheKey::canonicalize(&url);
        let method = signed.method().clone();
        let body = signed.into_body();

        if method != Method::GET {
            tracing::debug!(%method, %key, "sending upstream request");
            return execute(self.shared.clone(), method, url, body, auth.cloned()).await;
        }

        let cache = self.shared.cache.as_ref().filter(|_| auth.is_none());

        if let Some(value) = cache.and_then(|cache| cache.get(&key)) {
            tracing::debug!(%key, "upstream response served from cache");
            return Ok(value);
        }

        let shared = self.shared.clone();
        let auth = auth.cloned();
        let fetch_key = key.clone();

        let result = self
            .memo
            .get_or_fetch(key.clone(), move || {
                tracing::debug!(method = "GET", key = %fetch_key, "sending upstream request");
                execute(shared, method, url, body, auth).boxed()
            })
            .await;

        if let (Some(cache), Ok(value)) = (cache, &result) {
            cache.insert(key, value.clone());
        }

        result
    }
}

async fn execute(
    shared: Arc<Shared>,
    method: Method,
    url: Url,
    body: Option<RequestBody>,
    auth: Option<AuthContext>,
) -> Result<Value, UpstreamError> {
    let mut builder = shared.http.request(method.clone(), url);

    if let Some(auth) = &auth {
        builder = builder.bearer_auth(auth.token());
    }

    if let Some(body) = body {
        builder = builder
            .header(CONTENT_TYPE, body.content_type())
            .body(body.as_str().to_owned());
    }

    let response = builder.send().await.map_err(UpstreamError::transport)?;
    let status = response.status();
    let bytes = response.bytes().await.map_err(UpstreamError::transport)?;

    if !status.is_success() {
        let error = UpstreamError::Status {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
        };

        tracing::warn!(%method, status = status.as_u16(), "upstream request failed");

        return Err(error);
    }

    serde_json::from_slice(&bytes).map_err(UpstreamError::malformed)
}
