use reqwest::Method;
use url::Url;

use crate::QueryParams;

/// A request to the API before signing. Paths are relative to the versioned base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub method: Method,
    pub path: Vec<String>,
    pub params: QueryParams,
    pub body: Option<RequestBody>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestBody {
    Json(String),
    Form(String),
}

impl RequestBody {
    pub fn content_type(&self) -> &'static str {
        match self {
            RequestBody::Json(_) => "application/json",
            RequestBody::Form(_) => "application/x-www-form-urlencoded",
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RequestBody::Json(body) | RequestBody::Form(body) => body,
        }
    }
}

impl UpstreamRequest {
    pub fn get<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::GET, path)
    }

    pub fn post<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::POST, path)
    }

    fn new<I, S>(method: Method, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        UpstreamRequest {
            method,
            path: path.into_iter().map(Into::into).collect(),
            params: QueryParams::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn body_text(&self) -> &str {
        self.body.as_ref().map(RequestBody::as_str).unwrap_or_default()
    }
}

/// Appends percent-encoded path segments and the query to `base`.
///
/// `base` must be able to hold a path, which the client checks once when it is built.
pub(crate) fn join(base: &Url, path: &[String], params: &QueryParams) -> Url {
    let mut url = base.clone();

    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().extend(path);
    }

    if params.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(params.iter());
    }

    url
}
