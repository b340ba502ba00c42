use letterboxd_upstream::{AuthContext, UpstreamClient};

/// Per inbound request state, available to every resolver.
pub struct RequestContext {
    pub(crate) upstream: UpstreamClient,
    pub(crate) auth: Option<AuthContext>,
}

impl RequestContext {
    /// `upstream` should be fresh for this request, see [`UpstreamClient::for_request`].
    pub fn new(upstream: UpstreamClient, auth: Option<AuthContext>) -> Self {
        RequestContext { upstream, auth }
    }

    pub fn auth(&self) -> Option<&AuthContext> {
        self.auth.as_ref()
    }
}
