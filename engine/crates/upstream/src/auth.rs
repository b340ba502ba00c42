use std::fmt;

/// The end-user token of an inbound request, forwarded to endpoints acting on behalf of a member.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthContext {
    token: String,
}

impl AuthContext {
    pub fn new(token: impl Into<String>) -> Self {
        AuthContext { token: token.into() }
    }

    /// Reads an `Authorization` header value. A `Bearer` prefix is optional; empty values yield
    /// no context.
    pub fn from_header(value: &str) -> Option<Self> {
        let value = value.trim();

        let token = match value.split_once(' ') {
            Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => token.trim(),
            _ if value.eq_ignore_ascii_case("bearer") => "",
            _ => value,
        };

        (!token.is_empty()).then(|| AuthContext::new(token))
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext").field("token", &"<redacted>").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_prefix_is_stripped() {
        let auth = AuthContext::from_header("Bearer abc.def").unwrap();
        assert_eq!("abc.def", auth.token());

        let auth = AuthContext::from_header("bearer  xyz ").unwrap();
        assert_eq!("xyz", auth.token());
    }

    #[test]
    fn raw_tokens_are_accepted() {
        assert_eq!("abc", AuthContext::from_header("abc").unwrap().token());
    }

    #[test]
    fn empty_headers_are_ignored() {
        assert_eq!(None, AuthContext::from_header("   "));
        assert_eq!(None, AuthContext::from_header("Bearer "));
    }

    #[test]
    fn debug_hides_the_token() {
        assert!(!format!("{:?}", AuthContext::new("secret")).contains("secret"));
    }
}
