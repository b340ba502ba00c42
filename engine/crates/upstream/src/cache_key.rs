use std::fmt;

use url::Url;

use crate::signing::SIGNING_PARAMS;

/// A request URL without its signing parameters.
///
/// Two signatures of the same call differ in nonce, timestamp and signature, but share their
/// cache key, which is what lets identical calls be coalesced and cached.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Drops the signing parameters and sorts what remains by name. Parameters sharing a name
    /// keep their relative order.
    pub fn canonicalize(url: &Url) -> CacheKey {
        let mut params = url
            .query_pairs()
            .filter(|(name, _)| !SIGNING_PARAMS.contains(&&**name))
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect::<Vec<_>>();

        params.sort_by(|(left, _), (right, _)| left.cmp(right));

        let mut key = url.clone();
        key.set_fragment(None);
        key.set_query(None);

        if !params.is_empty() {
            key.query_pairs_mut().extend_pairs(params);
        }

        CacheKey(key.into())
    }

    pub fn parse(url: &str) -> Result<CacheKey, url::ParseError> {
        Url::parse(url).map(|url| CacheKey::canonicalize(&url))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Url> for CacheKey {
    fn from(url: &Url) -> Self {
        CacheKey::canonicalize(url)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
