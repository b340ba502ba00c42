use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

use futures::future::{BoxFuture, FutureExt, Shared};
use serde_json::Value;

use crate::{CacheKey, UpstreamError};

pub(crate) type FetchFuture = BoxFuture<'static, Result<Value, UpstreamError>>;

/// GET responses of one inbound request, keyed by canonical URL.
///
/// Callers asking for a key that is already in flight await the same future instead of sending
/// a second request.
#[derive(Default)]
pub(crate) struct RequestMemo {
    entries: Mutex<HashMap<CacheKey, Shared<FetchFuture>>>,
}

impl RequestMemo {
    pub(crate) async fn get_or_fetch(
        &self,
        key: CacheKey,
        fetch: impl FnOnce() -> FetchFuture,
    ) -> Result<Value, UpstreamError> {
        let future = {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            entries.entry(key.clone()).or_insert_with(|| fetch().shared()).clone()
        };

        let result = future.clone().await;

        if result.is_err() {
            // failures are shared with whoever was waiting, but the next caller retries
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

            if entries.get(&key).is_some_and(|stored| stored.ptr_eq(&future)) {
                entries.remove(&key);
            }
        }

        result
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
