use std::sync::Arc;

use letterboxd_engine::Engine;

struct ServerStateInner {
    engine: Engine,
    path: String,
}

#[derive(Clone)]
pub(super) struct ServerState {
    inner: Arc<ServerStateInner>,
}

impl ServerState {
    pub(super) fn new(engine: Engine, path: String) -> Self {
        Self {
            inner: Arc::new(ServerStateInner { engine, path }),
        }
    }

    pub(crate) fn engine(&self) -> &Engine {
        &self.inner.engine
    }

    pub(crate) fn path(&self) -> &str {
        &self.inner.path
    }
}
