//! The Letterboxd GraphQL schema.
//!
//! Queries run against a dynamic schema built from the SDL files in `schema/`. Root fields call
//! the API through [`letterboxd_upstream`]; entity fields missing from a summary trigger a fetch
//! of the entity's detail, coalesced per request.

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod context;
mod dispatch;
mod entity;
mod error;
mod resolver;
mod root;
mod rules;
mod schema;
mod shape;

use async_graphql::dynamic::Schema;
use letterboxd_upstream::{AuthContext, UpstreamClient};

pub use context::RequestContext;
pub use dispatch::{dispatch, read_property, FieldResolver, Resolved};
pub use entity::{Entity, EntityKind, JsonObject, Representation, Source};
pub use error::{ResolveError, SchemaError};
pub use resolver::{resolve_entity_field, DetailSource};
pub use root::RootField;
pub use rules::FieldRule;

#[derive(Clone, Copy, Debug)]
pub struct EngineOptions {
    pub introspection: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions { introspection: true }
    }
}

/// Executes GraphQL requests against the Letterboxd API.
#[derive(Clone)]
pub struct Engine {
    schema: Schema,
    upstream: UpstreamClient,
}

impl Engine {
    pub fn new(upstream: UpstreamClient, options: EngineOptions) -> Result<Self, SchemaError> {
        let schema = schema::build(options.introspection)?;

        Ok(Engine { schema, upstream })
    }

    /// Runs one inbound request. `auth` is the member token of the caller, if any.
    pub async fn execute(&self, request: impl Into<async_graphql::Request>, auth: Option<AuthContext>) -> async_graphql::Response {
        let context = RequestContext::new(self.upstream.for_request(), auth);

        self.schema.execute(request.into().data(context)).await
    }

    pub fn sdl(&self) -> String {
        self.schema.sdl()
    }
}
