use async_graphql::ErrorExtensions;
use letterboxd_upstream::UpstreamError;

use crate::EntityKind;

/// Failure of a single field. Siblings keep resolving.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error("missing argument `{0}`")]
    MissingArgument(&'static str),
    #[error("cannot load the {0} details without an id")]
    MissingId(EntityKind),
    #[error("`{union}` member type `{found}` is unknown")]
    UnknownMember { union: String, found: String },
    #[error("`{union}` member has no `type`")]
    UntypedMember { union: String },
    #[error("expected {expected} for `{type_name}`, got {found}")]
    UnexpectedShape {
        expected: &'static str,
        type_name: String,
        found: &'static str,
    },
}

impl ErrorExtensions for ResolveError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, extensions| match self {
            ResolveError::Upstream(UpstreamError::Status { status, .. }) => {
                extensions.set("code", "UPSTREAM_ERROR");
                extensions.set("status", i32::from(*status));
            }
            ResolveError::Upstream(UpstreamError::Transport(_)) => {
                extensions.set("code", "UPSTREAM_ERROR");
            }
            ResolveError::MissingArgument(_) => {
                extensions.set("code", "BAD_USER_INPUT");
            }
            ResolveError::Upstream(UpstreamError::MalformedJson(_) | UpstreamError::MissingField(_))
            | ResolveError::MissingId(_)
            | ResolveError::UnknownMember { .. }
            | ResolveError::UntypedMember { .. }
            | ResolveError::UnexpectedShape { .. } => {
                extensions.set("code", "UPSTREAM_MALFORMED_RESPONSE");
            }
        })
    }
}

/// The SDL could not be turned into an executable schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("parsing {file}: {source}")]
    Parse {
        file: &'static str,
        source: async_graphql_parser::Error,
    },
    #[error("the schema has no `Query` type")]
    MissingQuery,
    #[error("`Query.{0}` has no resolver")]
    UnknownRootField(String),
    #[error("unknown type `{0}`")]
    UnknownType(String),
    #[error("{0} definitions are not supported, found `{1}`")]
    Unsupported(&'static str, String),
    #[error(transparent)]
    Build(#[from] async_graphql::dynamic::SchemaError),
}
