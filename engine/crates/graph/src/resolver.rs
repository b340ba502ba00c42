//! Resolution of summary/detail entity fields.

use std::borrow::Cow;

use letterboxd_upstream::{UpstreamClient, UpstreamError};
use serde_json::Value;

use crate::{
    dispatch::{read_property, Resolved},
    entity::JsonObject,
    Entity, EntityKind, FieldRule, ResolveError,
};

/// Where detail representations come from.
#[async_trait::async_trait]
pub trait DetailSource: Send + Sync {
    async fn fetch_detail(&self, kind: EntityKind, id: &str) -> Result<Value, UpstreamError>;
}

#[async_trait::async_trait]
impl DetailSource for UpstreamClient {
    async fn fetch_detail(&self, kind: EntityKind, id: &str) -> Result<Value, UpstreamError> {
        tracing::debug!(%kind, id, "loading entity details");

        match kind {
            EntityKind::Film => self.film(id).await,
            EntityKind::List => self.list(id).await,
            EntityKind::Member => self.member(id).await,
            EntityKind::Contributor => self.contributor(id).await,
        }
    }
}

/// Resolves `field` on `entity`, loading the detail representation when the field needs it and
/// the entity is a summary. At most one detail fetch happens per call.
pub async fn resolve_entity_field(
    source: &dyn DetailSource,
    entity: &Entity,
    field: &str,
    arguments: &JsonObject,
) -> Result<Resolved, ResolveError> {
    match FieldRule::of(entity.kind, field) {
        FieldRule::Summary => Ok(read_property(entity.fields(), field)),
        FieldRule::Detail => {
            let detail = detail_of(source, entity).await?;
            Ok(read_property(detail.fields(), field))
        }
        FieldRule::DetailRenamed(property) => {
            let detail = detail_of(source, entity).await?;
            Ok(read_property(detail.fields(), property))
        }
        FieldRule::DefaultEmptyList => {
            Ok(read_property(entity.fields(), field).or_else(|| Some(Value::Array(Vec::new()))))
        }
        FieldRule::Directors => {
            if entity.is_summary() {
                if let Some(directors) = entity.fields().get("directors") {
                    return Ok(Some(directors.clone()));
                }
            }

            let detail = detail_of(source, entity).await?;
            Ok(Some(directors_of(detail.fields())))
        }
        FieldRule::Contributions => {
            let detail = detail_of(source, entity).await?;
            let contributions = read_property(detail.fields(), "contributions");

            match arguments.get("type").and_then(Value::as_str) {
                Some(kind) => Ok(contributions.map(|contributions| only_of_type(contributions, kind))),
                None => Ok(contributions),
            }
        }
        FieldRule::SummaryOnly if entity.is_summary() => Ok(read_property(entity.fields(), field)),
        FieldRule::SummaryOnly => Ok(Some(Value::Null)),
    }
}

/// The entity itself when complete, its freshly loaded detail otherwise.
async fn detail_of<'a>(
    source: &dyn DetailSource,
    entity: &'a Entity,
) -> Result<Cow<'a, Entity>, ResolveError> {
    if !entity.is_summary() {
        return Ok(Cow::Borrowed(entity));
    }

    let id = entity.id().ok_or(ResolveError::MissingId(entity.kind))?;

    match source.fetch_detail(entity.kind, id).await? {
        Value::Object(fields) => Ok(Cow::Owned(Entity::detail(entity.kind, fields))),
        _ => Err(ResolveError::UnexpectedShape {
            expected: "an object",
            type_name: entity.kind.to_string(),
            found: "another JSON value",
        }),
    }
}

fn directors_of(film: &JsonObject) -> Value {
    film.get("contributions")
        .and_then(Value::as_array)
        .and_then(|contributions| {
            contributions
                .iter()
                .find(|contribution| contribution.get("type").and_then(Value::as_str) == Some("Director"))
        })
        .and_then(|contribution| contribution.get("contributors"))
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()))
}

fn only_of_type(contributions: Value, kind: &str) -> Value {
    match contributions {
        Value::Array(contributions) => Value::Array(
            contributions
                .into_iter()
                .filter(|contribution| contribution.get("type").and_then(Value::as_str) == Some(kind))
                .collect(),
        ),
        other => other,
    }
}
