//! The default field resolution, with the few explicit resolvers the schema needs.

use serde_json::Value;

use crate::{entity::JsonObject, resolver::resolve_entity_field, DetailSource, EntityKind, ResolveError, Source};

/// A field value, or `None` when the field could not be resolved. Unresolved fields are
/// returned as `null` without an error.
pub type Resolved = Option<Value>;

/// The resolver registered for a `(type, field)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldResolver {
    /// Any field of a summary/detail entity.
    Entity(EntityKind),
    /// A plain property published under another name.
    Renamed(&'static str),
    /// No explicit resolver: the property of the same name.
    Property,
}

impl FieldResolver {
    pub fn of(type_name: &str, field: &str) -> FieldResolver {
        if let Ok(kind) = type_name.parse::<EntityKind>() {
            return FieldResolver::Entity(kind);
        }

        match (type_name, field) {
            ("LogEntry", "tags") => FieldResolver::Renamed("tags2"),
            _ => FieldResolver::Property,
        }
    }
}

/// Resolves `field` against its parent value.
pub async fn dispatch(
    resolver: FieldResolver,
    parent: &Source,
    field: &str,
    arguments: &JsonObject,
    details: &dyn DetailSource,
) -> Result<Resolved, ResolveError> {
    match (resolver, parent) {
        (FieldResolver::Entity(_), Source::Entity(entity)) => {
            resolve_entity_field(details, entity, field, arguments).await
        }
        (FieldResolver::Renamed(property), Source::Object(object)) => Ok(read_property(object, property)),
        (_, Source::Entity(entity)) => Ok(read_property(entity.fields(), field)),
        (_, Source::Object(object)) => Ok(read_property(object, field)),
        (_, Source::Opaque(_)) => Ok(None),
    }
}

/// Present values, `null` included, are returned as they are.
pub fn read_property(object: &JsonObject, name: &str) -> Resolved {
    object.get(name).cloned()
}

#[cfg(test)]
mod tests {
    use letterboxd_upstream::UpstreamError;
    use serde_json::json;

    use super::*;
    use crate::Entity;

    struct Offline;

    #[async_trait::async_trait]
    impl DetailSource for Offline {
        async fn fetch_detail(&self, _: EntityKind, _: &str) -> Result<Value, UpstreamError> {
            Err(UpstreamError::Transport("offline".into()))
        }
    }

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(object) => object,
            _ => unreachable!(),
        }
    }

    async fn resolve(type_name: &str, parent: &Source, field: &str) -> Resolved {
        dispatch(
            FieldResolver::of(type_name, field),
            parent,
            field,
            &JsonObject::new(),
            &Offline,
        )
        .await
        .unwrap()
    }

    #[test]
    fn entity_types_have_explicit_resolvers() {
        assert_eq!(FieldResolver::Entity(EntityKind::Film), FieldResolver::of("Film", "name"));
        assert_eq!(FieldResolver::Renamed("tags2"), FieldResolver::of("LogEntry", "tags"));
        assert_eq!(FieldResolver::Property, FieldResolver::of("LogEntry", "name"));
    }

    #[tokio::test]
    async fn properties_are_read_as_they_are() {
        let parent = Source::Object(object(json!({"rank": 3, "note": null})));

        assert_eq!(Some(json!(3)), resolve("ListEntrySummary", &parent, "rank").await);
        assert_eq!(Some(json!(null)), resolve("ListEntrySummary", &parent, "note").await);
        assert_eq!(None, resolve("ListEntrySummary", &parent, "film").await);
    }

    #[tokio::test]
    async fn log_entry_tags_come_from_tags2() {
        let parent = Source::Object(object(json!({"tags": [{"code": "old"}], "tags2": ["heist"]})));

        assert_eq!(Some(json!(["heist"])), resolve("LogEntry", &parent, "tags").await);
    }

    #[tokio::test]
    async fn non_objects_leave_fields_unresolved() {
        let parent = Source::Opaque(json!("not an object"));

        assert_eq!(None, resolve("Review", &parent, "text").await);
    }

    #[tokio::test]
    async fn entity_summaries_go_through_their_rules() {
        let film = Entity::classify(EntityKind::Film, object(json!({"id": "1"})));

        let resolved = resolve("Film", &Source::Entity(film), "alternativeNames").await;

        assert_eq!(Some(json!([])), resolved);
    }
}
