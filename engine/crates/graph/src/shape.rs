//! Turning upstream JSON into values the executor understands.
//!
//! Objects become a [`Source`] attached to the [`FieldValue`], so that their own fields can be
//! dispatched later. Entities are classified as summary or detail right here, once.

use std::{collections::HashMap, sync::Arc};

use async_graphql::{dynamic::FieldValue, Name};
use letterboxd_upstream::UpstreamError;
use serde_json::Value;

use crate::{dispatch::Resolved, Entity, EntityKind, ResolveError, Source};

/// What an output type expects. Nullability is left to the executor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputShape {
    List(Box<OutputShape>),
    Named { name: String, kind: NamedKind },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NamedKind {
    Leaf,
    Enum,
    Object(ObjectKind),
    /// Member type names, told apart by the payload's `type`.
    Union(Arc<HashMap<String, ObjectKind>>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    Entity(EntityKind),
    Plain,
}

impl OutputShape {
    fn type_name(&self) -> &str {
        match self {
            OutputShape::List(inner) => inner.type_name(),
            OutputShape::Named { name, .. } => name,
        }
    }
}

/// Unresolved fields are `null`, without an error.
pub fn shape_resolved(resolved: Resolved, shape: &OutputShape) -> Result<Option<FieldValue<'static>>, ResolveError> {
    match resolved {
        None | Some(Value::Null) => Ok(None),
        Some(value) => shape_value(value, shape).map(Some),
    }
}

pub fn shape_value(value: Value, shape: &OutputShape) -> Result<FieldValue<'static>, ResolveError> {
    if value.is_null() {
        return Ok(FieldValue::NULL);
    }

    match shape {
        OutputShape::List(inner) => match value {
            Value::Array(items) => {
                let items = items
                    .into_iter()
                    .map(|item| shape_value(item, inner))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(FieldValue::list(items))
            }
            other => Err(ResolveError::UnexpectedShape {
                expected: "a list",
                type_name: inner.type_name().to_string(),
                found: json_kind(&other),
            }),
        },
        OutputShape::Named { name, kind } => match kind {
            NamedKind::Leaf => leaf(value),
            NamedKind::Enum => match value {
                Value::String(item) => Ok(FieldValue::value(async_graphql::Value::Enum(Name::new(item)))),
                other => leaf(other),
            },
            NamedKind::Object(kind) => Ok(object(value, *kind)),
            NamedKind::Union(members) => union_member(value, name, members),
        },
    }
}

fn leaf(value: Value) -> Result<FieldValue<'static>, ResolveError> {
    async_graphql::Value::from_json(value)
        .map(FieldValue::value)
        .map_err(|error| UpstreamError::MalformedJson(error.to_string()).into())
}

fn object(value: Value, kind: ObjectKind) -> FieldValue<'static> {
    let source = match (value, kind) {
        (Value::Object(fields), ObjectKind::Entity(kind)) => Source::Entity(Entity::classify(kind, fields)),
        (Value::Object(fields), ObjectKind::Plain) => Source::Object(fields),
        (other, _) => Source::Opaque(other),
    };

    FieldValue::owned_any(source)
}

fn union_member(
    value: Value,
    union: &str,
    members: &HashMap<String, ObjectKind>,
) -> Result<FieldValue<'static>, ResolveError> {
    let Some(type_name) = value.get("type").and_then(Value::as_str).map(str::to_owned) else {
        return Err(ResolveError::UntypedMember {
            union: union.to_string(),
        });
    };

    let Some(kind) = members.get(&type_name) else {
        return Err(ResolveError::UnknownMember {
            union: union.to_string(),
            found: type_name,
        });
    };

    Ok(object(value, *kind).with_type(type_name))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn named(name: &str, kind: NamedKind) -> OutputShape {
        OutputShape::Named {
            name: name.to_string(),
            kind,
        }
    }

    fn comment() -> OutputShape {
        let members = [
            ("ListComment".to_string(), ObjectKind::Plain),
            ("ReviewComment".to_string(), ObjectKind::Plain),
        ];

        named("Comment", NamedKind::Union(Arc::new(members.into_iter().collect())))
    }

    #[test]
    fn entities_are_classified_when_shaped() {
        let value = shape_value(
            json!({"id": "42", "trailer": null}),
            &named("Film", NamedKind::Object(ObjectKind::Entity(EntityKind::Film))),
        )
        .unwrap();

        let Some(Source::Entity(film)) = value.downcast_ref::<Source>() else {
            unreachable!()
        };

        assert!(!film.is_summary());
    }

    #[test]
    fn non_objects_become_opaque() {
        let value = shape_value(json!("42"), &named("Genre", NamedKind::Object(ObjectKind::Plain))).unwrap();

        assert_eq!(Some(&Source::Opaque(json!("42"))), value.downcast_ref::<Source>());
    }

    #[test]
    fn lists_must_be_lists() {
        let shape = OutputShape::List(Box::new(named("String", NamedKind::Leaf)));

        let error = shape_value(json!("noir"), &shape).unwrap_err();

        assert_eq!("expected a list for `String`, got a string", error.to_string());
    }

    #[test]
    fn union_members_need_a_known_type() {
        let error = shape_value(json!({"id": "1"}), &comment()).unwrap_err();
        assert!(matches!(error, ResolveError::UntypedMember { .. }), "{error:?}");

        let error = shape_value(json!({"id": "1", "type": "FilmComment"}), &comment()).unwrap_err();
        assert_eq!("`Comment` member type `FilmComment` is unknown", error.to_string());

        assert!(shape_value(json!({"id": "1", "type": "ListComment"}), &comment()).is_ok());
    }

    #[test]
    fn null_and_unresolved_are_both_absent() {
        let shape = named("String", NamedKind::Leaf);

        assert!(shape_resolved(None, &shape).unwrap().is_none());
        assert!(shape_resolved(Some(Value::Null), &shape).unwrap().is_none());
        assert!(shape_resolved(Some(json!("x")), &shape).unwrap().is_some());
    }
}
