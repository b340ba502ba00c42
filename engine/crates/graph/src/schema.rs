//! Builds the executable schema out of the SDL files.
//!
//! Every `Query` field maps to a [`RootField`]. Fields of the other object types go through
//! [`dispatch`], and their values are shaped according to the declared output type.

use std::{collections::HashMap, str::FromStr, sync::Arc};

use async_graphql::{
    dynamic::{
        Enum, EnumItem, Field, FieldFuture, FieldValue, InputObject, InputValue, Object, ResolverContext, Scalar,
        Schema, SchemaBuilder, TypeRef, Union,
    },
    ErrorExtensions,
};
use async_graphql_parser::types::{
    BaseType, FieldDefinition, InputValueDefinition, Type, TypeDefinition, TypeKind, TypeSystemDefinition,
};

use crate::{
    dispatch::{dispatch, FieldResolver},
    entity::JsonObject,
    root::{resolve_root, RootField},
    shape::{shape_resolved, NamedKind, ObjectKind, OutputShape},
    EntityKind, RequestContext, ResolveError, SchemaError, Source,
};

const QUERY: &str = "Query";

const SDL: [(&str, &str); 8] = [
    ("schema.graphql", include_str!("../schema/schema.graphql")),
    ("film.graphql", include_str!("../schema/film.graphql")),
    ("list.graphql", include_str!("../schema/list.graphql")),
    ("member.graphql", include_str!("../schema/member.graphql")),
    ("contributor.graphql", include_str!("../schema/contributor.graphql")),
    ("logEntry.graphql", include_str!("../schema/logEntry.graphql")),
    ("comment.graphql", include_str!("../schema/comment.graphql")),
    ("search.graphql", include_str!("../schema/search.graphql")),
];

const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

pub(crate) fn build(introspection: bool) -> Result<Schema, SchemaError> {
    let definitions = parse()?;
    let catalog = Catalog::new(&definitions);

    if !definitions.iter().any(|definition| definition.name.node == QUERY) {
        return Err(SchemaError::MissingQuery);
    }

    let mut builder = Schema::build(QUERY, None, None);

    for definition in &definitions {
        builder = register(builder, definition, &catalog)?;
    }

    if !introspection {
        builder = builder.disable_introspection();
    }

    Ok(builder.finish()?)
}

fn parse() -> Result<Vec<TypeDefinition>, SchemaError> {
    let mut types = Vec::new();

    for (file, sdl) in SDL {
        let document = async_graphql_parser::parse_schema(sdl).map_err(|source| SchemaError::Parse { file, source })?;

        for definition in document.definitions {
            match definition {
                TypeSystemDefinition::Type(definition) if definition.node.extend => {
                    return Err(SchemaError::Unsupported(
                        "type extension",
                        definition.node.name.node.to_string(),
                    ));
                }
                TypeSystemDefinition::Type(definition) => types.push(definition.node),
                TypeSystemDefinition::Schema(_) => {
                    return Err(SchemaError::Unsupported("schema", file.to_string()));
                }
                TypeSystemDefinition::Directive(directive) => {
                    return Err(SchemaError::Unsupported(
                        "directive",
                        directive.node.name.node.to_string(),
                    ));
                }
            }
        }
    }

    Ok(types)
}

fn register(
    builder: SchemaBuilder,
    definition: &TypeDefinition,
    catalog: &Catalog,
) -> Result<SchemaBuilder, SchemaError> {
    let name = definition.name.node.as_str();
    let description = definition.description.as_ref().map(|description| description.node.clone());

    let builder = match &definition.kind {
        TypeKind::Object(object) if name == QUERY => {
            let mut query = Object::new(name);

            for field in &object.fields {
                query = query.field(root_field(&field.node, catalog)?);
            }

            builder.register(described(query, description, Object::description))
        }
        TypeKind::Object(object) => {
            let mut output = Object::new(name);

            for field in &object.fields {
                output = output.field(object_field(name, &field.node, catalog)?);
            }

            builder.register(described(output, description, Object::description))
        }
        TypeKind::Union(union) => {
            let mut output = Union::new(name);

            for member in &union.members {
                output = output.possible_type(member.node.as_str());
            }

            builder.register(described(output, description, Union::description))
        }
        TypeKind::Enum(enum_type) => {
            let mut output = Enum::new(name);

            for value in &enum_type.values {
                let item = EnumItem::new(value.node.value.node.as_str());
                let item_description = value.node.description.as_ref().map(|description| description.node.clone());

                output = output.item(described(item, item_description, EnumItem::description));
            }

            builder.register(described(output, description, Enum::description))
        }
        TypeKind::InputObject(input) => {
            let mut output = InputObject::new(name);

            for field in &input.fields {
                output = output.field(input_value(&field.node));
            }

            builder.register(described(output, description, InputObject::description))
        }
        TypeKind::Scalar => builder.register(described(Scalar::new(name), description, Scalar::description)),
        TypeKind::Interface(_) => return Err(SchemaError::Unsupported("interface", name.to_string())),
    };

    Ok(builder)
}

struct FieldSpec {
    name: String,
    resolver: FieldResolver,
    shape: OutputShape,
}

fn object_field(type_name: &str, definition: &FieldDefinition, catalog: &Catalog) -> Result<Field, SchemaError> {
    let name = definition.name.node.to_string();

    let spec = Arc::new(FieldSpec {
        resolver: FieldResolver::of(type_name, &name),
        shape: catalog.output_shape(&definition.ty.node)?,
        name: name.clone(),
    });

    let field = Field::new(name, type_ref(&definition.ty.node), move |ctx| {
        let spec = spec.clone();
        FieldFuture::new(async move { resolve_field(ctx, &spec).await })
    });

    Ok(with_arguments(field, definition))
}

fn root_field(definition: &FieldDefinition, catalog: &Catalog) -> Result<Field, SchemaError> {
    let name = definition.name.node.to_string();
    let root = RootField::from_str(&name).map_err(|_| SchemaError::UnknownRootField(name.clone()))?;
    let shape = Arc::new(catalog.output_shape(&definition.ty.node)?);

    let field = Field::new(name, type_ref(&definition.ty.node), move |ctx| {
        let shape = shape.clone();
        FieldFuture::new(async move { resolve_root_field(ctx, root, &shape).await })
    });

    Ok(with_arguments(field, definition))
}

async fn resolve_field<'a>(ctx: ResolverContext<'a>, spec: &FieldSpec) -> async_graphql::Result<Option<FieldValue<'a>>> {
    let parent = ctx.parent_value.try_downcast_ref::<Source>()?;
    let request = ctx.data::<RequestContext>()?;
    let arguments = arguments(&ctx)?;

    let shaped = dispatch(spec.resolver, parent, &spec.name, &arguments, &request.upstream)
        .await
        .and_then(|resolved| shape_resolved(resolved, &spec.shape));

    match shaped {
        Ok(value) => Ok(value),
        Err(error) => {
            field_error(&ctx, error);
            Ok(None)
        }
    }
}

async fn resolve_root_field<'a>(
    ctx: ResolverContext<'a>,
    field: RootField,
    shape: &OutputShape,
) -> async_graphql::Result<Option<FieldValue<'a>>> {
    let request = ctx.data::<RequestContext>()?;
    let arguments = arguments(&ctx)?;

    tracing::debug!(field = field.as_ref(), "resolving root field");

    let shaped = resolve_root(field, arguments, request)
        .await
        .and_then(|value| shape_resolved(Some(value), shape));

    match shaped {
        Ok(value) => Ok(value),
        Err(error) => {
            field_error(&ctx, error);
            Ok(None)
        }
    }
}

/// Records `error` against the current field, which then resolves to null. Siblings are
/// unaffected.
fn field_error(ctx: &ResolverContext<'_>, error: ResolveError) {
    tracing::debug!(field = %ctx.item.node.name.node, "field failed: {error}");

    ctx.add_error(ctx.set_error_path(error.extend().into_server_error(ctx.item.pos)));
}

fn arguments(ctx: &ResolverContext<'_>) -> async_graphql::Result<JsonObject> {
    let mut arguments = JsonObject::new();

    for (name, value) in ctx.args.iter() {
        arguments.insert(name.to_string(), value.as_value().clone().into_json()?);
    }

    Ok(arguments)
}

fn with_arguments(mut field: Field, definition: &FieldDefinition) -> Field {
    for argument in &definition.arguments {
        field = field.argument(input_value(&argument.node));
    }

    let description = definition.description.as_ref().map(|description| description.node.clone());
    described(field, description, Field::description)
}

fn input_value(definition: &InputValueDefinition) -> InputValue {
    let mut input = InputValue::new(definition.name.node.as_str(), type_ref(&definition.ty.node));

    if let Some(default_value) = &definition.default_value {
        input = input.default_value(default_value.node.clone());
    }

    let description = definition.description.as_ref().map(|description| description.node.clone());
    described(input, description, InputValue::description)
}

fn described<T>(item: T, description: Option<String>, describe: fn(T, String) -> T) -> T {
    match description {
        Some(description) => describe(item, description),
        None => item,
    }
}

fn type_ref(ty: &Type) -> TypeRef {
    let base = match &ty.base {
        BaseType::Named(name) => TypeRef::Named(name.to_string().into()),
        BaseType::List(inner) => TypeRef::List(Box::new(type_ref(inner))),
    };

    if ty.nullable {
        base
    } else {
        TypeRef::NonNull(Box::new(base))
    }
}

/// What every named type is, to know how to shape values of it.
struct Catalog {
    kinds: HashMap<String, NamedKind>,
}

impl Catalog {
    fn new(definitions: &[TypeDefinition]) -> Self {
        let object_kind = |name: &str| match EntityKind::from_str(name) {
            Ok(kind) => ObjectKind::Entity(kind),
            Err(_) => ObjectKind::Plain,
        };

        let mut kinds = BUILTIN_SCALARS
            .iter()
            .map(|name| (name.to_string(), NamedKind::Leaf))
            .collect::<HashMap<_, _>>();

        for definition in definitions {
            let name = definition.name.node.as_str();

            let kind = match &definition.kind {
                TypeKind::Scalar | TypeKind::InputObject(_) | TypeKind::Interface(_) => NamedKind::Leaf,
                TypeKind::Enum(_) => NamedKind::Enum,
                TypeKind::Object(_) => NamedKind::Object(object_kind(name)),
                TypeKind::Union(union) => NamedKind::Union(Arc::new(
                    union
                        .members
                        .iter()
                        .map(|member| (member.node.to_string(), object_kind(&member.node)))
                        .collect(),
                )),
            };

            kinds.insert(name.to_string(), kind);
        }

        Catalog { kinds }
    }

    fn output_shape(&self, ty: &Type) -> Result<OutputShape, SchemaError> {
        match &ty.base {
            BaseType::List(inner) => Ok(OutputShape::List(Box::new(self.output_shape(inner)?))),
            BaseType::Named(name) => {
                let kind = self
                    .kinds
                    .get(name.as_str())
                    .ok_or_else(|| SchemaError::UnknownType(name.to_string()))?;

                Ok(OutputShape::Named {
                    name: name.to_string(),
                    kind: kind.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_sdl_builds() {
        let sdl = build(true).unwrap().sdl();

        assert!(sdl.contains("union SearchItem"), "{sdl}");
        assert!(sdl.contains("alternativeNames: [String!]!"), "{sdl}");
        assert!(sdl.contains("contributions(type: String): [FilmContributions!]"), "{sdl}");
    }

    #[test]
    fn union_members_know_their_entities() {
        let catalog = Catalog::new(&parse().unwrap());

        let Some(NamedKind::Union(members)) = catalog.kinds.get("SearchItem") else {
            unreachable!()
        };

        assert_eq!(Some(&ObjectKind::Plain), members.get("FilmSearchItem"));
        assert_eq!(
            Some(&NamedKind::Object(ObjectKind::Entity(EntityKind::Contributor))),
            catalog.kinds.get("Contributor")
        );
    }

    #[tokio::test]
    async fn introspection_can_be_disabled() {
        let query = r#"{ __type(name: "Film") { name } }"#;

        let response = serde_json::to_string(&build(true).unwrap().execute(query).await).unwrap();
        assert!(response.contains(r#""name":"Film""#), "{response}");

        let response = serde_json::to_string(&build(false).unwrap().execute(query).await).unwrap();
        assert!(!response.contains(r#""name":"Film""#), "{response}");
    }
}
