use serde_json::{Map, Value};

pub type JsonObject = Map<String, Value>;

/// Types the API serves in a short summary form and a complete detail form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumString, strum::AsRefStr, strum::Display)]
pub enum EntityKind {
    Film,
    List,
    Member,
    Contributor,
}

impl EntityKind {
    /// The field only present in the detail form. It can be present and `null`.
    pub fn sentinel(self) -> &'static str {
        match self {
            EntityKind::Film => "trailer",
            EntityKind::List | EntityKind::Member | EntityKind::Contributor => "links",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Representation {
    Summary(JsonObject),
    Detail(JsonObject),
}

impl Representation {
    pub fn fields(&self) -> &JsonObject {
        match self {
            Representation::Summary(fields) | Representation::Detail(fields) => fields,
        }
    }

    pub fn is_summary(&self) -> bool {
        matches!(self, Representation::Summary(_))
    }
}

/// An entity as it came back from the API, classified once.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    pub representation: Representation,
}

impl Entity {
    pub fn classify(kind: EntityKind, fields: JsonObject) -> Self {
        let representation = if fields.contains_key(kind.sentinel()) {
            Representation::Detail(fields)
        } else {
            Representation::Summary(fields)
        };

        Entity { kind, representation }
    }

    /// A payload fetched from the entity's own endpoint, which is always complete.
    pub fn detail(kind: EntityKind, fields: JsonObject) -> Self {
        Entity {
            kind,
            representation: Representation::Detail(fields),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.fields().get("id").and_then(Value::as_str)
    }

    pub fn fields(&self) -> &JsonObject {
        self.representation.fields()
    }

    pub fn is_summary(&self) -> bool {
        self.representation.is_summary()
    }
}

/// The parent value handed to field resolvers.
#[derive(Clone, Debug, PartialEq)]
pub enum Source {
    Entity(Entity),
    Object(JsonObject),
    /// A non-object value where an object was expected. None of its fields resolve.
    Opaque(Value),
}
