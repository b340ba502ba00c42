use serde_json::Value;

/// Ordered query parameters of an upstream request.
///
/// Order matters: it is the order in which parameters are serialized, and the signature covers
/// the serialized URL. Names can repeat.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds parameters out of GraphQL arguments, keeping their order.
    ///
    /// Nulls are skipped, lists repeat their name once per element, and objects (which the API
    /// never expects) are passed along as JSON text. Names are not validated.
    pub fn from_arguments<I, K>(arguments: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut params = QueryParams::new();

        for (name, value) in arguments {
            let name = name.into();

            match value {
                Value::Array(values) => {
                    for value in values {
                        if let Some(value) = scalar_text(value) {
                            params.push(name.clone(), value);
                        }
                    }
                }
                value => {
                    if let Some(value) = scalar_text(value) {
                        params.push(name, value);
                    }
                }
            }
        }

        params
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter().find(|(key, _)| *key == name).map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `application/x-www-form-urlencoded` serialization, in insertion order.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(value) => Some(value),
        Value::Bool(value) => Some(value.to_string()),
        Value::Number(value) => Some(value.to_string()),
        value @ (Value::Array(_) | Value::Object(_)) => Some(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn arguments_keep_their_order() {
        let params = QueryParams::from_arguments([
            ("perPage", json!(20)),
            ("genre", json!("8Q")),
            ("includeFriends", json!(true)),
        ]);

        assert_eq!("perPage=20&genre=8Q&includeFriends=true", params.to_query_string());
    }

    #[test]
    fn lists_repeat_the_name_and_nulls_are_dropped() {
        let params = QueryParams::from_arguments([
            ("where", json!(["Released", "FeatureLength"])),
            ("cursor", json!(null)),
            ("filter", json!({"a": 1})),
        ]);

        assert_eq!(
            vec![
                ("where", "Released"),
                ("where", "FeatureLength"),
                ("filter", r#"{"a":1}"#)
            ],
            params.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn serialization_is_form_encoded() {
        let params = QueryParams::new().with("input", "the thing & co");

        assert_eq!("input=the+thing+%26+co", params.to_query_string());
    }
}
