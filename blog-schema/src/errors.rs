use serde_json::{Map, Value};

use blog_core::BlogError;

/// Per-field validation messages, serialized as `{"field": ["msg", ...]}`.
///
/// Messages that do not belong to a single field go under `_schema`.
#[derive(Debug, Default)]
pub struct SchemaErrors {
    map: Map<String, Value>,
}

impl SchemaErrors {
    pub fn push_schema(&mut self, msg: impl Into<String>) {
        self.push_field("_schema", msg);
    }

    pub fn push_field(&mut self, field: &str, msg: impl Into<String>) {
        let msg = Value::String(msg.into());
        match self.map.get_mut(field) {
            Some(Value::Array(arr)) => arr.push(msg),
            _ => {
                self.map.insert(field.to_string(), Value::Array(vec![msg]));
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.map)
    }

    pub fn into_validation_anyhow(self, message: &str) -> anyhow::Error {
        BlogError::validation(message)
            .with_errors(self.into_value())
            .into_anyhow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_accumulate_per_field() {
        let mut errors = SchemaErrors::default();
        assert!(errors.is_empty());

        errors.push_field("title", "is required");
        errors.push_field("title", "is too short");
        errors.push_schema("unexpected field `x`");

        let value = errors.into_value();
        assert_eq!(value["title"].as_array().unwrap().len(), 2);
        assert_eq!(value["_schema"][0], "unexpected field `x`");
    }
}
