//! blog-schema: request bodies and validation for the blog service.
//!
//! Bodies arrive as `serde_json::Value`, are deserialized into a schema
//! struct and checked with `validator`. Every failure becomes a
//! `ValidationError` (422) whose `errors` map field paths to messages.

mod errors;
pub mod schemas;

use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

pub use errors::SchemaErrors;
pub use schemas::{CreateAuthorBody, CreateBlogBody, CreateCommentBody, UpdateBlogBody};

fn friendly_message(code: &str) -> Option<&'static str> {
    match code {
        "required" => Some("is required"),
        "email" => Some("must be a valid email"),
        "length" => Some("has invalid length"),
        "record_id" => Some("must be a 24 character hex id"),
        _ => None,
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

fn push_validation_errors(out: &mut SchemaErrors, prefix: &str, errs: &validator::ValidationErrors) {
    for (field, kind) in errs.errors() {
        match kind {
            validator::ValidationErrorsKind::Field(field_errors) => {
                let key = join_path(prefix, field);
                for e in field_errors {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .or_else(|| friendly_message(&e.code).map(|m| m.to_string()))
                        .unwrap_or_else(|| e.code.to_string());
                    out.push_field(&key, msg);
                }
            }
            validator::ValidationErrorsKind::Struct(nested) => {
                push_validation_errors(out, &join_path(prefix, field), nested.as_ref());
            }
            validator::ValidationErrorsKind::List(list) => {
                let base = join_path(prefix, field);
                for (idx, nested) in list {
                    push_validation_errors(out, &format!("{base}[{idx}]"), nested.as_ref());
                }
            }
        }
    }
}

/// serde reports a missing key as "missing field `title`"; surface that
/// under the field itself.
fn deserialize_errors(err: &serde_json::Error) -> SchemaErrors {
    let mut out = SchemaErrors::default();
    let text = err.to_string();

    let missing = text
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next());

    match missing {
        Some(field) => out.push_field(field, "is required"),
        None => out.push_schema(text),
    }
    out
}

/// Deserialize and validate `data` as `T`.
pub fn validate<T>(data: &Value, error_message: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned + Validate,
{
    let parsed: T = serde_json::from_value(data.clone())
        .map_err(|e| deserialize_errors(&e).into_validation_anyhow(error_message))?;

    parsed.validate().map_err(|e| {
        let mut out = SchemaErrors::default();
        push_validation_errors(&mut out, "", &e);
        out.into_validation_anyhow(error_message)
    })?;

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use blog_core::{BlogError, ErrorKind};
    use serde::Deserialize;
    use serde_json::json;
    use validator::Validate;

    use super::validate;

    #[derive(Debug, Deserialize, Validate)]
    struct Profile {
        #[validate(length(min = 2, message = "display_name must be at least 2 chars"))]
        display_name: String,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Tag {
        #[validate(email)]
        email: String,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Page {
        #[validate(nested)]
        profile: Profile,

        #[validate(nested)]
        tags: Vec<Tag>,
    }

    #[test]
    fn nested_and_list_errors_are_flattened_with_paths() {
        let data = json!({
            "profile": {"display_name": "x"},
            "tags": [{"email": "not-an-email"}]
        });

        let err = validate::<Page>(&data, "Page schema validation failed").unwrap_err();
        let blog = BlogError::from_anyhow(&err).expect("must be BlogError");
        let errors = blog.errors.as_ref().unwrap();

        assert_eq!(blog.kind, ErrorKind::Validation);
        assert_eq!(errors["profile.display_name"][0], "display_name must be at least 2 chars");
        assert_eq!(errors["tags[0].email"][0], "must be a valid email");
    }

    #[test]
    fn missing_fields_are_reported_under_their_name() {
        let err = validate::<Tag>(&json!({}), "Tag schema validation failed").unwrap_err();
        let blog = BlogError::from_anyhow(&err).unwrap();
        assert_eq!(blog.errors.as_ref().unwrap()["email"][0], "is required");
        assert_eq!(blog.message, "Tag schema validation failed");
    }

    #[test]
    fn type_mismatches_land_under_schema() {
        let err = validate::<Tag>(&json!({"email": 5}), "Tag schema validation failed").unwrap_err();
        let blog = BlogError::from_anyhow(&err).unwrap();
        assert!(blog.errors.as_ref().unwrap()["_schema"][0]
            .as_str()
            .unwrap()
            .contains("invalid type"));
    }
}
