//! Request bodies accepted by the HTTP layer.
//!
//! Unknown keys are rejected and every text field must be non-empty.

use std::borrow::Cow;

use serde::Deserialize;
use validator::{Validate, ValidationError};

use blog_core::{BlogUpdate, NewAuthor, NewBlog, NewComment, RecordId};

fn record_id(value: &str) -> Result<(), ValidationError> {
    if RecordId::is_well_formed(value) {
        Ok(())
    } else {
        Err(ValidationError::new("record_id")
            .with_message(Cow::Borrowed("must be a 24 character hex id")))
    }
}

/// `POST /blog`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateBlogBody {
    #[validate(length(min = 1, message = "is required"))]
    pub title: String,

    #[validate(custom(function = "record_id"))]
    pub author: String,

    #[validate(length(min = 1, message = "is required"))]
    pub content: String,

    /// Inline image payload.
    #[validate(length(min = 1, message = "is required"))]
    pub photo: String,
}

impl CreateBlogBody {
    pub fn into_input(self) -> anyhow::Result<NewBlog> {
        Ok(NewBlog {
            title: self.title,
            author: RecordId::parse_field(&self.author, "author")?,
            content: self.content,
            photo: self.photo,
        })
    }
}

/// `PUT /blog`; `photo` is optional and replaces the image when present.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct UpdateBlogBody {
    #[validate(custom(function = "record_id"))]
    pub blog_id: String,

    #[validate(length(min = 1, message = "is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "is required"))]
    pub content: String,

    #[validate(custom(function = "record_id"))]
    pub author: String,

    #[validate(length(min = 1, message = "must not be empty"))]
    pub photo: Option<String>,
}

impl UpdateBlogBody {
    pub fn into_input(self) -> anyhow::Result<BlogUpdate> {
        Ok(BlogUpdate {
            blog_id: RecordId::parse_field(&self.blog_id, "blogId")?,
            title: self.title,
            content: self.content,
            author: RecordId::parse_field(&self.author, "author")?,
            photo: self.photo,
        })
    }
}

/// `POST /comment`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateCommentBody {
    #[validate(length(min = 1, message = "is required"))]
    pub content: String,

    #[validate(custom(function = "record_id"))]
    pub blog: String,

    #[validate(custom(function = "record_id"))]
    pub author: String,
}

impl CreateCommentBody {
    pub fn into_input(self) -> anyhow::Result<NewComment> {
        Ok(NewComment {
            content: self.content,
            blog: RecordId::parse_field(&self.blog, "blog")?,
            author: RecordId::parse_field(&self.author, "author")?,
        })
    }
}

/// `POST /author`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateAuthorBody {
    #[validate(length(min = 1, max = 30, message = "must be 1-30 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 30, message = "must be 1-30 characters"))]
    pub username: String,

    #[validate(email)]
    pub email: String,
}

impl From<CreateAuthorBody> for NewAuthor {
    fn from(body: CreateAuthorBody) -> Self {
        Self {
            name: body.name,
            username: body.username,
            email: body.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate;
    use blog_core::{BlogError, ErrorKind};
    use serde_json::json;

    const AUTHOR: &str = "507f1f77bcf86cd799439011";
    const BLOG: &str = "507f191e810c19729de860ea";

    fn errors_of(err: &anyhow::Error) -> serde_json::Value {
        let blog = BlogError::from_anyhow(err).expect("BlogError");
        assert_eq!(blog.kind, ErrorKind::Validation);
        blog.errors.clone().unwrap()
    }

    #[test]
    fn create_body_converts_to_lifecycle_input() {
        let body: CreateBlogBody = validate(
            &json!({
                "title": "Hello",
                "author": AUTHOR,
                "content": "World",
                "photo": "data:image/png;base64,aGVsbG8="
            }),
            "Blog schema validation failed",
        )
        .unwrap();

        let input = body.into_input().unwrap();
        assert_eq!(input.author.as_str(), AUTHOR);
        assert_eq!(input.title, "Hello");
    }

    #[test]
    fn create_body_rejects_empty_text_and_bad_author() {
        let err = validate::<CreateBlogBody>(
            &json!({"title": "", "author": "nope", "content": "x", "photo": "x"}),
            "Blog schema validation failed",
        )
        .unwrap_err();

        let errors = errors_of(&err);
        assert_eq!(errors["title"][0], "is required");
        assert_eq!(errors["author"][0], "must be a 24 character hex id");
        assert!(errors.get("content").is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = validate::<CreateCommentBody>(
            &json!({"content": "hi", "blog": BLOG, "author": AUTHOR, "likes": 3}),
            "Comment schema validation failed",
        )
        .unwrap_err();

        assert!(errors_of(&err)["_schema"][0]
            .as_str()
            .unwrap()
            .contains("unknown field `likes`"));
    }

    #[test]
    fn update_body_uses_camel_case_blog_id_and_optional_photo() {
        let body: UpdateBlogBody = validate(
            &json!({"blogId": BLOG, "title": "t", "content": "c", "author": AUTHOR}),
            "Blog schema validation failed",
        )
        .unwrap();

        let input = body.into_input().unwrap();
        assert_eq!(input.blog_id.as_str(), BLOG);
        assert!(input.photo.is_none());

        let err = validate::<UpdateBlogBody>(
            &json!({"blogId": BLOG, "title": "t", "content": "c", "author": AUTHOR, "photo": ""}),
            "Blog schema validation failed",
        )
        .unwrap_err();
        assert_eq!(errors_of(&err)["photo"][0], "must not be empty");
    }

    #[test]
    fn author_email_must_be_valid() {
        let err = validate::<CreateAuthorBody>(
            &json!({"name": "Ada", "username": "ada", "email": "not-an-email"}),
            "Author schema validation failed",
        )
        .unwrap_err();
        assert_eq!(errors_of(&err)["email"][0], "must be a valid email");
    }
}
