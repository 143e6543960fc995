//! Stored records and their external projections.

use blog_blob::AssetName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::RecordId;

/// A persisted blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: RecordId,
    pub title: String,
    pub author: RecordId,
    pub content: String,
    /// Name of the current image asset in the asset store.
    pub photo_key: AssetName,
    /// Public URL of the current image asset.
    pub photo_path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a post before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewBlogPost {
    pub title: String,
    pub author: RecordId,
    pub content: String,
    pub photo_key: AssetName,
    pub photo_path: String,
}

/// Partial update applied by `RecordStore::update_blog`.
#[derive(Debug, Clone, Default)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub photo: Option<(AssetName, String)>,
}

impl BlogPatch {
    pub fn apply(self, post: &mut BlogPost) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some((key, path)) = self.photo {
            post.photo_key = key;
            post.photo_path = path;
        }
        post.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: RecordId,
    pub content: String,
    pub blog: RecordId,
    pub author: RecordId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
    pub blog: RecordId,
    pub author: RecordId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: RecordId,
    pub name: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAuthor {
    pub name: String,
    pub username: String,
    pub email: String,
}

/// A post with its author reference resolved (single hop).
#[derive(Debug, Clone)]
pub struct PopulatedBlog {
    pub post: BlogPost,
    /// `None` when the referenced author record does not exist.
    pub author: Option<Author>,
}

// ---- Projections ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub author: String,
    pub content: String,
    pub photo: String,
}

impl From<&BlogPost> for BlogDto {
    fn from(post: &BlogPost) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            author: post.author.to_string(),
            content: post.content.clone(),
            photo: post.photo_path.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
}

impl From<&Author> for AuthorDto {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id.to_string(),
            name: author.name.clone(),
            username: author.username.clone(),
            email: author.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogDetailsDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub photo: String,
    pub created_at: DateTime<Utc>,
    pub author: Option<AuthorDto>,
}

impl From<&PopulatedBlog> for BlogDetailsDto {
    fn from(blog: &PopulatedBlog) -> Self {
        Self {
            id: blog.post.id.to_string(),
            title: blog.post.title.clone(),
            content: blog.post.content.clone(),
            photo: blog.post.photo_path.clone(),
            created_at: blog.post.created_at,
            author: blog.author.as_ref().map(AuthorDto::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub content: String,
    pub blog: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Comment> for CommentDto {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            content: comment.content.clone(),
            blog: comment.blog.to_string(),
            author: comment.author.to_string(),
            created_at: comment.created_at,
        }
    }
}
