use async_trait::async_trait;
use thiserror::Error;

use crate::ids::RecordId;
use crate::models::{
    Author, BlogPatch, BlogPost, Comment, NewAuthor, NewBlogPost, NewComment, PopulatedBlog,
};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures of the record store itself (never "no such record").
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence for posts, comments and authors.
///
/// Lookups return `Ok(None)` for missing records. Deletes are set-based and
/// return the number of records removed, so deleting nothing is not an error.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_blog(&self, blog: NewBlogPost) -> StoreResult<BlogPost>;

    async fn find_blog(&self, id: &RecordId) -> StoreResult<Option<BlogPost>>;

    async fn find_blogs(&self) -> StoreResult<Vec<BlogPost>>;

    /// Apply a patch; returns the number of matched records (0 or 1).
    async fn update_blog(&self, id: &RecordId, patch: BlogPatch) -> StoreResult<u64>;

    async fn delete_blog(&self, id: &RecordId) -> StoreResult<u64>;

    async fn insert_comment(&self, comment: NewComment) -> StoreResult<Comment>;

    async fn find_comments_for_blog(&self, blog: &RecordId) -> StoreResult<Vec<Comment>>;

    /// Delete every comment whose `blog` reference equals `blog`.
    async fn delete_comments_for_blog(&self, blog: &RecordId) -> StoreResult<u64>;

    async fn insert_author(&self, author: NewAuthor) -> StoreResult<Author>;

    async fn find_author(&self, id: &RecordId) -> StoreResult<Option<Author>>;

    /// Resolve the post's author reference (single hop).
    async fn populate_author(&self, post: BlogPost) -> StoreResult<PopulatedBlog> {
        let author = self.find_author(&post.author).await?;
        Ok(PopulatedBlog { post, author })
    }
}
