use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::ids::RecordId;
use crate::models::{
    Author, BlogPatch, BlogPost, Comment, NewAuthor, NewBlogPost, NewComment,
};
use crate::store::{RecordStore, StoreResult};

/// In-process record store keyed by record id.
#[derive(Default)]
pub struct MemoryRecordStore {
    blogs: RwLock<HashMap<RecordId, BlogPost>>,
    comments: RwLock<HashMap<RecordId, Comment>>,
    authors: RwLock<HashMap<RecordId, Author>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn comment_count(&self) -> usize {
        self.comments.read().await.len()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert_blog(&self, blog: NewBlogPost) -> StoreResult<BlogPost> {
        let now = Utc::now();
        let post = BlogPost {
            id: RecordId::generate(),
            title: blog.title,
            author: blog.author,
            content: blog.content,
            photo_key: blog.photo_key,
            photo_path: blog.photo_path,
            created_at: now,
            updated_at: now,
        };

        self.blogs
            .write()
            .await
            .insert(post.id.clone(), post.clone());
        Ok(post)
    }

    async fn find_blog(&self, id: &RecordId) -> StoreResult<Option<BlogPost>> {
        Ok(self.blogs.read().await.get(id).cloned())
    }

    async fn find_blogs(&self) -> StoreResult<Vec<BlogPost>> {
        Ok(self.blogs.read().await.values().cloned().collect())
    }

    async fn update_blog(&self, id: &RecordId, patch: BlogPatch) -> StoreResult<u64> {
        let mut blogs = self.blogs.write().await;
        let Some(post) = blogs.get_mut(id) else {
            return Ok(0);
        };
        patch.apply(post);
        Ok(1)
    }

    async fn delete_blog(&self, id: &RecordId) -> StoreResult<u64> {
        Ok(self.blogs.write().await.remove(id).map_or(0, |_| 1))
    }

    async fn insert_comment(&self, comment: NewComment) -> StoreResult<Comment> {
        let comment = Comment {
            id: RecordId::generate(),
            content: comment.content,
            blog: comment.blog,
            author: comment.author,
            created_at: Utc::now(),
        };

        self.comments
            .write()
            .await
            .insert(comment.id.clone(), comment.clone());
        Ok(comment)
    }

    async fn find_comments_for_blog(&self, blog: &RecordId) -> StoreResult<Vec<Comment>> {
        let comments = self.comments.read().await;
        Ok(comments
            .values()
            .filter(|c| &c.blog == blog)
            .cloned()
            .collect())
    }

    async fn delete_comments_for_blog(&self, blog: &RecordId) -> StoreResult<u64> {
        let mut comments = self.comments.write().await;
        let before = comments.len();
        comments.retain(|_, c| &c.blog != blog);
        Ok((before - comments.len()) as u64)
    }

    async fn insert_author(&self, author: NewAuthor) -> StoreResult<Author> {
        let author = Author {
            id: RecordId::generate(),
            name: author.name,
            username: author.username,
            email: author.email,
            created_at: Utc::now(),
        };

        self.authors
            .write()
            .await
            .insert(author.id.clone(), author.clone());
        Ok(author)
    }

    async fn find_author(&self, id: &RecordId) -> StoreResult<Option<Author>> {
        Ok(self.authors.read().await.get(id).cloned())
    }
}
