//! Blog post lifecycle: keeps each post record and its image asset in step.
//!
//! Every mutating operation is "asset step, then record step" with no
//! transaction spanning the two stores. When a later step fails, earlier
//! asset steps are undone on a best-effort basis (compensation); a failed
//! compensation is logged and the original error is returned.

use std::sync::Arc;

use blog_blob::{AssetAdapter, AssetName, BlobError};
use bytes::Bytes;
use serde_json::json;

use crate::bail_blog;
use crate::errors::{BlogError, BlogResult};
use crate::ids::RecordId;
use crate::models::{
    AuthorDto, BlogDetailsDto, BlogDto, BlogPatch, CommentDto, NewAuthor, NewBlogPost, NewComment,
};
use crate::store::{RecordStore, StoreError};

/// What happens to a post's image when the post is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetRetention {
    /// Leave the image in the asset store.
    #[default]
    Retain,
    /// Remove the image together with the post.
    Delete,
}

impl AssetRetention {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "retain" => Some(Self::Retain),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

/// Input for `create_blog`.
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub author: RecordId,
    pub content: String,
    /// Inline image payload, `data:image/png;base64,...`
    pub photo: String,
}

/// Input for `update_blog`.
#[derive(Debug, Clone)]
pub struct BlogUpdate {
    pub blog_id: RecordId,
    pub title: String,
    pub content: String,
    /// Owner id used to name a replacement image.
    pub author: RecordId,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteOutcome {
    pub blogs_removed: u64,
    pub comments_removed: u64,
    pub asset_removed: bool,
}

fn persistence(err: StoreError) -> anyhow::Error {
    BlogError::persistence(err.to_string())
        .with_source(err)
        .into_anyhow()
}

fn decode_error(err: BlobError) -> anyhow::Error {
    let message = err.to_string();
    BlogError::decode("Failed to decode photo")
        .with_errors(json!({"photo": [message]}))
        .with_source(err)
        .into_anyhow()
}

fn asset_write_error(err: BlobError) -> anyhow::Error {
    BlogError::asset_write(format!("Failed to store photo: {err}"))
        .with_source(err)
        .into_anyhow()
}

fn asset_delete_error(name: &AssetName, err: BlobError) -> anyhow::Error {
    BlogError::asset_delete(format!("Failed to remove previous photo {name}: {err}"))
        .with_source(err)
        .into_anyhow()
}

fn blog_not_found(id: &RecordId) -> anyhow::Error {
    BlogError::not_found(format!("Blog not found: {id}")).into_anyhow()
}

/// Owns create/list/get/update/delete for blog posts.
#[derive(Clone)]
pub struct BlogLifecycleManager {
    records: Arc<dyn RecordStore>,
    assets: AssetAdapter,
    retention: AssetRetention,
}

impl BlogLifecycleManager {
    pub fn new(records: Arc<dyn RecordStore>, assets: AssetAdapter) -> Self {
        Self {
            records,
            assets,
            retention: AssetRetention::default(),
        }
    }

    pub fn with_retention(mut self, retention: AssetRetention) -> Self {
        self.retention = retention;
        self
    }

    pub fn assets(&self) -> &AssetAdapter {
        &self.assets
    }

    /// Decode and store the photo, then insert the post.
    ///
    /// If the insert fails the freshly written asset is removed again.
    pub async fn create_blog(&self, input: NewBlog) -> BlogResult<BlogDto> {
        let image = self.assets.decode(&input.photo).map_err(decode_error)?;

        let receipt = self
            .assets
            .put(input.author.as_str(), &image)
            .await
            .map_err(asset_write_error)?;

        let draft = NewBlogPost {
            title: input.title,
            author: input.author,
            content: input.content,
            photo_key: receipt.name.clone(),
            photo_path: receipt.url.clone(),
        };

        let post = match self.records.insert_blog(draft).await {
            Ok(post) => post,
            Err(err) => {
                self.discard_asset(&receipt.name).await;
                return Err(persistence(err));
            }
        };

        tracing::info!(
            blog = %post.id,
            asset = %receipt.name,
            size = receipt.size_bytes,
            "blog created"
        );
        Ok(BlogDto::from(&post))
    }

    pub async fn list_blogs(&self) -> BlogResult<Vec<BlogDto>> {
        let posts = self.records.find_blogs().await.map_err(persistence)?;
        Ok(posts.iter().map(BlogDto::from).collect())
    }

    /// Fetch one post with its author expanded.
    pub async fn get_blog(&self, id: &str) -> BlogResult<BlogDetailsDto> {
        let id = RecordId::parse(id)?;

        let post = self
            .records
            .find_blog(&id)
            .await
            .map_err(persistence)?
            .ok_or_else(|| blog_not_found(&id))?;

        let populated = self.records.populate_author(post).await.map_err(persistence)?;
        Ok(BlogDetailsDto::from(&populated))
    }

    /// Update title/content, replacing the photo when one is supplied.
    ///
    /// With a photo the order is: delete old asset, write new asset, update
    /// record. The old bytes are kept in memory until the record update
    /// lands so they can be restored if a later step fails.
    pub async fn update_blog(&self, input: BlogUpdate) -> BlogResult<()> {
        let existing = self
            .records
            .find_blog(&input.blog_id)
            .await
            .map_err(persistence)?
            .ok_or_else(|| blog_not_found(&input.blog_id))?;

        let Some(photo) = input.photo.as_deref() else {
            let patch = BlogPatch {
                title: Some(input.title),
                content: Some(input.content),
                photo: None,
            };
            self.apply_patch(&input.blog_id, patch).await?;
            tracing::info!(blog = %input.blog_id, "blog updated");
            return Ok(());
        };

        // Reject a bad payload before touching the current image.
        let image = self.assets.decode(photo).map_err(decode_error)?;

        let old = existing.photo_key;
        let old_bytes = self
            .assets
            .open(&old)
            .await
            .map_err(|e| asset_delete_error(&old, e))?;
        self.assets
            .delete(&old)
            .await
            .map_err(|e| asset_delete_error(&old, e))?;

        let receipt = match self.assets.put(input.author.as_str(), &image).await {
            Ok(receipt) => receipt,
            Err(err) => {
                self.restore_asset(&old, old_bytes).await;
                return Err(asset_write_error(err));
            }
        };

        let patch = BlogPatch {
            title: Some(input.title),
            content: Some(input.content),
            photo: Some((receipt.name.clone(), receipt.url.clone())),
        };

        if let Err(err) = self.apply_patch(&input.blog_id, patch).await {
            if receipt.name != old {
                self.discard_asset(&receipt.name).await;
            }
            self.restore_asset(&old, old_bytes).await;
            return Err(err);
        }

        tracing::info!(
            blog = %input.blog_id,
            old_asset = %old,
            new_asset = %receipt.name,
            "blog updated with new photo"
        );
        Ok(())
    }

    /// Delete the post and cascade to its comments.
    ///
    /// Both deletes run even when the post does not exist, so deleting an
    /// unknown id is a successful no-op. The image follows the configured
    /// `AssetRetention`.
    pub async fn delete_blog(&self, id: &str) -> BlogResult<DeleteOutcome> {
        let id = RecordId::parse(id)?;

        let existing = match self.retention {
            AssetRetention::Delete => self.records.find_blog(&id).await.map_err(persistence)?,
            AssetRetention::Retain => None,
        };

        let blogs_removed = self.records.delete_blog(&id).await.map_err(persistence)?;
        let comments_removed = self
            .records
            .delete_comments_for_blog(&id)
            .await
            .map_err(persistence)?;

        let mut asset_removed = false;
        if let Some(post) = existing {
            match self.assets.delete(&post.photo_key).await {
                Ok(()) => asset_removed = true,
                Err(err) if err.is_not_found() => {
                    tracing::debug!(blog = %id, asset = %post.photo_key, "asset already gone");
                }
                Err(err) => return Err(asset_delete_error(&post.photo_key, err)),
            }
        }

        tracing::info!(
            blog = %id,
            blogs_removed,
            comments_removed,
            asset_removed,
            "blog deleted"
        );

        Ok(DeleteOutcome {
            blogs_removed,
            comments_removed,
            asset_removed,
        })
    }

    async fn apply_patch(&self, id: &RecordId, patch: BlogPatch) -> BlogResult<()> {
        let matched = self.records.update_blog(id, patch).await.map_err(persistence)?;
        if matched == 0 {
            bail_blog!(not_found, "Blog not found: {}", id);
        }
        Ok(())
    }

    async fn discard_asset(&self, name: &AssetName) {
        if let Err(err) = self.assets.delete(name).await {
            tracing::warn!(asset = %name, error = %err, "failed to discard orphaned asset");
        }
    }

    async fn restore_asset(&self, name: &AssetName, bytes: Bytes) {
        if let Err(err) = self.assets.restore(name, bytes).await {
            tracing::warn!(asset = %name, error = %err, "failed to restore previous asset");
        }
    }
}

// Records the blog lifecycle depends on but does not own.
impl BlogLifecycleManager {
    pub async fn create_author(&self, author: NewAuthor) -> BlogResult<AuthorDto> {
        let author = self.records.insert_author(author).await.map_err(persistence)?;
        tracing::info!(author = %author.id, "author created");
        Ok(AuthorDto::from(&author))
    }

    /// Comments may only reference an existing post.
    pub async fn create_comment(&self, comment: NewComment) -> BlogResult<CommentDto> {
        if self
            .records
            .find_blog(&comment.blog)
            .await
            .map_err(persistence)?
            .is_none()
        {
            bail_blog!(not_found, "Blog not found: {}", comment.blog);
        }

        let comment = self.records.insert_comment(comment).await.map_err(persistence)?;
        Ok(CommentDto::from(&comment))
    }

    pub async fn list_comments(&self, blog_id: &str) -> BlogResult<Vec<CommentDto>> {
        let blog = RecordId::parse(blog_id)?;
        let comments = self
            .records
            .find_comments_for_blog(&blog)
            .await
            .map_err(persistence)?;
        Ok(comments.iter().map(CommentDto::from).collect())
    }
}
