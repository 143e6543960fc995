//! blog-core: records, lifecycle and error taxonomy for the blog service.
//!
//! The HTTP layer lives in `blog-axum`; image storage in `blog-blob`.
//! Everything here is transport-agnostic.

pub mod config;
pub mod errors;
pub mod ids;
pub mod lifecycle;
pub mod memory;
pub mod models;
pub mod store;

pub use config::BlogConfig;
pub use errors::{BlogError, BlogResult, ErrorKind};
pub use ids::RecordId;
pub use lifecycle::{AssetRetention, BlogLifecycleManager, BlogUpdate, DeleteOutcome, NewBlog};
pub use memory::MemoryRecordStore;
pub use models::{
    Author, AuthorDto, BlogDetailsDto, BlogDto, BlogPatch, BlogPost, Comment, CommentDto,
    NewAuthor, NewBlogPost, NewComment, PopulatedBlog,
};
pub use store::{RecordStore, StoreError, StoreResult};
