use blog_core::BlogLifecycleManager;

/// Shared handler state.
#[derive(Clone)]
pub struct BlogAxumState {
    pub blogs: BlogLifecycleManager,
}

impl BlogAxumState {
    pub fn new(blogs: BlogLifecycleManager) -> Self {
        Self { blogs }
    }
}
