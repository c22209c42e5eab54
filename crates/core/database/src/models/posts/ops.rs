use quill_result::Result;

use crate::{PartialPost, Post};

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractPosts: Sync + Send {
    /// Insert a new post into the database
    async fn insert_post(&self, post: &Post) -> Result<()>;

    /// Fetch a post by its id
    async fn fetch_post(&self, id: &str) -> Result<Post>;

    /// Update a post with new information
    async fn update_post(&self, id: &str, partial: &PartialPost) -> Result<()>;
}
