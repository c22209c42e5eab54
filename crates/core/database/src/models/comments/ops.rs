use quill_result::Result;

use crate::{Comment, PartialComment};

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractComments: Sync + Send {
    /// Insert a new comment into the database
    async fn insert_comment(&self, comment: &Comment) -> Result<()>;

    /// Fetch a comment by its id
    async fn fetch_comment(&self, id: &str) -> Result<Comment>;

    /// Update a comment with new information
    async fn update_comment(&self, id: &str, partial: &PartialComment) -> Result<()>;
}
