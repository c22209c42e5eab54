use quill_result::Result;

use crate::ReferenceDb;
use crate::{Comment, PartialComment};

use super::AbstractComments;

#[async_trait]
impl AbstractComments for ReferenceDb {
    /// Insert a new comment into the database
    async fn insert_comment(&self, comment: &Comment) -> Result<()> {
        let mut comments = self.comments.lock().await;
        if comments.contains_key(&comment.id) {
            Err(create_database_error!("insert", "comment"))
        } else {
            comments.insert(comment.id.to_string(), comment.clone());
            Ok(())
        }
    }

    /// Fetch a comment by its id
    async fn fetch_comment(&self, id: &str) -> Result<Comment> {
        let comments = self.comments.lock().await;
        comments
            .get(id)
            .cloned()
            .ok_or_else(|| create_error!(NotFound))
    }

    /// Update a comment with new information
    async fn update_comment(&self, id: &str, partial: &PartialComment) -> Result<()> {
        let mut comments = self.comments.lock().await;
        if let Some(comment) = comments.get_mut(id) {
            comment.apply_options(partial.clone());
            Ok(())
        } else {
            Err(create_error!(NotFound))
        }
    }
}
