use quill_result::Result;

use crate::MongoDb;
use crate::{Comment, PartialComment};

use super::AbstractComments;

static COL: &str = "comments";

#[async_trait]
impl AbstractComments for MongoDb {
    /// Insert a new comment into the database
    async fn insert_comment(&self, comment: &Comment) -> Result<()> {
        query!(self, insert_one, COL, &comment).map(|_| ())
    }

    /// Fetch a comment by its id
    async fn fetch_comment(&self, id: &str) -> Result<Comment> {
        query!(self, find_one_by_id, COL, id)?.ok_or_else(|| create_error!(NotFound))
    }

    /// Update a comment with new information
    async fn update_comment(&self, id: &str, partial: &PartialComment) -> Result<()> {
        query!(self, update_one_by_id, COL, id, partial, vec![], None).map(|_| ())
    }
}
