use iso8601_timestamp::Timestamp;

auto_derived_partial!(
    /// Comment on a diary post
    pub struct Comment {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Id of the user who wrote this comment
        pub author_id: String,
        /// Id of the post this comment belongs to
        pub post_id: String,
        /// Comment body
        pub content: String,

        /// Whether this comment was soft-deleted
        #[serde(skip_serializing_if = "crate::if_false", default)]
        pub is_deleted: bool,
        /// Whether a moderator deleted this comment
        #[serde(skip_serializing_if = "crate::if_false", default)]
        pub deleted_by_admin: bool,
        /// Notes attached by the deleting moderator
        #[serde(skip_serializing_if = "Option::is_none")]
        pub admin_removal_notes: Option<String>,
        /// When this comment was deleted
        #[serde(skip_serializing_if = "Option::is_none")]
        pub deleted_at: Option<Timestamp>,
    },
    "PartialComment"
);
