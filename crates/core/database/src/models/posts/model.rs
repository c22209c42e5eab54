use iso8601_timestamp::Timestamp;

auto_derived_partial!(
    /// Diary post
    ///
    /// Only the fields the moderation core reads and writes; the rest
    /// of the post lifecycle is owned by the content service.
    pub struct Post {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Id of the user who wrote this post
        pub author_id: String,
        /// Post title
        pub title: String,
        /// Post body
        pub content: String,
        /// Whether this post is visible to the community
        pub is_public: bool,

        /// Whether a moderator pulled this post from the community
        #[serde(skip_serializing_if = "crate::if_false", default)]
        pub removed_by_admin: bool,
        /// Notes attached by the removing moderator
        #[serde(skip_serializing_if = "Option::is_none")]
        pub admin_removal_notes: Option<String>,
        /// When this post was pulled from the community
        #[serde(skip_serializing_if = "Option::is_none")]
        pub removed_at: Option<Timestamp>,
    },
    "PartialPost"
);
