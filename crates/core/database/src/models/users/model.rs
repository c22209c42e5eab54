auto_derived!(
    /// # User
    pub struct User {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Username
        pub username: String,
        /// Whether this user is a moderator
        #[serde(skip_serializing_if = "crate::if_false", default)]
        pub privileged: bool,
        /// Session token issued by the identity provider
        #[serde(skip_serializing_if = "Option::is_none")]
        pub token: Option<String>,
    }
);
