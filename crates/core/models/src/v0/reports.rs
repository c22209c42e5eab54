use iso8601_timestamp::Timestamp;

auto_derived!(
    /// Reason for reporting a piece of content
    #[serde(rename_all = "snake_case")]
    pub enum ReportReason {
        /// Unsolicited advertisements
        Spam,

        /// Content inappropriate for a general audience
        Inappropriate,

        /// Harassment or abuse targeted at another user
        Harassment,

        /// Extreme violence or content that promotes harm
        Violence,

        /// Infringes on someone else's copyright
        Copyright,

        /// False or misleading information
        FakeNews,

        /// Doesn't fit any other category
        Other,
    }

    /// The content being reported
    ///
    /// The target type picks the collection the id resolves against,
    /// so a report can never point a post id at the comments store.
    #[serde(tag = "type")]
    pub enum ReportedTarget {
        /// Report a diary post
        Post {
            /// ID of the post
            id: String,
            /// Reason for reporting the post
            report_reason: ReportReason,
        },
        /// Report a comment
        Comment {
            /// ID of the comment
            id: String,
            /// Reason for reporting the comment
            report_reason: ReportReason,
        },
    }

    /// Status of a report
    ///
    /// Resolution stamps only exist on the terminal statuses; moving a
    /// report back to an open status discards them.
    #[serde(tag = "status")]
    pub enum ReportStatus {
        /// Report is waiting for triage
        Pending {},

        /// Report has been looked at but not yet actioned
        Reviewed {},

        /// Report was actioned
        Resolved {
            resolved_by: String,
            resolved_at: Timestamp,
        },

        /// Report was dismissed without action
        Dismissed {
            resolved_by: String,
            resolved_at: Timestamp,
        },
    }

    /// Just the status of a report
    pub enum ReportStatusString {
        /// Report is waiting for triage
        Pending,

        /// Report has been looked at but not yet actioned
        Reviewed,

        /// Report was actioned
        Resolved,

        /// Report was dismissed without action
        Dismissed,
    }

    /// Condensed report shape carried in moderation events
    pub struct ReportSnippet {
        /// Id of the report
        pub id: String,
        /// Target type name
        pub item_type: String,
        /// Reason given for the report
        pub reason: ReportReason,
        /// Description given by the reporter
        pub description: String,
    }

    /// Condensed removed-content shape carried in moderation events
    pub struct RemovedItemSnippet {
        /// Id of the removed item
        pub id: String,
        /// Title, or a placeholder for content without one
        pub title: String,
        /// Body, truncated for display
        pub content: String,
    }

    /// Aggregate counts over the reports collection
    pub struct ReportStats {
        /// Reports by current status
        pub status: std::collections::HashMap<String, u64>,

        /// Reports by target type
        pub targets: std::collections::HashMap<String, u64>,

        /// Reports by reason
        pub reasons: std::collections::HashMap<String, u64>,

        /// Reports opened within the past seven days
        pub past_week: u64,
    }
);

impl ReportReason {
    /// Every reason, in a fixed order, for aggregation
    pub const ALL: [ReportReason; 7] = [
        ReportReason::Spam,
        ReportReason::Inappropriate,
        ReportReason::Harassment,
        ReportReason::Violence,
        ReportReason::Copyright,
        ReportReason::FakeNews,
        ReportReason::Other,
    ];

    /// Name of the reason, as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportReason::Spam => "spam",
            ReportReason::Inappropriate => "inappropriate",
            ReportReason::Harassment => "harassment",
            ReportReason::Violence => "violence",
            ReportReason::Copyright => "copyright",
            ReportReason::FakeNews => "fake_news",
            ReportReason::Other => "other",
        }
    }
}

impl ReportedTarget {
    /// Id of the reported content
    pub fn id(&self) -> &str {
        match self {
            ReportedTarget::Post { id, .. } | ReportedTarget::Comment { id, .. } => id,
        }
    }

    /// Reason given for the report
    pub fn reason(&self) -> &ReportReason {
        match self {
            ReportedTarget::Post { report_reason, .. }
            | ReportedTarget::Comment { report_reason, .. } => report_reason,
        }
    }

    /// Name of the target type, as used in event payloads and stats
    pub fn type_name(&self) -> &'static str {
        match self {
            ReportedTarget::Post { .. } => "Post",
            ReportedTarget::Comment { .. } => "Comment",
        }
    }
}

impl ReportStatus {
    /// Corresponding status string
    pub fn as_string(&self) -> ReportStatusString {
        match self {
            ReportStatus::Pending {} => ReportStatusString::Pending,
            ReportStatus::Reviewed {} => ReportStatusString::Reviewed,
            ReportStatus::Resolved { .. } => ReportStatusString::Resolved,
            ReportStatus::Dismissed { .. } => ReportStatusString::Dismissed,
        }
    }

    /// Whether this report still needs moderator attention
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            ReportStatus::Pending {} | ReportStatus::Reviewed {}
        )
    }
}

impl ReportStatusString {
    /// Name of the status, as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatusString::Pending => "Pending",
            ReportStatusString::Reviewed => "Reviewed",
            ReportStatusString::Resolved => "Resolved",
            ReportStatusString::Dismissed => "Dismissed",
        }
    }
}
