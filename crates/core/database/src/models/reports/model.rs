use std::collections::HashMap;

use iso8601_timestamp::Timestamp;

use quill_models::v0::{
    RemovedItemSnippet, ReportSnippet, ReportStatus, ReportStatusString, ReportedTarget,
};
use quill_result::Result;

use crate::events::client::EventV1;
use crate::events::sink::Sink;
use crate::{Comment, Database, PartialComment, PartialPost, Post, User};

/// Notes recorded when a moderator removes content without leaving any
pub static DEFAULT_REMOVAL_NOTES: &str = "Removed for violating community guidelines";

/// Reason string shown to the owner of removed content
static OWNER_FACING_REASON: &str = "Your content was reported and removed by a moderator";

/// Length body text is cut down to inside event payloads
const SNIPPET_LENGTH: usize = 200;

auto_derived_partial!(
    /// User-submitted report against a post or comment
    pub struct Report {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Id of the user who created this report; immutable
        pub author_id: String,
        /// Reported content
        pub target: ReportedTarget,
        /// Additional description provided by the reporter
        #[serde(default)]
        pub description: String,
        /// Status of the report
        #[serde(flatten)]
        pub status: ReportStatus,
        /// Notes left by the moderator who handled this report
        #[serde(default)]
        pub notes: String,

        /// Whether this report was soft-deleted
        #[serde(skip_serializing_if = "crate::if_false", default)]
        pub is_deleted: bool,
        /// When this report was soft-deleted
        #[serde(skip_serializing_if = "Option::is_none")]
        pub deleted_at: Option<Timestamp>,
    },
    "PartialReport"
);

auto_derived!(
    /// Optional fields on report
    pub enum FieldsReport {
        ResolvedBy,
        ResolvedAt,
        DeletedAt,
    }

    /// Content taken down by a moderation action
    #[serde(tag = "item_type")]
    pub enum RemovedContent {
        Post(Post),
        Comment(Comment),
    }

    /// Report paired with the identity of the user who filed it
    pub struct ReportWithReporter {
        /// The report itself
        #[serde(flatten)]
        pub report: Report,
        /// Username of the reporting user
        pub author_username: String,
    }
);

impl RemovedContent {
    /// Id of the removed item
    pub fn id(&self) -> &str {
        match self {
            RemovedContent::Post(post) => &post.id,
            RemovedContent::Comment(comment) => &comment.id,
        }
    }

    /// Id of the user who owns the removed item
    pub fn owner_id(&self) -> &str {
        match self {
            RemovedContent::Post(post) => &post.author_id,
            RemovedContent::Comment(comment) => &comment.author_id,
        }
    }

    /// Name of the item type, as used in event payloads
    pub fn type_name(&self) -> &'static str {
        match self {
            RemovedContent::Post(_) => "Post",
            RemovedContent::Comment(_) => "Comment",
        }
    }

    /// Title shown in event payloads
    ///
    /// Comments have no title, so a cut-down body stands in for one.
    pub fn title(&self) -> String {
        match self {
            RemovedContent::Post(post) => substitute_empty(&post.title),
            RemovedContent::Comment(comment) => substitute_empty(truncate(&comment.content)),
        }
    }

    /// Condensed shape for the moderator-facing event
    pub fn snippet(&self) -> RemovedItemSnippet {
        let body = match self {
            RemovedContent::Post(post) => &post.content,
            RemovedContent::Comment(comment) => &comment.content,
        };

        RemovedItemSnippet {
            id: self.id().to_string(),
            title: self.title(),
            content: substitute_empty(truncate(body)),
        }
    }
}

/// Cut a body down to at most SNIPPET_LENGTH characters
fn truncate(body: &str) -> &str {
    match body.char_indices().nth(SNIPPET_LENGTH) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

/// Substitute a placeholder for empty content
fn substitute_empty(text: &str) -> String {
    if text.is_empty() {
        "(no content)".to_string()
    } else {
        text.to_string()
    }
}

impl Report {
    /// Create a new report against a post or comment
    ///
    /// The target must exist, must not belong to the reporter or to a
    /// moderator, and must not already have an open report from the
    /// same user. Connected moderators are notified on success; the
    /// notification is best-effort and never fails the write.
    pub async fn create(
        db: &Database,
        sink: &dyn Sink,
        author: &User,
        target: ReportedTarget,
        description: String,
    ) -> Result<Report> {
        // Resolve the reported content and its owner
        let owner_id = match &target {
            ReportedTarget::Post { id, .. } => {
                let post = db.fetch_post(id).await?;
                if post.removed_by_admin {
                    return Err(create_error!(NotFound));
                }

                post.author_id
            }
            ReportedTarget::Comment { id, .. } => {
                let comment = db.fetch_comment(id).await?;
                if comment.is_deleted {
                    return Err(create_error!(NotFound));
                }

                comment.author_id
            }
        };

        // Users cannot report their own content
        if owner_id == author.id {
            return Err(create_error!(CannotReportYourself));
        }

        // Moderator content is not reportable through this path
        let owner = db.fetch_user(&owner_id).await?;
        if owner.privileged {
            return Err(create_error!(CannotReportPrivileged));
        }

        // Reject a second open report on the same content
        if db
            .fetch_open_report_by_target(&author.id, &target)
            .await?
            .is_some()
        {
            return Err(create_error!(DuplicateReport));
        }

        let report = Report {
            id: ulid::Ulid::new().to_string(),
            author_id: author.id.to_string(),
            target,
            description,
            status: ReportStatus::Pending {},
            notes: String::new(),
            is_deleted: false,
            deleted_at: None,
        };

        db.insert_report(&report).await?;

        EventV1::NewReport {
            report: report.clone(),
            message: format!(
                "{} reported a {}",
                author.username,
                report.target.type_name().to_lowercase()
            ),
            timestamp: Timestamp::now_utc(),
        }
        .admins(sink)
        .await;

        Ok(report)
    }

    /// Update this report
    pub async fn update(
        &mut self,
        db: &Database,
        partial: PartialReport,
        remove: Vec<FieldsReport>,
    ) -> Result<()> {
        db.update_report(&self.id, &partial, remove.clone()).await?;

        for field in &remove {
            self.remove_field(field);
        }

        self.apply_options(partial);
        Ok(())
    }

    /// Remove a field from this report
    pub fn remove_field(&mut self, field: &FieldsReport) {
        match field {
            // Resolution stamps live inside the status variants;
            // applying the replacement status already discards them.
            FieldsReport::ResolvedBy | FieldsReport::ResolvedAt => {}
            FieldsReport::DeletedAt => self.deleted_at = None,
        }
    }

    /// Move this report to a new status
    ///
    /// Transitions are deliberately permissive: a dismissed report may
    /// be re-opened. Entering a terminal status stamps the acting
    /// moderator and time; leaving one discards the stamps.
    pub async fn update_status(
        &mut self,
        db: &Database,
        moderator: &User,
        status: ReportStatusString,
        notes: Option<String>,
    ) -> Result<()> {
        let status = match status {
            ReportStatusString::Pending => ReportStatus::Pending {},
            ReportStatusString::Reviewed => ReportStatus::Reviewed {},
            ReportStatusString::Resolved => ReportStatus::Resolved {
                resolved_by: moderator.id.to_string(),
                resolved_at: Timestamp::now_utc(),
            },
            ReportStatusString::Dismissed => ReportStatus::Dismissed {
                resolved_by: moderator.id.to_string(),
                resolved_at: Timestamp::now_utc(),
            },
        };

        let remove = if status.is_open() {
            vec![FieldsReport::ResolvedBy, FieldsReport::ResolvedAt]
        } else {
            vec![]
        };

        self.update(
            db,
            PartialReport {
                status: Some(status),
                notes,
                ..Default::default()
            },
            remove,
        )
        .await
    }

    /// Soft-delete this report
    pub async fn delete(&mut self, db: &Database) -> Result<()> {
        self.update(
            db,
            PartialReport {
                is_deleted: Some(true),
                deleted_at: Some(Timestamp::now_utc()),
                ..Default::default()
            },
            vec![],
        )
        .await
    }

    /// Restore a previously soft-deleted report
    pub async fn restore(&mut self, db: &Database) -> Result<()> {
        if !self.is_deleted {
            return Err(create_error!(NotDeleted));
        }

        self.update(
            db,
            PartialReport {
                is_deleted: Some(false),
                ..Default::default()
            },
            vec![FieldsReport::DeletedAt],
        )
        .await
    }

    /// Remove the reported content from the community and resolve
    /// this report
    ///
    /// The content mutation is committed first, then the report
    /// resolution, then both audiences are notified. A crash between
    /// the two writes leaves a still-open report pointing at removed
    /// content, which a moderator can see and close; fan-out failures
    /// never affect either write.
    pub async fn remove_content(
        &mut self,
        db: &Database,
        sink: &dyn Sink,
        moderator: &User,
        notes: Option<String>,
    ) -> Result<RemovedContent> {
        let notes = notes.unwrap_or_else(|| DEFAULT_REMOVAL_NOTES.to_string());
        let removed_at = Timestamp::now_utc();

        let removed = match &self.target {
            ReportedTarget::Post { id, .. } => {
                let mut post = db.fetch_post(id).await?;
                let partial = PartialPost {
                    is_public: Some(false),
                    removed_by_admin: Some(true),
                    admin_removal_notes: Some(notes.clone()),
                    removed_at: Some(removed_at),
                    ..Default::default()
                };

                db.update_post(id, &partial).await?;
                post.apply_options(partial);
                RemovedContent::Post(post)
            }
            ReportedTarget::Comment { id, .. } => {
                let mut comment = db.fetch_comment(id).await?;
                let partial = PartialComment {
                    is_deleted: Some(true),
                    deleted_by_admin: Some(true),
                    admin_removal_notes: Some(notes.clone()),
                    deleted_at: Some(removed_at),
                    ..Default::default()
                };

                db.update_comment(id, &partial).await?;
                comment.apply_options(partial);
                RemovedContent::Comment(comment)
            }
        };

        self.update(
            db,
            PartialReport {
                status: Some(ReportStatus::Resolved {
                    resolved_by: moderator.id.to_string(),
                    resolved_at: removed_at,
                }),
                notes: Some(notes.clone()),
                ..Default::default()
            },
            vec![],
        )
        .await?;

        EventV1::ItemRemoved {
            item_type: removed.type_name().to_string(),
            item_title: removed.title(),
            reason: OWNER_FACING_REASON.to_string(),
            admin_notes: notes.clone(),
            timestamp: removed_at,
        }
        .private(sink, removed.owner_id())
        .await;

        EventV1::ItemRemovedAdmin {
            report: self.snippet(),
            removed_item: removed.snippet(),
            message: format!(
                "{} removed a reported {} from the community",
                moderator.username,
                removed.type_name().to_lowercase()
            ),
            timestamp: removed_at,
        }
        .admins(sink)
        .await;

        Ok(removed)
    }

    /// Attach reporter usernames to a page of reports
    pub async fn with_reporters(
        db: &Database,
        reports: Vec<Report>,
    ) -> Vec<ReportWithReporter> {
        let mut usernames: HashMap<String, String> = HashMap::new();
        let mut entries = Vec::with_capacity(reports.len());

        for report in reports {
            let author_username = match usernames.get(&report.author_id) {
                Some(username) => username.clone(),
                None => {
                    // A reporter's account may no longer exist
                    let username = db
                        .fetch_user(&report.author_id)
                        .await
                        .map(|user| user.username)
                        .unwrap_or_default();

                    usernames.insert(report.author_id.clone(), username.clone());
                    username
                }
            };

            entries.push(ReportWithReporter {
                report,
                author_username,
            });
        }

        entries
    }

    /// Condensed shape for the moderator-facing event
    pub fn snippet(&self) -> ReportSnippet {
        ReportSnippet {
            id: self.id.to_string(),
            item_type: self.target.type_name().to_string(),
            reason: self.target.reason().clone(),
            description: self.description.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use quill_models::v0::{ReportReason, ReportStatus, ReportStatusString, ReportedTarget};
    use quill_result::ErrorType;

    use crate::events::client::{EventV1, ADMIN_TOPIC};
    use crate::events::sink::{Memory, Noop};
    use crate::{Comment, Database, Post, RemovedContent, Report, User, DEFAULT_REMOVAL_NOTES};

    async fn seed_user(db: &Database, id: &str, privileged: bool) -> User {
        let user = User {
            id: id.to_string(),
            username: id.to_string(),
            privileged,
            token: Some(format!("token_{id}")),
        };

        db.insert_user(&user).await.unwrap();
        user
    }

    async fn seed_post(db: &Database, id: &str, author_id: &str) -> Post {
        let post = Post {
            id: id.to_string(),
            author_id: author_id.to_string(),
            title: format!("title of {id}"),
            content: format!("content of {id}"),
            is_public: true,
            removed_by_admin: false,
            admin_removal_notes: None,
            removed_at: None,
        };

        db.insert_post(&post).await.unwrap();
        post
    }

    async fn seed_comment(db: &Database, id: &str, author_id: &str, is_deleted: bool) -> Comment {
        let comment = Comment {
            id: id.to_string(),
            author_id: author_id.to_string(),
            post_id: "post".to_string(),
            content: format!("comment body of {id}"),
            is_deleted,
            deleted_by_admin: false,
            admin_removal_notes: None,
            deleted_at: None,
        };

        db.insert_comment(&comment).await.unwrap();
        comment
    }

    fn post_target(id: &str, report_reason: ReportReason) -> ReportedTarget {
        ReportedTarget::Post {
            id: id.to_string(),
            report_reason,
        }
    }

    #[async_std::test]
    async fn create_report_notifies_admins() {
        database_test!(|db| async move {
            let sink = Memory::default();
            let alice = seed_user(&db, "alice", false).await;
            seed_user(&db, "bob", false).await;
            seed_post(&db, "post", "bob").await;

            let report = Report::create(
                &db,
                &sink,
                &alice,
                post_target("post", ReportReason::Spam),
                "it's spam".to_string(),
            )
            .await
            .unwrap();

            assert!(matches!(report.status, ReportStatus::Pending {}));
            assert_eq!(report.author_id, "alice");
            assert_eq!(db.fetch_report(&report.id).await.unwrap(), report);

            let events = sink.on_topic(ADMIN_TOPIC).await;
            assert_eq!(events.len(), 1);
            match &events[0] {
                EventV1::NewReport {
                    report: event_report,
                    message,
                    ..
                } => {
                    assert_eq!(event_report, &report);
                    assert_eq!(message, "alice reported a post");
                }
                event => panic!("unexpected event: {event:?}"),
            }
        });
    }

    #[async_std::test]
    async fn create_report_rejects_invalid_targets() {
        database_test!(|db| async move {
            let sink = Memory::default();
            let alice = seed_user(&db, "alice", false).await;
            seed_user(&db, "moderator", true).await;
            seed_post(&db, "own_post", "alice").await;
            seed_post(&db, "moderator_post", "moderator").await;
            seed_comment(&db, "gone", "moderator", true).await;

            let error = Report::create(
                &db,
                &sink,
                &alice,
                post_target("own_post", ReportReason::Spam),
                String::new(),
            )
            .await
            .unwrap_err();
            assert!(matches!(error.error_type, ErrorType::CannotReportYourself));

            let error = Report::create(
                &db,
                &sink,
                &alice,
                post_target("moderator_post", ReportReason::Harassment),
                String::new(),
            )
            .await
            .unwrap_err();
            assert!(matches!(
                error.error_type,
                ErrorType::CannotReportPrivileged
            ));

            let error = Report::create(
                &db,
                &sink,
                &alice,
                post_target("missing", ReportReason::Spam),
                String::new(),
            )
            .await
            .unwrap_err();
            assert!(matches!(error.error_type, ErrorType::NotFound));

            // Soft-deleted comments are no longer reportable
            let error = Report::create(
                &db,
                &sink,
                &alice,
                ReportedTarget::Comment {
                    id: "gone".to_string(),
                    report_reason: ReportReason::Other,
                },
                String::new(),
            )
            .await
            .unwrap_err();
            assert!(matches!(error.error_type, ErrorType::NotFound));

            // None of the rejections reached the admin audience
            assert!(sink.is_empty().await);
        });
    }

    #[async_std::test]
    async fn duplicate_open_report_rejected_until_closed() {
        database_test!(|db| async move {
            let sink = Memory::default();
            let alice = seed_user(&db, "alice", false).await;
            let moderator = seed_user(&db, "moderator", true).await;
            seed_user(&db, "bob", false).await;
            seed_post(&db, "post", "bob").await;

            let mut report = Report::create(
                &db,
                &sink,
                &alice,
                post_target("post", ReportReason::Spam),
                String::new(),
            )
            .await
            .unwrap();

            let error = Report::create(
                &db,
                &sink,
                &alice,
                post_target("post", ReportReason::Harassment),
                String::new(),
            )
            .await
            .unwrap_err();
            assert!(matches!(error.error_type, ErrorType::DuplicateReport));

            // Once the first report is closed, the same user may
            // report the same content again
            report
                .update_status(&db, &moderator, ReportStatusString::Dismissed, None)
                .await
                .unwrap();

            Report::create(
                &db,
                &sink,
                &alice,
                post_target("post", ReportReason::Harassment),
                String::new(),
            )
            .await
            .unwrap();
        });
    }

    #[async_std::test]
    async fn status_lifecycle_stamps_resolution() {
        database_test!(|db| async move {
            let sink = Memory::default();
            let alice = seed_user(&db, "alice", false).await;
            let moderator = seed_user(&db, "moderator", true).await;
            seed_user(&db, "bob", false).await;
            seed_post(&db, "post", "bob").await;

            let mut report = Report::create(
                &db,
                &sink,
                &alice,
                post_target("post", ReportReason::FakeNews),
                String::new(),
            )
            .await
            .unwrap();

            report
                .update_status(
                    &db,
                    &moderator,
                    ReportStatusString::Resolved,
                    Some("handled".to_string()),
                )
                .await
                .unwrap();

            match &report.status {
                ReportStatus::Resolved { resolved_by, .. } => {
                    assert_eq!(resolved_by, "moderator")
                }
                status => panic!("unexpected status: {status:?}"),
            }

            assert_eq!(report.notes, "handled");
            assert_eq!(db.fetch_report(&report.id).await.unwrap(), report);

            // Re-opening discards the resolution stamps
            report
                .update_status(&db, &moderator, ReportStatusString::Pending, None)
                .await
                .unwrap();

            assert!(matches!(report.status, ReportStatus::Pending {}));
            assert_eq!(db.fetch_report(&report.id).await.unwrap(), report);
        });
    }

    #[async_std::test]
    async fn soft_delete_and_restore() {
        database_test!(|db| async move {
            let sink = Memory::default();
            let alice = seed_user(&db, "alice", false).await;
            seed_user(&db, "bob", false).await;
            seed_post(&db, "post", "bob").await;

            let mut report = Report::create(
                &db,
                &sink,
                &alice,
                post_target("post", ReportReason::Spam),
                String::new(),
            )
            .await
            .unwrap();

            let error = report.restore(&db).await.unwrap_err();
            assert!(matches!(error.error_type, ErrorType::NotDeleted));

            report.delete(&db).await.unwrap();
            assert!(report.is_deleted);
            assert!(report.deleted_at.is_some());
            assert_eq!(db.fetch_report(&report.id).await.unwrap(), report);

            report.restore(&db).await.unwrap();
            assert!(!report.is_deleted);
            assert!(report.deleted_at.is_none());
            assert_eq!(db.fetch_report(&report.id).await.unwrap(), report);
        });
    }

    #[async_std::test]
    async fn remove_post_resolves_report_and_notifies_both_audiences() {
        database_test!(|db| async move {
            let sink = Memory::default();
            let alice = seed_user(&db, "alice", false).await;
            let moderator = seed_user(&db, "moderator", true).await;
            seed_user(&db, "bob", false).await;
            seed_post(&db, "post", "bob").await;

            let mut report = Report::create(
                &db,
                &sink,
                &alice,
                post_target("post", ReportReason::Violence),
                "graphic".to_string(),
            )
            .await
            .unwrap();

            let removed = report
                .remove_content(&db, &sink, &moderator, None)
                .await
                .unwrap();

            assert!(matches!(&removed, RemovedContent::Post(_)));
            assert_eq!(removed.id(), "post");
            assert_eq!(removed.owner_id(), "bob");

            let post = db.fetch_post("post").await.unwrap();
            assert!(!post.is_public);
            assert!(post.removed_by_admin);
            assert_eq!(
                post.admin_removal_notes.as_deref(),
                Some(DEFAULT_REMOVAL_NOTES)
            );
            assert!(post.removed_at.is_some());

            let report = db.fetch_report(&report.id).await.unwrap();
            match &report.status {
                ReportStatus::Resolved { resolved_by, .. } => {
                    assert_eq!(resolved_by, "moderator")
                }
                status => panic!("unexpected status: {status:?}"),
            }
            assert_eq!(report.notes, DEFAULT_REMOVAL_NOTES);

            // The owner hears about it on their private topic
            let events = sink.on_topic("bob!").await;
            assert_eq!(events.len(), 1);
            match &events[0] {
                EventV1::ItemRemoved {
                    item_type,
                    item_title,
                    admin_notes,
                    ..
                } => {
                    assert_eq!(item_type, "Post");
                    assert_eq!(item_title, "title of post");
                    assert_eq!(admin_notes, DEFAULT_REMOVAL_NOTES);
                }
                event => panic!("unexpected event: {event:?}"),
            }

            // Admins get the original report plus the removal summary
            let events = sink.on_topic(ADMIN_TOPIC).await;
            assert_eq!(events.len(), 2);
            match &events[1] {
                EventV1::ItemRemovedAdmin {
                    report: snippet,
                    removed_item,
                    message,
                    ..
                } => {
                    assert_eq!(snippet.id, report.id);
                    assert_eq!(removed_item.id, "post");
                    assert_eq!(
                        message,
                        "moderator removed a reported post from the community"
                    );
                }
                event => panic!("unexpected event: {event:?}"),
            }
        });
    }

    #[async_std::test]
    async fn remove_comment_soft_deletes_with_custom_notes() {
        database_test!(|db| async move {
            let sink = Memory::default();
            let alice = seed_user(&db, "alice", false).await;
            let moderator = seed_user(&db, "moderator", true).await;
            seed_user(&db, "bob", false).await;
            seed_comment(&db, "comment", "bob", false).await;

            let mut report = Report::create(
                &db,
                &sink,
                &alice,
                ReportedTarget::Comment {
                    id: "comment".to_string(),
                    report_reason: ReportReason::Harassment,
                },
                String::new(),
            )
            .await
            .unwrap();

            report
                .remove_content(&db, &sink, &moderator, Some("targeted abuse".to_string()))
                .await
                .unwrap();

            let comment = db.fetch_comment("comment").await.unwrap();
            assert!(comment.is_deleted);
            assert!(comment.deleted_by_admin);
            assert_eq!(comment.admin_removal_notes.as_deref(), Some("targeted abuse"));
            assert!(comment.deleted_at.is_some());

            let events = sink.on_topic("bob!").await;
            assert_eq!(events.len(), 1);
            match &events[0] {
                EventV1::ItemRemoved {
                    item_type,
                    item_title,
                    admin_notes,
                    ..
                } => {
                    assert_eq!(item_type, "Comment");
                    assert_eq!(item_title, "comment body of comment");
                    assert_eq!(admin_notes, "targeted abuse");
                }
                event => panic!("unexpected event: {event:?}"),
            }
        });
    }

    #[async_std::test]
    async fn dead_sink_never_fails_the_write() {
        database_test!(|db| async move {
            let alice = seed_user(&db, "alice", false).await;
            let moderator = seed_user(&db, "moderator", true).await;
            seed_user(&db, "bob", false).await;
            seed_post(&db, "post", "bob").await;

            let mut report = Report::create(
                &db,
                &Noop,
                &alice,
                post_target("post", ReportReason::Spam),
                String::new(),
            )
            .await
            .unwrap();

            report
                .remove_content(&db, &Noop, &moderator, None)
                .await
                .unwrap();

            assert!(!db.fetch_post("post").await.unwrap().is_public);
            assert!(matches!(
                db.fetch_report(&report.id).await.unwrap().status,
                ReportStatus::Resolved { .. }
            ));
        });
    }

    #[async_std::test]
    async fn fetch_reports_filters_and_paginates() {
        database_test!(|db| async move {
            let sink = Memory::default();
            let alice = seed_user(&db, "alice", false).await;
            let carol = seed_user(&db, "carol", false).await;
            let moderator = seed_user(&db, "moderator", true).await;
            seed_user(&db, "bob", false).await;
            seed_post(&db, "post_a", "bob").await;
            seed_post(&db, "post_b", "bob").await;
            seed_comment(&db, "comment", "bob", false).await;

            let mut resolved = Report::create(
                &db,
                &sink,
                &alice,
                post_target("post_a", ReportReason::Spam),
                String::new(),
            )
            .await
            .unwrap();

            Report::create(
                &db,
                &sink,
                &alice,
                post_target("post_b", ReportReason::Copyright),
                String::new(),
            )
            .await
            .unwrap();

            Report::create(
                &db,
                &sink,
                &carol,
                ReportedTarget::Comment {
                    id: "comment".to_string(),
                    report_reason: ReportReason::Inappropriate,
                },
                String::new(),
            )
            .await
            .unwrap();

            resolved
                .update_status(&db, &moderator, ReportStatusString::Resolved, None)
                .await
                .unwrap();

            let all = db.fetch_reports(None, None, None, None, 0).await.unwrap();
            assert_eq!(all.len(), 3);

            let pending = db
                .fetch_reports(Some(&ReportStatusString::Pending), None, None, None, 0)
                .await
                .unwrap();
            assert_eq!(pending.len(), 2);

            let resolved_page = db
                .fetch_reports(Some(&ReportStatusString::Resolved), None, None, None, 0)
                .await
                .unwrap();
            assert_eq!(resolved_page.len(), 1);
            assert_eq!(resolved_page[0].id, resolved.id);

            let comments = db
                .fetch_reports(None, Some("Comment"), None, None, 0)
                .await
                .unwrap();
            assert_eq!(comments.len(), 1);
            assert_eq!(comments[0].author_id, "carol");

            let by_alice = db
                .fetch_reports(None, None, Some("alice"), None, 0)
                .await
                .unwrap();
            assert_eq!(by_alice.len(), 2);

            // Pages are disjoint and together cover everything
            let first = db.fetch_reports(None, None, None, None, 2).await.unwrap();
            assert_eq!(first.len(), 2);

            let second = db
                .fetch_reports(None, None, None, Some(&first[1].id), 2)
                .await
                .unwrap();
            assert_eq!(second.len(), 1);

            let mut seen: HashSet<String> =
                first.into_iter().map(|report| report.id).collect();
            seen.extend(second.into_iter().map(|report| report.id));
            assert_eq!(seen.len(), 3);
        });
    }

    #[async_std::test]
    async fn report_stats_exclude_soft_deleted() {
        database_test!(|db| async move {
            let sink = Memory::default();
            let alice = seed_user(&db, "alice", false).await;
            let carol = seed_user(&db, "carol", false).await;
            let moderator = seed_user(&db, "moderator", true).await;
            seed_user(&db, "bob", false).await;
            seed_post(&db, "post", "bob").await;
            seed_comment(&db, "comment", "bob", false).await;

            let mut resolved = Report::create(
                &db,
                &sink,
                &alice,
                post_target("post", ReportReason::Spam),
                String::new(),
            )
            .await
            .unwrap();

            let mut deleted = Report::create(
                &db,
                &sink,
                &carol,
                post_target("post", ReportReason::Spam),
                String::new(),
            )
            .await
            .unwrap();

            Report::create(
                &db,
                &sink,
                &alice,
                ReportedTarget::Comment {
                    id: "comment".to_string(),
                    report_reason: ReportReason::Harassment,
                },
                String::new(),
            )
            .await
            .unwrap();

            resolved
                .update_status(&db, &moderator, ReportStatusString::Resolved, None)
                .await
                .unwrap();
            deleted.delete(&db).await.unwrap();

            let stats = db.generate_report_stats().await.unwrap();
            assert_eq!(stats.status.get("Pending"), Some(&1));
            assert_eq!(stats.status.get("Resolved"), Some(&1));
            assert_eq!(stats.status.get("Dismissed"), Some(&0));
            assert_eq!(stats.targets.get("Post"), Some(&1));
            assert_eq!(stats.targets.get("Comment"), Some(&1));
            assert_eq!(stats.reasons.get("spam"), Some(&1));
            assert_eq!(stats.reasons.get("harassment"), Some(&1));
            assert_eq!(stats.past_week, 2);
        });
    }

    #[async_std::test]
    async fn removed_post_is_not_reportable() {
        database_test!(|db| async move {
            let sink = Memory::default();
            let alice = seed_user(&db, "alice", false).await;
            let carol = seed_user(&db, "carol", false).await;
            let moderator = seed_user(&db, "moderator", true).await;
            seed_user(&db, "bob", false).await;
            seed_post(&db, "post", "bob").await;

            let mut report = Report::create(
                &db,
                &sink,
                &carol,
                post_target("post", ReportReason::Spam),
                String::new(),
            )
            .await
            .unwrap();

            report
                .remove_content(&db, &sink, &moderator, None)
                .await
                .unwrap();

            // Content already taken down can no longer be reported
            let error = Report::create(
                &db,
                &sink,
                &alice,
                post_target("post", ReportReason::Spam),
                String::new(),
            )
            .await
            .unwrap_err();
            assert!(matches!(error.error_type, ErrorType::NotFound));
        });
    }

    #[async_std::test]
    async fn repeat_removal_restamps_resolution() {
        database_test!(|db| async move {
            let sink = Memory::default();
            let alice = seed_user(&db, "alice", false).await;
            let carol = seed_user(&db, "carol", false).await;
            let moderator = seed_user(&db, "moderator", true).await;
            seed_user(&db, "bob", false).await;
            seed_post(&db, "post", "bob").await;

            let mut first = Report::create(
                &db,
                &sink,
                &alice,
                post_target("post", ReportReason::Spam),
                String::new(),
            )
            .await
            .unwrap();

            let mut second = Report::create(
                &db,
                &sink,
                &carol,
                post_target("post", ReportReason::Violence),
                String::new(),
            )
            .await
            .unwrap();

            first
                .remove_content(&db, &sink, &moderator, None)
                .await
                .unwrap();

            // Acting on a second report against the same content
            // succeeds and re-stamps the removal
            second
                .remove_content(&db, &sink, &moderator, Some("second review".to_string()))
                .await
                .unwrap();

            let post = db.fetch_post("post").await.unwrap();
            assert!(post.removed_by_admin);
            assert_eq!(post.admin_removal_notes.as_deref(), Some("second review"));

            let stored = db.fetch_report(&second.id).await.unwrap();
            assert!(matches!(stored.status, ReportStatus::Resolved { .. }));
            assert_eq!(stored.notes, "second review");

            // The owner heard about both removals
            assert_eq!(sink.on_topic("bob!").await.len(), 2);
        });
    }

    #[async_std::test]
    async fn removal_of_missing_content_leaves_report_open() {
        database_test!(|db| async move {
            let sink = Memory::default();
            seed_user(&db, "alice", false).await;
            let moderator = seed_user(&db, "moderator", true).await;

            // A report whose content has since vanished entirely
            let report = Report {
                id: ulid::Ulid::new().to_string(),
                author_id: "alice".to_string(),
                target: post_target("ghost", ReportReason::Spam),
                description: String::new(),
                status: ReportStatus::Pending {},
                notes: String::new(),
                is_deleted: false,
                deleted_at: None,
            };
            db.insert_report(&report).await.unwrap();

            let mut report = db.fetch_report(&report.id).await.unwrap();
            let error = report
                .remove_content(&db, &sink, &moderator, None)
                .await
                .unwrap_err();
            assert!(matches!(error.error_type, ErrorType::NotFound));

            // The report is untouched and nobody was notified
            let stored = db.fetch_report(&report.id).await.unwrap();
            assert!(matches!(stored.status, ReportStatus::Pending {}));
            assert!(stored.notes.is_empty());
            assert!(sink.is_empty().await);
        });
    }

    #[async_std::test]
    async fn listing_pairs_reports_with_reporter_identity() {
        database_test!(|db| async move {
            let sink = Memory::default();
            let alice = seed_user(&db, "alice", false).await;
            let carol = seed_user(&db, "carol", false).await;
            seed_user(&db, "bob", false).await;
            seed_post(&db, "post_a", "bob").await;
            seed_post(&db, "post_b", "bob").await;

            Report::create(
                &db,
                &sink,
                &alice,
                post_target("post_a", ReportReason::Spam),
                String::new(),
            )
            .await
            .unwrap();

            Report::create(
                &db,
                &sink,
                &alice,
                post_target("post_b", ReportReason::Spam),
                String::new(),
            )
            .await
            .unwrap();

            Report::create(
                &db,
                &sink,
                &carol,
                post_target("post_a", ReportReason::Harassment),
                String::new(),
            )
            .await
            .unwrap();

            let reports = db.fetch_reports(None, None, None, None, 0).await.unwrap();
            let entries = Report::with_reporters(&db, reports).await;
            assert_eq!(entries.len(), 3);

            // Seeded usernames match their ids
            for entry in &entries {
                assert_eq!(entry.author_username, entry.report.author_id);
            }
        });
    }

    #[test]
    fn report_serialises_with_flattened_status() {
        let report = Report {
            id: "01H455MJJBCAJ4ZZ5ZVQZ5ZZZZ".to_string(),
            author_id: "alice".to_string(),
            target: ReportedTarget::Post {
                id: "post".to_string(),
                report_reason: ReportReason::Spam,
            },
            description: String::new(),
            status: ReportStatus::Resolved {
                resolved_by: "moderator".to_string(),
                resolved_at: iso8601_timestamp::Timestamp::UNIX_EPOCH,
            },
            notes: String::new(),
            is_deleted: false,
            deleted_at: None,
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["status"], "Resolved");
        assert_eq!(value["resolved_by"], "moderator");
        assert_eq!(value["target"]["type"], "Post");
        assert_eq!(value["target"]["report_reason"], "spam");
    }
}
