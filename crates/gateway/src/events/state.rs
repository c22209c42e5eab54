use std::collections::HashSet;

use quill_database::events::client::ADMIN_TOPIC;
use quill_database::User;

/// Enumeration representing some change in subscriptions
pub enum SubscriptionStateChange {
    /// No change
    None,
    /// Clear all subscriptions
    Reset,
    /// Append or remove subscriptions
    Change {
        add: Vec<String>,
        remove: Vec<String>,
    },
}

/// Client session state
///
/// Audience membership lives here and nowhere else, so it dies with
/// the connection.
pub struct State {
    pub user_id: String,
    pub privileged: bool,

    private_topic: String,
    state: SubscriptionStateChange,
    subscribed: HashSet<String>,
}

impl State {
    /// Create state from an authenticated user
    pub fn from(user: &User) -> State {
        State {
            user_id: user.id.clone(),
            privileged: user.privileged,
            private_topic: format!("{}!", user.id),
            state: SubscriptionStateChange::None,
            subscribed: HashSet::new(),
        }
    }

    /// Join the admin audience
    ///
    /// Returns whether the subscription is new.
    pub fn join_admin(&mut self) -> bool {
        self.insert_subscription(ADMIN_TOPIC.to_string())
    }

    /// Join this user's own audience
    ///
    /// Returns whether the subscription is new.
    pub fn join_user(&mut self) -> bool {
        self.insert_subscription(self.private_topic.clone())
    }

    /// Queue up a new subscription
    fn insert_subscription(&mut self, topic: String) -> bool {
        if !self.subscribed.insert(topic.clone()) {
            return false;
        }

        match &mut self.state {
            SubscriptionStateChange::None => {
                self.state = SubscriptionStateChange::Change {
                    add: vec![topic],
                    remove: vec![],
                };
            }
            SubscriptionStateChange::Change { add, .. } => add.push(topic),
            SubscriptionStateChange::Reset => {}
        }

        true
    }

    /// Take the currently queued state change
    pub fn apply_state(&mut self) -> SubscriptionStateChange {
        std::mem::replace(&mut self.state, SubscriptionStateChange::None)
    }

    /// Topics this session is currently subscribed to
    pub fn iter_subscriptions(&self) -> impl Iterator<Item = &String> {
        self.subscribed.iter()
    }
}

#[cfg(test)]
mod tests {
    use quill_database::events::client::ADMIN_TOPIC;
    use quill_database::User;

    use super::{State, SubscriptionStateChange};

    fn user(id: &str, privileged: bool) -> User {
        User {
            id: id.to_string(),
            username: id.to_string(),
            privileged,
            token: None,
        }
    }

    #[test]
    fn starts_with_no_subscriptions() {
        let mut state = State::from(&user("alice", false));
        assert_eq!(state.iter_subscriptions().count(), 0);
        assert!(matches!(state.apply_state(), SubscriptionStateChange::None));
    }

    #[test]
    fn joins_are_idempotent() {
        let mut state = State::from(&user("alice", true));
        assert!(state.join_admin());
        assert!(!state.join_admin());
        assert!(state.join_user());
        assert!(!state.join_user());
        assert_eq!(state.iter_subscriptions().count(), 2);
    }

    #[test]
    fn queued_changes_drain_on_apply() {
        let mut state = State::from(&user("alice", false));
        state.join_user();

        match state.apply_state() {
            SubscriptionStateChange::Change { add, remove } => {
                assert_eq!(add, vec!["alice!".to_string()]);
                assert!(remove.is_empty());
            }
            _ => panic!("expected a change"),
        }

        assert!(matches!(state.apply_state(), SubscriptionStateChange::None));
    }

    #[test]
    fn admin_topic_is_shared() {
        let mut state = State::from(&user("moderator", true));
        state.join_admin();
        assert!(state
            .iter_subscriptions()
            .any(|topic| topic == ADMIN_TOPIC));
    }
}
