use serde::{Deserialize, Serialize};

/// A message shown to a single user, typically a moderation outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier
    pub id: String,

    /// The user this notification belongs to
    pub user_id: String,

    /// Short headline
    pub title: String,

    /// Full message body
    pub message: String,

    /// Whether the user has opened the notification feed since delivery
    pub is_read: bool,

    /// When the notification was created (UNIX millis)
    pub created_at: i64,
}
