use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Category;

/// One entry in the append-only feedback log
///
/// Records are only ever inserted; nothing updates or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserFeedbackRecord {
    pub user_id: String,
    pub place_id: String,
    pub liked: bool,
    pub category: Category,
    pub timestamp: DateTime<Utc>,
}

impl UserFeedbackRecord {
    /// Creates a record stamped with the current time
    pub fn new(user_id: String, place_id: String, liked: bool, category: Category) -> Self {
        Self {
            user_id,
            place_id,
            liked,
            category,
            timestamp: Utc::now(),
        }
    }
}
