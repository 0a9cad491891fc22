use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A video record as held by the metadata store.
///
/// `video_url` stays `None` until an ingestion run publishes the file; it is
/// written only after publication succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct VideoRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VideoRecord {
    pub fn new(id: Uuid, user_id: Uuid, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            title: title.into(),
            description: None,
            thumbnail_url: None,
            video_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Where a published video lives in object storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedLocation {
    /// `{category}/{random_id}.{extension}`
    pub storage_key: String,
    pub public_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_no_urls() {
        let record = VideoRecord::new(Uuid::new_v4(), Uuid::new_v4(), "Boot camp");
        assert!(record.video_url.is_none());
        assert!(record.thumbnail_url.is_none());
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn test_ownership() {
        let owner = Uuid::new_v4();
        let record = VideoRecord::new(Uuid::new_v4(), owner, "Clip");
        assert!(record.is_owned_by(owner));
        assert!(!record.is_owned_by(Uuid::new_v4()));
    }

    #[test]
    fn test_record_json_shape() {
        let record = VideoRecord::new(Uuid::new_v4(), Uuid::new_v4(), "Clip");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["title"], "Clip");
        assert!(json["video_url"].is_null());
        assert!(json.get("user_id").is_some());
    }
}
