use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for announcements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnouncementId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementStatus {
    Draft,
    Published,
}

impl AnnouncementStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AnnouncementStatus::Draft => "draft",
            AnnouncementStatus::Published => "published",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "draft" => Some(Self::Draft),
            "published" => Some(Self::Published),
            _ => None,
        }
    }
}

/// Who the announcement is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Audience {
    AllHomeowners,
    Phase { label: String },
    Staff,
}

impl Audience {
    /// Short form used in relay payloads and exports.
    pub fn label(&self) -> String {
        match self {
            Audience::AllHomeowners => "all_homeowners".to_string(),
            Audience::Phase { label } => format!("phase:{label}"),
            Audience::Staff => "staff".to_string(),
        }
    }
}

/// A notice on the homeowner board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: AnnouncementId,
    pub title: String,
    pub body: String,
    pub audience: Audience,
    pub status: AnnouncementStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

/// Draft form payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAnnouncement {
    pub title: String,
    pub body: String,
    pub audience: Audience,
}

/// Edit form payload. Status and publication time are not editable here;
/// publishing is its own operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementUpdate {
    pub title: String,
    pub body: String,
    pub audience: Audience,
}
