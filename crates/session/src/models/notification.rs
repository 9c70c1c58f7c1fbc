//! Notification records shown in the portal and dashboard headers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nour_core::{Locale, NotificationId, Role};

/// What a notification is about. Drives the icon and grouping in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Donation,
    Beneficiary,
    Campaign,
    Report,
    Receipt,
    Reminder,
    System,
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    /// Unique within the audience role.
    pub id: NotificationId,
    /// The role whose header shows this notification.
    pub audience: Role,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub title_en: String,
    pub message: String,
    pub message_en: String,
    pub time: DateTime<Utc>,
    pub read: bool,
    /// Icon name understood by the UI layer.
    pub icon: String,
}

impl NotificationRecord {
    /// Title in `locale`.
    #[must_use]
    pub fn title(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ar => &self.title,
            Locale::En => &self.title_en,
        }
    }

    /// Message body in `locale`.
    #[must_use]
    pub fn message(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ar => &self.message,
            Locale::En => &self.message_en,
        }
    }
}

/// A notification raised at runtime, before it is assigned an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDraft {
    pub audience: Role,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub title_en: String,
    pub message: String,
    pub message_en: String,
    pub icon: String,
}

impl NotificationDraft {
    /// Turn the draft into an unread record.
    #[must_use]
    pub fn into_record(self, id: NotificationId, time: DateTime<Utc>) -> NotificationRecord {
        NotificationRecord {
            id,
            audience: self.audience,
            kind: self.kind,
            title: self.title,
            title_en: self.title_en,
            message: self.message,
            message_en: self.message_en,
            time,
            read: false,
            icon: self.icon,
        }
    }
}
