//! Session and notification records.

pub mod notification;
pub mod session;

pub use notification::{NotificationDraft, NotificationKind, NotificationRecord};
pub use session::{AdminSession, DonorProfile, DonorSession};
