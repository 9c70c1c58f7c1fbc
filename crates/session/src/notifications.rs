//! Per-role notification center.
//!
//! Notifications live in memory only. The first time a role is seen with an
//! active session, its seed set is merged into the shared list; later calls
//! for the same role are no-ops until [`NotificationCenter::clear`].

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};

use nour_core::{NotificationId, Role};

use crate::models::{NotificationDraft, NotificationKind, NotificationRecord};
use crate::session::SessionStore;

/// First id handed out by [`NotificationCenter::push`].
pub const RUNTIME_ID_START: u32 = 1000;

#[derive(Debug, Default)]
struct CenterState {
    records: Vec<NotificationRecord>,
    initialized: HashSet<Role>,
}

/// Shared notification list for both roles.
///
/// Cheap to clone; clones share the list. `init` checks and merges under a
/// single write lock, so calling it on every render never duplicates.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    state: Arc<RwLock<CenterState>>,
}

impl NotificationCenter {
    /// An empty center with no role initialized.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `role`'s notifications unless already done.
    ///
    /// Returns `true` if this call merged the seed set.
    pub fn init(&self, role: Role) -> bool {
        let mut state = self.write_state();
        if !state.initialized.insert(role) {
            return false;
        }

        let now = Utc::now();
        let existing: HashSet<NotificationId> = state.records.iter().map(|n| n.id).collect();
        let fresh: Vec<_> = seed(role, now)
            .into_iter()
            .filter(|n| !existing.contains(&n.id))
            .collect();

        tracing::debug!(%role, added = fresh.len(), "Seeded notifications");
        state.records.extend(fresh);
        true
    }

    /// Initialize every role that currently has an active session.
    pub fn sync_with(&self, sessions: &SessionStore) {
        for role in Role::ALL {
            if sessions.is_active(role) {
                self.init(role);
            }
        }
    }

    /// Mark one notification as read. Returns `false` if no such id exists.
    pub fn mark_as_read(&self, id: NotificationId) -> bool {
        let mut state = self.write_state();
        match state.records.iter_mut().find(|n| n.id == id) {
            Some(record) => {
                record.read = true;
                true
            }
            None => false,
        }
    }

    /// Mark every notification as read.
    pub fn mark_all_as_read(&self) {
        let mut state = self.write_state();
        for record in &mut state.records {
            record.read = true;
        }
    }

    /// Number of unread notifications across both roles.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.read_state().records.iter().filter(|n| !n.read).count()
    }

    /// Number of unread notifications addressed to `role`.
    #[must_use]
    pub fn unread_count_for(&self, role: Role) -> usize {
        self.read_state()
            .records
            .iter()
            .filter(|n| n.audience == role && !n.read)
            .count()
    }

    /// Every notification, in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<NotificationRecord> {
        self.read_state().records.clone()
    }

    /// Notifications addressed to `role`.
    #[must_use]
    pub fn for_role(&self, role: Role) -> Vec<NotificationRecord> {
        self.read_state()
            .records
            .iter()
            .filter(|n| n.audience == role)
            .cloned()
            .collect()
    }

    /// Drop every notification and forget which roles were seeded.
    pub fn clear(&self) {
        let mut state = self.write_state();
        state.records.clear();
        state.initialized.clear();
    }

    /// Append a runtime notification with the next free id.
    ///
    /// Runtime ids start at [`RUNTIME_ID_START`], above every seed id, so a
    /// role seeded later still merges its whole set.
    pub fn push(&self, draft: NotificationDraft) -> NotificationRecord {
        let mut state = self.write_state();
        let next = state
            .records
            .iter()
            .map(|n| n.id.as_u32())
            .filter(|&id| id >= RUNTIME_ID_START)
            .max()
            .map_or(RUNTIME_ID_START, |max| max.saturating_add(1));

        let record = draft.into_record(NotificationId::new(next), Utc::now());
        state.records.push(record.clone());
        record
    }

    fn read_state(&self) -> RwLockReadGuard<'_, CenterState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, CenterState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

struct Seed {
    id: u32,
    kind: NotificationKind,
    title: &'static str,
    title_en: &'static str,
    message: &'static str,
    message_en: &'static str,
    minutes_ago: i64,
    read: bool,
    icon: &'static str,
}

const ADMIN_SEED: &[Seed] = &[
    Seed {
        id: 1,
        kind: NotificationKind::Donation,
        title: "تبرع جديد",
        title_en: "New donation",
        message: "تم استلام تبرع بقيمة 5,000 ج.م لحملة كسوة الشتاء",
        message_en: "A 5,000 EGP donation was received for the winter clothing campaign",
        minutes_ago: 5,
        read: false,
        icon: "heart",
    },
    Seed {
        id: 2,
        kind: NotificationKind::Beneficiary,
        title: "طلب مستفيد جديد",
        title_en: "New beneficiary request",
        message: "طلب مساعدة جديد بانتظار المراجعة",
        message_en: "A new assistance request is awaiting review",
        minutes_ago: 30,
        read: false,
        icon: "users",
    },
    Seed {
        id: 3,
        kind: NotificationKind::Campaign,
        title: "اكتمال حملة",
        title_en: "Campaign completed",
        message: "حملة إفطار صائم حققت هدفها بنسبة 100%",
        message_en: "The Iftar campaign reached 100% of its goal",
        minutes_ago: 120,
        read: false,
        icon: "target",
    },
    Seed {
        id: 4,
        kind: NotificationKind::Report,
        title: "التقرير الشهري جاهز",
        title_en: "Monthly report ready",
        message: "تقرير التبرعات الشهري متاح للتنزيل",
        message_en: "The monthly donations report is available for download",
        minutes_ago: 60 * 24,
        read: true,
        icon: "file-text",
    },
    Seed {
        id: 5,
        kind: NotificationKind::System,
        title: "تحديث النظام",
        title_en: "System update",
        message: "تمت إضافة ميزات جديدة إلى لوحة التحكم",
        message_en: "New features were added to the dashboard",
        minutes_ago: 60 * 48,
        read: true,
        icon: "settings",
    },
];

const DONOR_SEED: &[Seed] = &[
    Seed {
        id: 101,
        kind: NotificationKind::Receipt,
        title: "إيصال تبرعك",
        title_en: "Your donation receipt",
        message: "شكراً لك! إيصال تبرعك الأخير جاهز",
        message_en: "Thank you! Your latest donation receipt is ready",
        minutes_ago: 10,
        read: false,
        icon: "receipt",
    },
    Seed {
        id: 102,
        kind: NotificationKind::Campaign,
        title: "حملة جديدة",
        title_en: "New campaign",
        message: "انطلقت حملة كفالة الأيتام، ساهم معنا",
        message_en: "The orphan sponsorship campaign has launched, join us",
        minutes_ago: 180,
        read: false,
        icon: "megaphone",
    },
    Seed {
        id: 103,
        kind: NotificationKind::Reminder,
        title: "تذكير بالتبرع الشهري",
        title_en: "Monthly donation reminder",
        message: "موعد تبرعك الشهري بعد ثلاثة أيام",
        message_en: "Your monthly donation is due in three days",
        minutes_ago: 60 * 24,
        read: false,
        icon: "bell",
    },
    Seed {
        id: 104,
        kind: NotificationKind::Report,
        title: "أثر تبرعاتك",
        title_en: "Your impact",
        message: "ساهمت تبرعاتك في دعم 12 أسرة هذا الشهر",
        message_en: "Your donations supported 12 families this month",
        minutes_ago: 60 * 72,
        read: true,
        icon: "trending-up",
    },
];

fn seed(role: Role, now: DateTime<Utc>) -> Vec<NotificationRecord> {
    let seeds = match role {
        Role::Admin => ADMIN_SEED,
        Role::Donor => DONOR_SEED,
    };

    seeds
        .iter()
        .map(|s| NotificationRecord {
            id: NotificationId::new(s.id),
            audience: role,
            kind: s.kind,
            title: s.title.to_string(),
            title_en: s.title_en.to_string(),
            message: s.message.to_string(),
            message_en: s.message_en.to_string(),
            time: now - Duration::minutes(s.minutes_ago),
            read: s.read,
            icon: s.icon.to_string(),
        })
        .collect()
}
