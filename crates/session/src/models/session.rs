//! Session records for the two roles.
//!
//! Both are persisted as JSON under their own key, next to (never inside)
//! their token. Field names are camelCase on the wire.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use nour_core::{Amount, Email, Phone, Photo};

use crate::verifier::AdminIdentity;

/// Default Arabic display name for a donor who did not register a profile.
pub const DEFAULT_DONOR_NAME: &str = "فاعل خير";

/// Default English display name for a donor who did not register a profile.
pub const DEFAULT_DONOR_NAME_EN: &str = "Benefactor";

/// The logged-in administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    /// Login email.
    pub email: Email,
    /// Arabic display name.
    pub name: String,
    /// English display name.
    pub name_en: String,
    /// Arabic role title.
    pub role: String,
    /// English role title.
    pub role_en: String,
    /// When this session was created.
    pub logged_in_at: DateTime<Utc>,
    /// Profile photo, if one was uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<Photo>,
}

impl AdminSession {
    /// Start a session for a verified administrator.
    #[must_use]
    pub fn start(identity: AdminIdentity, now: DateTime<Utc>) -> Self {
        Self {
            email: identity.email,
            name: identity.name,
            name_en: identity.name_en,
            role: identity.role,
            role_en: identity.role_en,
            logged_in_at: now,
            photo: None,
        }
    }
}

/// The logged-in donor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorSession {
    /// Verified phone number.
    pub phone: Phone,
    /// Arabic display name.
    pub name: String,
    /// English display name.
    pub name_en: String,
    /// Contact email, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    /// First donation / registration date.
    pub join_date: NaiveDate,
    /// Lifetime donated amount.
    pub total_donations: Amount,
    /// Lifetime number of donations.
    pub donation_count: u32,
    /// `true` when the donor just registered (first-time flow).
    pub is_new: bool,
    /// When this session was created.
    pub logged_in_at: DateTime<Utc>,
    /// Profile photo, if one was uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<Photo>,
}

/// Profile fields a caller may supply at donor login.
///
/// Supplying a `name` is what marks a first-time registrant; a returning
/// donor logs in with the phone alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DonorProfile {
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub email: Option<Email>,
    pub join_date: Option<NaiveDate>,
    pub total_donations: Option<Amount>,
    pub donation_count: Option<u32>,
}

impl DonorSession {
    /// Build a session from the phone and whatever profile was supplied.
    ///
    /// Missing fields fall back to fixed defaults; `join_date` defaults to
    /// the login day.
    #[must_use]
    pub fn start(phone: Phone, profile: Option<DonorProfile>, now: DateTime<Utc>) -> Self {
        let profile = profile.unwrap_or_default();
        let is_new = profile.name.is_some();

        Self {
            phone,
            name: profile
                .name
                .unwrap_or_else(|| DEFAULT_DONOR_NAME.to_string()),
            name_en: profile
                .name_en
                .unwrap_or_else(|| DEFAULT_DONOR_NAME_EN.to_string()),
            email: profile.email,
            join_date: profile.join_date.unwrap_or_else(|| now.date_naive()),
            total_donations: profile.total_donations.unwrap_or_default(),
            donation_count: profile.donation_count.unwrap_or(0),
            is_new,
            logged_in_at: now,
            photo: None,
        }
    }
}
