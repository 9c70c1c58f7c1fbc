//! Translator interface for user-facing strings.
//!
//! The core only needs a handful of strings; hosts with a richer catalog can
//! implement [`Translator`] themselves.

use nour_core::Locale;

/// Looks up a user-facing string by key.
pub trait Translator: Send + Sync {
    /// The active locale.
    fn locale(&self) -> Locale;

    /// Translate `key`. Unknown keys are returned unchanged.
    fn t<'a>(&self, key: &'a str) -> &'a str;
}

/// Built-in Arabic/English catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog {
    locale: Locale,
}

const ENTRIES: &[(&str, &str, &str)] = &[
    (
        "auth.invalid_credentials",
        "البريد الإلكتروني أو كلمة المرور غير صحيحة",
        "Invalid email or password",
    ),
    (
        "common.unexpected_error",
        "حدث خطأ غير متوقع",
        "An unexpected error occurred",
    ),
    (
        "guard.login_required",
        "يجب تسجيل الدخول كمدير للوصول إلى هذه الصفحة",
        "You must sign in as an administrator to access this page",
    ),
    (
        "auth.admin_login_title",
        "تسجيل دخول المدير",
        "Administrator sign in",
    ),
    ("auth.logged_out", "تم تسجيل الخروج", "Signed out"),
    (
        "session.expired",
        "انتهت الجلسة، يرجى تسجيل الدخول مرة أخرى",
        "Your session has expired, please sign in again",
    ),
    ("donor.welcome", "مرحباً بك", "Welcome"),
    ("notifications.title", "الإشعارات", "Notifications"),
];

impl Catalog {
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

impl Translator for Catalog {
    fn locale(&self) -> Locale {
        self.locale
    }

    fn t<'a>(&self, key: &'a str) -> &'a str {
        ENTRIES
            .iter()
            .find(|(k, _, _)| *k == key)
            .map_or(key, |&(_, ar, en)| match self.locale {
                Locale::Ar => ar,
                Locale::En => en,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_locale() {
        assert_eq!(
            Catalog::new(Locale::Ar).t("common.unexpected_error"),
            "حدث خطأ غير متوقع"
        );
        assert_eq!(
            Catalog::new(Locale::En).t("auth.invalid_credentials"),
            "Invalid email or password"
        );
    }

    #[test]
    fn test_unknown_key_passes_through() {
        assert_eq!(Catalog::default().t("missing.key"), "missing.key");
    }

    #[test]
    fn test_error_keys_are_translated() {
        let catalog = Catalog::new(Locale::Ar);
        let err = crate::error::AuthError::InvalidCredentials;
        assert_eq!(catalog.t(err.message_key()), err.to_string());
    }
}
