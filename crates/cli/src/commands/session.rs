//! Login, logout, photo and status commands.

use std::path::Path;

use nour_core::{Email, Phone, Photo, Role};
use nour_session::{DonorProfile, SessionStore};

use super::CliError;

/// Log the administrator in.
///
/// # Errors
///
/// Returns an error if the credential is rejected or cannot be persisted.
pub fn admin_login(sessions: &SessionStore, email: &str, password: &str) -> Result<(), CliError> {
    let session = sessions.login_admin(email, password)?;
    tracing::info!(
        "Logged in as {} ({})",
        session.name_en,
        session.email
    );
    Ok(())
}

/// Log the administrator out.
///
/// # Errors
///
/// Returns an error if the persisted session cannot be cleared.
pub fn admin_logout(sessions: &SessionStore) -> Result<(), CliError> {
    sessions.logout_admin()?;
    tracing::info!("Admin logged out");
    Ok(())
}

/// Replace the administrator's photo with an image file.
///
/// # Errors
///
/// Returns an error if no admin is logged in or the file is not a
/// supported image.
pub fn admin_photo(sessions: &SessionStore, file: &Path) -> Result<(), CliError> {
    let photo = read_photo(file)?;
    sessions
        .update_admin_photo(photo)?
        .ok_or(CliError::NotLoggedIn(Role::Admin))?;
    tracing::info!("Admin photo updated from {}", file.display());
    Ok(())
}

/// Log a donor in.
///
/// # Errors
///
/// Returns an error if the phone or email is malformed or the session
/// cannot be persisted.
pub fn donor_login(
    sessions: &SessionStore,
    phone: &str,
    name: Option<String>,
    name_en: Option<String>,
    email: Option<&str>,
) -> Result<(), CliError> {
    let phone = Phone::parse(phone)?;
    let email = email.map(Email::parse).transpose()?;

    let profile = (name.is_some() || name_en.is_some() || email.is_some()).then(|| DonorProfile {
        name,
        name_en,
        email,
        ..DonorProfile::default()
    });

    let session = sessions.login_donor(phone, profile)?;
    tracing::info!(
        "Donor {} logged in{}",
        session.phone,
        if session.is_new { " (new registration)" } else { "" }
    );
    Ok(())
}

/// Log the donor out.
///
/// # Errors
///
/// Returns an error if the persisted session cannot be cleared.
pub fn donor_logout(sessions: &SessionStore) -> Result<(), CliError> {
    sessions.logout_donor()?;
    tracing::info!("Donor logged out");
    Ok(())
}

/// Report which roles are logged in.
pub fn status(sessions: &SessionStore) {
    let snapshot = sessions.snapshot();

    match &snapshot.admin {
        Some(admin) => tracing::info!(
            "Admin: {} <{}> since {}",
            admin.name_en,
            admin.email,
            admin.logged_in_at
        ),
        None => tracing::info!("Admin: logged out"),
    }
    match &snapshot.donor {
        Some(donor) => tracing::info!(
            "Donor: {} ({}) since {}",
            donor.name_en,
            donor.phone,
            donor.logged_in_at
        ),
        None => tracing::info!("Donor: logged out"),
    }
    tracing::info!(
        "Requests authorize as: {}",
        sessions
            .credential()
            .role()
            .map_or("anonymous", Role::as_str)
    );
}

fn read_photo(file: &Path) -> Result<Photo, CliError> {
    let bytes = std::fs::read(file).map_err(|source| CliError::ReadFile {
        path: file.display().to_string(),
        source,
    })?;
    Ok(Photo::from_bytes(mime_for(file), &bytes)?)
}

fn mime_for(file: &Path) -> &'static str {
    let extension = file
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}
