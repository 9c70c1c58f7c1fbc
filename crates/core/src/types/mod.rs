//! Core types for Nour.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod amount;
pub mod email;
pub mod id;
pub mod phone;
pub mod photo;
pub mod role;
pub mod token;

pub use amount::{Amount, AmountError, CurrencyCode};
pub use email::{Email, EmailError};
pub use id::*;
pub use phone::{Phone, PhoneError};
pub use photo::{Photo, PhotoError};
pub use role::{Locale, Role, Theme, UnknownVariant};
pub use token::{Credential, Token};
