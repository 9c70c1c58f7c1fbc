//! Nour Core - Shared types library.
//!
//! This crate provides common types used across all Nour components:
//! - `session` - Client session store, route guard, notifications and HTTP pipeline
//! - `portal` - Donor portal and admin dashboard host
//! - `cli` - Command-line session tooling
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails, phones, tokens, photos, amounts and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
