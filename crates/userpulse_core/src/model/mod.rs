//! Domain model for profile and presentation settings.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep storage codes for language/theme in one place.
//!
//! # Invariants
//! - `language` and `themeMode` storage codes are closed enums here; no other
//!   module parses or formats them.

pub mod profile;
