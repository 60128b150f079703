//! Core use-case services behind the shell's views.
//!
//! # Responsibility
//! - Orchestrate repository and context access into view-level APIs.
//! - Keep the presentation layer decoupled from storage details.

pub mod dashboard;
pub mod profile_service;
pub mod todo_service;
