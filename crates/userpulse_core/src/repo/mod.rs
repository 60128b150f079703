//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value preference access contract used by shell and views.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Each key is written independently; atomicity holds per key only.
//! - Repository APIs return semantic errors (`InvalidData`) in addition to DB
//!   transport errors.

pub mod preference_repo;
