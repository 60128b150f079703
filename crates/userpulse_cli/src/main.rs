//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `userpulse_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use userpulse_core::db::open_db_in_memory;
use userpulse_core::shell::{NavigationShell, ShellPhase};
use userpulse_core::{SettingsBroadcast, SqlitePreferenceRepository};

fn main() {
    println!("userpulse_core version={}", userpulse_core::core_version());

    // Mount the shell over an ephemeral store to prove core wiring end to end.
    let conn = open_db_in_memory().expect("in-memory db should open");
    let repo = SqlitePreferenceRepository::try_new(&conn).expect("schema should be migrated");
    let shell =
        NavigationShell::mount(repo, SettingsBroadcast::new()).expect("shell should mount");
    let phase = match shell.phase() {
        ShellPhase::FirstRun => "first_run",
        ShellPhase::Normal => "normal",
    };
    println!("shell phase={phase} menu_open={}", shell.is_menu_open());
}
