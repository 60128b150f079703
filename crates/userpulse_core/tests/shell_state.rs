use userpulse_core::db::open_db_in_memory;
use userpulse_core::service::dashboard::{greeting_at_hour, Greeting, GreetingBucket};
use userpulse_core::shell::error_view;
use userpulse_core::{
    keys, menu_entries, resolve_route, Language, NavigationShell, PreferenceRepository,
    ResolvedRoute, Route, SettingsBroadcast, ShellError, ShellPhase, SqlitePreferenceRepository,
    TextDirection, ThemeMode,
};

#[test]
fn mount_without_stored_name_enters_first_run() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();

    let shell = NavigationShell::mount(repo, SettingsBroadcast::new()).unwrap();
    assert_eq!(shell.phase(), ShellPhase::FirstRun);
    assert_eq!(shell.current_route(), ResolvedRoute::Shell);
}

#[test]
fn mount_with_stored_name_enters_normal_and_hydrates_identity() {
    let conn = open_db_in_memory().unwrap();
    SqlitePreferenceRepository::try_new(&conn)
        .unwrap()
        .set(keys::NAME, "Ana")
        .unwrap();

    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let shell = NavigationShell::mount(repo, SettingsBroadcast::new()).unwrap();

    assert_eq!(shell.phase(), ShellPhase::Normal);
    assert_eq!(shell.identity().display_name().unwrap(), "Ana");
}

#[test]
fn mount_applies_stored_language_and_theme_process_wide() {
    let conn = open_db_in_memory().unwrap();
    let seed = SqlitePreferenceRepository::try_new(&conn).unwrap();
    seed.set(keys::LANGUAGE, "fa").unwrap();
    seed.set(keys::THEME_MODE, "dark").unwrap();

    let settings = SettingsBroadcast::new();
    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let _shell = NavigationShell::mount(repo, settings.clone()).unwrap();

    let snapshot = settings.current();
    assert_eq!(snapshot.language, Language::Fa);
    assert_eq!(snapshot.theme_mode, ThemeMode::Dark);
    assert_eq!(snapshot.text_direction(), TextDirection::Rtl);
}

#[test]
fn unknown_stored_codes_fall_back_to_defaults() {
    let conn = open_db_in_memory().unwrap();
    let seed = SqlitePreferenceRepository::try_new(&conn).unwrap();
    seed.set(keys::LANGUAGE, "klingon").unwrap();
    seed.set(keys::THEME_MODE, "sepia").unwrap();

    let settings = SettingsBroadcast::new();
    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let _shell = NavigationShell::mount(repo, settings.clone()).unwrap();

    assert_eq!(settings.current().language, Language::En);
    assert_eq!(settings.current().theme_mode, ThemeMode::Light);
}

#[test]
fn first_run_submit_persists_name_and_lands_on_dashboard() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let mut shell = NavigationShell::mount(repo, SettingsBroadcast::new()).unwrap();

    shell.submit_first_run_name("Ana").unwrap();

    assert_eq!(shell.phase(), ShellPhase::Normal);
    assert_eq!(shell.current_route(), ResolvedRoute::View(Route::Dashboard));
    assert_eq!(shell.identity().display_name().unwrap(), "Ana");

    let stored = SqlitePreferenceRepository::try_new(&conn)
        .unwrap()
        .get(keys::NAME)
        .unwrap();
    assert_eq!(stored.as_deref(), Some("Ana"));

    // The dashboard greets the submitted name from here on.
    let greeting = greeting_at_hour(&shell.identity(), 9).unwrap();
    assert_eq!(
        greeting,
        Greeting::Named {
            bucket: GreetingBucket::Morning,
            name: "Ana".to_string(),
        }
    );
}

#[test]
fn first_run_submit_rejects_blank_names_and_keeps_phase() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let mut shell = NavigationShell::mount(repo, SettingsBroadcast::new()).unwrap();

    let err = shell.submit_first_run_name("   ").unwrap_err();
    assert!(matches!(err, ShellError::EmptyName));
    assert_eq!(shell.phase(), ShellPhase::FirstRun);
}

#[test]
fn normal_phase_is_terminal_for_the_session() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let mut shell = NavigationShell::mount(repo, SettingsBroadcast::new()).unwrap();

    shell.submit_first_run_name("Ana").unwrap();
    let err = shell.submit_first_run_name("Ben").unwrap_err();
    assert!(matches!(err, ShellError::NotFirstRun));
}

#[test]
fn menu_toggle_is_orthogonal_to_phase_and_route() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let mut shell = NavigationShell::mount(repo, SettingsBroadcast::new()).unwrap();

    assert!(shell.is_menu_open());
    shell.toggle_menu();
    assert!(!shell.is_menu_open());
    assert_eq!(shell.phase(), ShellPhase::FirstRun);

    shell.navigate("/todos");
    assert!(!shell.is_menu_open());
    shell.toggle_menu();
    assert!(shell.is_menu_open());
}

#[test]
fn navigation_never_alters_the_phase() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let mut shell = NavigationShell::mount(repo, SettingsBroadcast::new()).unwrap();

    assert_eq!(shell.navigate("/weather"), ResolvedRoute::View(Route::Weather));
    assert_eq!(shell.phase(), ShellPhase::FirstRun);

    assert_eq!(shell.navigate("/missing"), ResolvedRoute::NotFound);
    assert_eq!(shell.phase(), ShellPhase::FirstRun);
}

#[test]
fn routing_table_matches_the_fixed_paths() {
    assert_eq!(resolve_route("/"), ResolvedRoute::Shell);
    assert_eq!(resolve_route("/dashboard"), ResolvedRoute::View(Route::Dashboard));
    assert_eq!(resolve_route("/todos"), ResolvedRoute::View(Route::Todos));
    assert_eq!(resolve_route("/weather"), ResolvedRoute::View(Route::Weather));
    assert_eq!(resolve_route("/profile"), ResolvedRoute::View(Route::Profile));
    assert_eq!(resolve_route("/nope"), ResolvedRoute::NotFound);
    assert_eq!(resolve_route("dashboard"), ResolvedRoute::NotFound);
}

#[test]
fn menu_lists_all_views_in_display_order() {
    let entries = menu_entries();
    let routes: Vec<Route> = entries.iter().map(|entry| entry.route).collect();
    assert_eq!(
        routes,
        [Route::Dashboard, Route::Todos, Route::Weather, Route::Profile]
    );
    assert_eq!(entries[0].message_key, "dashboard");
}

#[test]
fn error_view_exposes_static_message_keys() {
    assert_eq!(
        error_view::message_keys(),
        [error_view::TITLE_KEY, error_view::BODY_KEY]
    );
}

#[test]
fn dashboard_greets_welcome_before_any_name_is_stored() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let shell = NavigationShell::mount(repo, SettingsBroadcast::new()).unwrap();

    let greeting = greeting_at_hour(&shell.identity(), 9).unwrap();
    assert_eq!(greeting, Greeting::Welcome);
}

#[test]
fn greeting_buckets_match_boundary_hours() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn).unwrap();
    let mut shell = NavigationShell::mount(repo, SettingsBroadcast::new()).unwrap();
    shell.submit_first_run_name("Ana").unwrap();
    let identity = shell.identity();

    let bucket_at = |hour| match greeting_at_hour(&identity, hour).unwrap() {
        Greeting::Named { bucket, .. } => bucket,
        Greeting::Welcome => panic!("name is stored"),
    };

    assert_eq!(bucket_at(11), GreetingBucket::Morning);
    assert_eq!(bucket_at(12), GreetingBucket::Afternoon);
    assert_eq!(bucket_at(17), GreetingBucket::Evening);
    assert_eq!(bucket_at(23), GreetingBucket::Night);
    assert_eq!(bucket_at(4), GreetingBucket::Night);
}
