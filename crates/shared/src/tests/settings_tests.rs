use super::*;

use std::{
    collections::HashMap,
    env,
    sync::atomic::{AtomicUsize, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

static NEXT_CONFIG: AtomicUsize = AtomicUsize::new(0);

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| map.get(name).cloned()
}

fn temp_config(contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let n = NEXT_CONFIG.fetch_add(1, Ordering::Relaxed);
    let temp_root = env::temp_dir().join(format!("mixer_table_settings_test_{suffix}_{n}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("mixer_table.toml");
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn defaults_describe_a_33_row_list() {
    let settings = Settings::default();
    assert_eq!(settings.row_count.get(), 33);
    assert_eq!(settings.first_title, 0);
    assert_eq!(settings.seed, None);
    assert_eq!(settings.window_title, "Mixer-Table");
    assert_eq!(settings.move_animation_ms, 500);
}

#[test]
fn missing_optional_file_falls_back_to_defaults() {
    let path = env::temp_dir().join("mixer_table_does_not_exist.toml");
    let settings = load_settings_from(&path, false, no_env).expect("settings");
    assert_eq!(settings, Settings::default());
}

#[test]
fn missing_required_file_is_an_error() {
    let path = env::temp_dir().join("mixer_table_does_not_exist.toml");
    let err = load_settings_from(&path, true, no_env).expect_err("must fail");
    assert!(err.to_string().contains("failed to read settings file"));
}

#[test]
fn file_values_override_defaults() {
    let path = temp_config("row_count = 50\nfirst_title = 1\nseed = 9\n");

    let settings = load_settings_from(&path, true, no_env).expect("settings");

    assert_eq!(settings.row_count.get(), 50);
    assert_eq!(settings.first_title, 1);
    assert_eq!(settings.seed, Some(9));
    assert_eq!(settings.window_title, "Mixer-Table");

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn env_overrides_file() {
    let path = temp_config("row_count = 50\n");

    let settings = load_settings_from(
        &path,
        true,
        env_from(&[("APP__ROW_COUNT", "12"), ("APP__MOVE_ANIMATION_MS", "250")]),
    )
    .expect("settings");

    assert_eq!(settings.row_count.get(), 12);
    assert_eq!(settings.move_animation_ms, 250);

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn zero_rows_are_rejected() {
    let path = env::temp_dir().join("mixer_table_does_not_exist.toml");
    let err = load_settings_from(&path, false, env_from(&[("MIXER_TABLE_ROWS", "0")]))
        .expect_err("must fail");
    assert!(err.to_string().contains("greater than zero"));
}

#[test]
fn malformed_file_reports_path() {
    let path = temp_config("row_count = \"many\"\n");

    let err = load_settings_from(&path, true, no_env).expect_err("must fail");
    assert!(err.to_string().contains("failed to parse settings file"));

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn unknown_keys_are_rejected() {
    let path = temp_config("rows = 3\n");

    assert!(load_settings_from(&path, true, no_env).is_err());

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn first_title_and_seed_come_from_env() {
    let path = temp_config("first_title = 1\nseed = 9\n");

    let settings = load_settings_from(
        &path,
        true,
        env_from(&[("APP__FIRST_TITLE", "-4"), ("APP__SEED", "77")]),
    )
    .expect("settings");

    assert_eq!(settings.first_title, -4);
    assert_eq!(settings.seed, Some(77));

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn app_row_count_wins_over_legacy_variable() {
    let path = env::temp_dir().join("mixer_table_does_not_exist.toml");

    let settings = load_settings_from(
        &path,
        false,
        env_from(&[("MIXER_TABLE_ROWS", "50"), ("APP__ROW_COUNT", "20")]),
    )
    .expect("settings");

    assert_eq!(settings.row_count.get(), 20);
}

#[test]
fn legacy_row_variable_applies_alone() {
    let path = env::temp_dir().join("mixer_table_does_not_exist.toml");

    let settings = load_settings_from(&path, false, env_from(&[("MIXER_TABLE_ROWS", "50")]))
        .expect("settings");

    assert_eq!(settings.row_count.get(), 50);
}

#[test]
fn malformed_env_values_name_the_variable() {
    let path = env::temp_dir().join("mixer_table_does_not_exist.toml");
    let cases = [
        ("MIXER_TABLE_ROWS", "x"),
        ("APP__ROW_COUNT", "-3"),
        ("APP__FIRST_TITLE", "x"),
        ("APP__SEED", "abc"),
        ("APP__MOVE_ANIMATION_MS", "soon"),
    ];

    for (name, value) in cases {
        let err = load_settings_from(&path, false, env_from(&[(name, value)]))
            .expect_err("must fail");
        let message = err.to_string();
        assert!(message.contains(name), "{name}: {message}");
        assert!(message.contains(value), "{name}: {message}");
    }
}

#[test]
fn first_title_without_room_for_rows_is_rejected() {
    let path = temp_config(&format!("row_count = 3\nfirst_title = {}\n", i64::MAX - 1));

    let err = load_settings_from(&path, true, no_env).expect_err("must fail");
    assert!(err.to_string().contains("leaves no room for 3 rows"));

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn first_title_at_the_top_of_the_range_is_accepted() {
    let path = env::temp_dir().join("mixer_table_does_not_exist.toml");
    let last_start = (i64::MAX - 2).to_string();

    let settings = load_settings_from(
        &path,
        false,
        env_from(&[("APP__ROW_COUNT", "3"), ("APP__FIRST_TITLE", last_start.as_str())]),
    )
    .expect("settings");

    assert_eq!(settings.first_title, i64::MAX - 2);
}

#[test]
fn validate_checks_the_combined_range() {
    let mut settings = Settings::default();
    assert!(settings.validate().is_ok());

    settings.first_title = i64::MAX;
    assert!(settings.validate().is_err());

    settings.row_count = NonZeroUsize::MIN;
    assert!(settings.validate().is_ok());
}
