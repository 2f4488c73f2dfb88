use std::{fs, num::NonZeroUsize, path::Path};

use anyhow::{bail, Context};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "mixer_table.toml";

const DEFAULT_ROW_COUNT: NonZeroUsize = match NonZeroUsize::new(33) {
    Some(count) => count,
    None => unreachable!(),
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub row_count: NonZeroUsize,
    pub first_title: i64,
    pub seed: Option<u64>,
    pub window_title: String,
    pub move_animation_ms: u64,
}

impl Settings {
    /// Every title from `first_title` on must fit in an `i64`.
    pub fn validate(&self) -> anyhow::Result<()> {
        let span = i64::try_from(self.row_count.get() - 1).ok();
        if span.and_then(|span| self.first_title.checked_add(span)).is_none() {
            bail!(
                "first title {} leaves no room for {} rows",
                self.first_title,
                self.row_count
            );
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            row_count: DEFAULT_ROW_COUNT,
            first_title: 0,
            seed: None,
            window_title: "Mixer-Table".into(),
            move_animation_ms: 500,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    row_count: Option<usize>,
    first_title: Option<i64>,
    seed: Option<u64>,
    window_title: Option<String>,
    move_animation_ms: Option<u64>,
}

/// Defaults, then `mixer_table.toml` in the working directory if present,
/// then environment variables.
pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new(DEFAULT_CONFIG_FILE), false, |name| {
        std::env::var(name).ok()
    })
}

/// Like [`load_settings`] with an explicit file path, which must exist.
pub fn load_settings_file(path: &Path) -> anyhow::Result<Settings> {
    load_settings_from(path, true, |name| std::env::var(name).ok())
}

pub(crate) fn load_settings_from(
    path: &Path,
    required: bool,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg = parse_file_settings(&raw)
                .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
            apply_file_settings(&mut settings, file_cfg)?;
        }
        Err(err) if required => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()));
        }
        Err(_) => {}
    }

    apply_env_overrides(&mut settings, env)?;
    settings.validate()?;
    Ok(settings)
}

fn parse_file_settings(raw: &str) -> anyhow::Result<FileSettings> {
    Ok(toml::from_str::<FileSettings>(raw)?)
}

fn apply_file_settings(settings: &mut Settings, file_cfg: FileSettings) -> anyhow::Result<()> {
    if let Some(v) = file_cfg.row_count {
        settings.row_count = row_count(v)?;
    }
    if let Some(v) = file_cfg.first_title {
        settings.first_title = v;
    }
    if let Some(v) = file_cfg.seed {
        settings.seed = Some(v);
    }
    if let Some(v) = file_cfg.window_title {
        settings.window_title = v;
    }
    if let Some(v) = file_cfg.move_animation_ms {
        settings.move_animation_ms = v;
    }
    Ok(())
}

fn apply_env_overrides(
    settings: &mut Settings,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = env("MIXER_TABLE_ROWS") {
        settings.row_count = parse_row_count("MIXER_TABLE_ROWS", &v)?;
    }
    if let Some(v) = env("APP__ROW_COUNT") {
        settings.row_count = parse_row_count("APP__ROW_COUNT", &v)?;
    }

    if let Some(v) = env("APP__FIRST_TITLE") {
        settings.first_title = v
            .trim()
            .parse()
            .with_context(|| format!("APP__FIRST_TITLE is not an integer: '{v}'"))?;
    }

    if let Some(v) = env("APP__SEED") {
        settings.seed = Some(
            v.trim()
                .parse()
                .with_context(|| format!("APP__SEED is not an unsigned integer: '{v}'"))?,
        );
    }

    if let Some(v) = env("APP__MOVE_ANIMATION_MS") {
        settings.move_animation_ms = v
            .trim()
            .parse()
            .with_context(|| format!("APP__MOVE_ANIMATION_MS is not a duration in ms: '{v}'"))?;
    }

    Ok(())
}

fn parse_row_count(name: &str, raw: &str) -> anyhow::Result<NonZeroUsize> {
    let value = raw
        .trim()
        .parse::<usize>()
        .with_context(|| format!("{name} is not a row count: '{raw}'"))?;
    row_count(value)
}

/// Rejects an empty list up front; every later operation assumes rows exist.
pub fn row_count(value: usize) -> anyhow::Result<NonZeroUsize> {
    match NonZeroUsize::new(value) {
        Some(count) => Ok(count),
        None => bail!("row count must be greater than zero"),
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
