//! Location of today's daily note.
//!
//! Two plugins can own daily-note settings. When `periodic-notes` is enabled
//! its `daily` section wins outright, even when it is empty; otherwise the core
//! daily-notes settings apply. Missing values fall back to [`DEFAULT_DAILY_FORMAT`]
//! and the vault root.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::DEFAULT_DAILY_FORMAT;
use crate::paths::NOTE_EXTENSION;
use crate::{Vault, moment};

const CORE_PLUGINS: &str = "core-plugins.json";
const COMMUNITY_PLUGINS: &str = "community-plugins.json";
const DAILY_NOTES_SETTINGS: &str = "daily-notes.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyNoteSource {
    /// `plugins/periodic-notes/data.json`, `daily` section.
    Periodic,
    /// Core plugin `daily-notes.json`.
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyNoteConfig {
    /// Moment-style date format; never empty.
    pub format: String,
    /// Vault-relative folder; empty for the vault root.
    pub folder: String,
    pub source: DailyNoteSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyPath {
    pub path: PathBuf,
    /// Today's date rendered with the configured format.
    pub date: String,
    pub folder: String,
    /// Whether the note existed when the path was resolved.
    pub exists: bool,
}

#[derive(Debug, Default, Deserialize)]
struct RawDailySettings {
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    folder: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPeriodicSettings {
    #[serde(default)]
    daily: Option<RawDailySettings>,
}

/// Enabled-plugin list. Older vaults store a bare array of ids, newer core
/// settings map each id to an enabled flag.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PluginRegistry {
    List(Vec<String>),
    Flags(BTreeMap<String, bool>),
}

impl PluginRegistry {
    fn contains(&self, id: &str) -> bool {
        match self {
            Self::List(ids) => ids.iter().any(|p| p == id),
            Self::Flags(flags) => flags.get(id).copied().unwrap_or(false),
        }
    }
}

impl Vault {
    /// Whether `id` appears in either the core or the community plugin list.
    pub fn is_plugin_enabled(&self, id: &str) -> bool {
        [CORE_PLUGINS, COMMUNITY_PLUGINS].iter().any(|file| {
            read_json::<PluginRegistry>(&self.config_path(file))
                .is_some_and(|registry| registry.contains(id))
        })
    }

    /// Effective daily-note settings.
    pub fn daily_note_config(&self) -> DailyNoteConfig {
        let plugin = &self.config().periodic_notes_plugin;
        let (raw, source) = if self.is_plugin_enabled(plugin) {
            let path = self.config_path(Path::new("plugins").join(plugin).join("data.json"));
            let raw = read_json::<RawPeriodicSettings>(&path)
                .and_then(|s| s.daily)
                .unwrap_or_default();
            (raw, DailyNoteSource::Periodic)
        } else {
            let raw = read_json::<RawDailySettings>(&self.config_path(DAILY_NOTES_SETTINGS))
                .unwrap_or_default();
            (raw, DailyNoteSource::Legacy)
        };

        let format = raw
            .format
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| DEFAULT_DAILY_FORMAT.to_string());
        let folder = raw
            .folder
            .map(|f| f.trim_matches('/').to_string())
            .unwrap_or_default();

        DailyNoteConfig {
            format,
            folder,
            source,
        }
    }

    /// Path of today's daily note.
    pub fn daily_path(&self) -> DailyPath {
        self.daily_path_at(Local::now().naive_local())
    }

    /// Path of the daily note for `now`.
    pub fn daily_path_at(&self, now: NaiveDateTime) -> DailyPath {
        let cfg = self.daily_note_config();
        let date = format_date(now, &cfg.format);

        let mut path = self.root().to_path_buf();
        if !cfg.folder.is_empty() {
            path.push(&cfg.folder);
        }
        path.push(format!("{date}{NOTE_EXTENSION}"));
        let exists = path.exists();

        debug!(path = %path.display(), exists, source = ?cfg.source, "resolved daily note");
        DailyPath {
            path,
            date,
            folder: cfg.folder,
            exists,
        }
    }
}

fn format_date(now: NaiveDateTime, moment_format: &str) -> String {
    let strftime = moment::translate(moment_format);
    let mut out = String::new();
    if write!(out, "{}", now.format(&strftime)).is_ok() {
        return out;
    }

    warn!(format = moment_format, "unsupported daily note format; using default");
    now.format(&moment::translate(DEFAULT_DAILY_FORMAT)).to_string()
}

/// Best-effort JSON read: any failure is reported as `None`.
fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "settings file unavailable");
            return None;
        }
    };
    match serde_json::from_str(&text) {
        Ok(v) => Some(v),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring malformed settings file");
            None
        }
    }
}
