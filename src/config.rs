use std::path::PathBuf;

pub const DEFAULT_URL_SCHEME: &str = "obsidian";
pub const DEFAULT_DAILY_FORMAT: &str = "YYYY-MM-DD";
pub const PERIODIC_NOTES_PLUGIN: &str = "periodic-notes";

#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Vault-relative directory holding the host application's settings.
    pub config_dir: PathBuf,
    /// Directory names to ignore anywhere in the path.
    pub ignore_dirs: Vec<String>,
    /// Skip dot-prefixed files and directories while enumerating notes.
    pub skip_hidden: bool,
    /// Characters of context kept on each side of a substring hit.
    pub context_chars: usize,
    /// Scheme used for deep links.
    pub url_scheme: String,
    /// Plugin id whose presence switches daily notes to the periodic-notes settings.
    pub periodic_notes_plugin: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from(".obsidian"),
            ignore_dirs: vec![
                ".obsidian".into(),
                ".trash".into(),
                ".git".into(),
                "node_modules".into(),
            ],
            skip_hidden: true,
            context_chars: 10,
            url_scheme: DEFAULT_URL_SCHEME.into(),
            periodic_notes_plugin: PERIODIC_NOTES_PLUGIN.into(),
        }
    }
}
