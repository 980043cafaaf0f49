use std::path::{Component, Path, PathBuf};

use crate::{Error, Result, VaultConfig};

/// Handle on a vault root directory.
///
/// Holds no index or cache: every operation reads the filesystem afresh.
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
    cfg: VaultConfig,
}

impl Vault {
    /// Wraps `root` without touching the filesystem.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cfg: VaultConfig::default(),
        }
    }

    /// Like [`Vault::new`], but requires `root` to be an existing directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        Self::with_config(root, VaultConfig::default())
    }

    pub fn with_config(root: impl Into<PathBuf>, cfg: VaultConfig) -> Result<Self> {
        let root = root.into();
        let meta = std::fs::metadata(&root).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::VaultNotFound(root.clone()),
            _ => Error::io(&root, e),
        })?;
        if !meta.is_dir() {
            return Err(Error::VaultNotDirectory(root));
        }
        Ok(Self { root, cfg })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &VaultConfig {
        &self.cfg
    }

    pub(crate) fn config_path(&self, file: impl AsRef<Path>) -> PathBuf {
        self.root.join(&self.cfg.config_dir).join(file)
    }

    pub(crate) fn is_ignored_rel(&self, rel: &Path) -> bool {
        rel.components().any(|c| {
            let Component::Normal(part) = c else {
                return false;
            };
            let s = part.to_string_lossy();
            if self.cfg.skip_hidden && s.starts_with('.') {
                return true;
            }
            self.cfg.ignore_dirs.iter().any(|d| d == &s)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_and_ignored_components_are_detected() {
        let vault = Vault::new("/v");
        assert!(vault.is_ignored_rel(Path::new(".obsidian/daily-notes.json")));
        assert!(vault.is_ignored_rel(Path::new("notes/.draft.md")));
        assert!(vault.is_ignored_rel(Path::new("node_modules/x.md")));
        assert!(!vault.is_ignored_rel(Path::new("notes/a.md")));
    }

    #[test]
    fn hidden_files_are_kept_when_configured() {
        let cfg = VaultConfig {
            skip_hidden: false,
            ..VaultConfig::default()
        };
        let vault = Vault {
            root: PathBuf::from("/v"),
            cfg,
        };
        assert!(!vault.is_ignored_rel(Path::new("notes/.draft.md")));
        assert!(vault.is_ignored_rel(Path::new(".obsidian/x.md")));
    }

    #[test]
    fn open_rejects_missing_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope");
        assert!(matches!(
            Vault::open(&missing),
            Err(Error::VaultNotFound(p)) if p == missing
        ));
    }

    #[test]
    fn config_paths_are_vault_relative() {
        let vault = Vault::new("/v");
        assert_eq!(
            vault.config_path("core-plugins.json"),
            PathBuf::from("/v/.obsidian/core-plugins.json")
        );
    }
}
