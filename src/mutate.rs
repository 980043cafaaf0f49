use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::paths::{NOTE_EXTENSION, with_md_extension};
use crate::{Error, Result, Vault};

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

impl Vault {
    /// Creates `<vault>/<name>.md` with a `# <name>` heading.
    ///
    /// `name` is taken verbatim: `.md` is always appended, even when `name`
    /// already ends in it. An existing note is left untouched; the path is
    /// returned either way.
    pub fn create_note(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() {
            return Err(Error::EmptyNoteName);
        }
        let path = self.root().join(format!("{name}{NOTE_EXTENSION}"));
        ensure_parent(&path)?;

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => {
                write_new_note(file, &path, &format!("# {name}"))?;
                info!(path = %path.display(), "note created");
            }
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(err) => return Err(Error::io(&path, err)),
        }
        Ok(path)
    }

    /// Appends a line break and `content` to a note, creating it if needed.
    ///
    /// An empty `file` targets today's daily note.
    pub fn append_to_note(&self, file: &str, content: &str) -> Result<PathBuf> {
        let path = if file.is_empty() {
            self.daily_path().path
        } else {
            self.root().join(with_md_extension(file))
        };
        ensure_parent(&path)?;

        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| Error::io(&path, e))?;
        f.write_all(format!("{LINE_ENDING}{content}").as_bytes())
            .map_err(|e| Error::io(&path, e))?;

        info!(path = %path.display(), bytes = content.len(), "appended to note");
        Ok(path)
    }
}

/// Writes the body of a freshly created note, removing the file on failure.
fn write_new_note<W: Write>(mut file: W, path: &Path, body: &str) -> Result<()> {
    if let Err(err) = file.write_all(body.as_bytes()) {
        drop(file);
        let _ = std::fs::remove_file(path);
        return Err(Error::io(path, err));
    }
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))
        }
        _ => Ok(()),
    }
}
