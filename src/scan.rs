use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::Vault;
use crate::fuzzy::{FuzzyScorer, NucleoScorer, rank};
use crate::paths::display_name;

/// A search result, ready for display by the launcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    /// Breadcrumb display name (`folder > note`).
    pub name: String,
    /// Absolute path of the `.md` file.
    pub path: PathBuf,
    /// Star rating for name searches, context snippet for substring searches.
    pub description: String,
}

/// How a substring scan treats its query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// `#tag` lookup. An empty query matches nothing and skips the scan.
    Tag,
    /// Arbitrary substring. The query is used as given (lowercased).
    Content,
}

impl ScanMode {
    /// Turns raw user input into the needle to search for, or `None` when the
    /// scan should not run at all.
    fn needle(self, query: &str) -> Option<String> {
        let q = query.to_lowercase();
        match self {
            Self::Tag if q.is_empty() => None,
            Self::Tag if q.starts_with('#') => Some(q),
            Self::Tag => Some(format!("#{q}")),
            Self::Content => Some(q),
        }
    }
}

/// Star rating for a fuzzy score. Thresholds are half-open: `[95, ∞)` is five
/// stars, `[75, 95)` three, `[50, 75)` two, `[25, 50)` one.
pub fn star_count(score: f64) -> usize {
    if score >= 95.0 {
        5
    } else if score >= 75.0 {
        3
    } else if score >= 50.0 {
        2
    } else if score >= 25.0 {
        1
    } else {
        0
    }
}

pub fn star_rating(score: f64) -> String {
    "🌟".repeat(star_count(score))
}

impl Vault {
    /// Every markdown file under the vault, sorted by path within each directory.
    pub fn markdown_files(&self) -> Vec<PathBuf> {
        let root = self.root();
        walkdir::WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || e.path()
                        .strip_prefix(root)
                        .map(|rel| !self.is_ignored_rel(rel))
                        .unwrap_or(false)
            })
            .filter_map(|e| match e {
                Ok(e) => Some(e),
                Err(err) => {
                    debug!(error = %err, "skipping unreadable vault entry");
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
            .collect()
    }

    /// Fuzzy search by note name with the default scorer.
    pub fn search_notes(&self, query: &str) -> Vec<Note> {
        self.search_notes_with(&mut NucleoScorer::new(), query)
    }

    /// Fuzzy search by note name, annotated with a star rating.
    pub fn search_notes_with<S: FuzzyScorer + ?Sized>(
        &self,
        scorer: &mut S,
        query: &str,
    ) -> Vec<Note> {
        let files = self.markdown_files();
        rank(scorer, query, &files)
            .into_iter()
            .map(|hit| Note {
                name: display_name(&hit.path, Some(self.root()), true),
                description: star_rating(hit.score),
                path: hit.path,
            })
            .collect()
    }

    /// Notes containing `#tag`, one hit per note.
    pub fn search_tags(&self, query: &str) -> Vec<Note> {
        self.scan(ScanMode::Tag, query)
    }

    /// Notes containing `query` anywhere, one hit per note.
    pub fn search_content(&self, query: &str) -> Vec<Note> {
        self.scan(ScanMode::Content, query)
    }

    /// Case-insensitive substring scan shared by tag and content search.
    pub fn scan(&self, mode: ScanMode, query: &str) -> Vec<Note> {
        let Some(needle) = mode.needle(query) else {
            return Vec::new();
        };

        let out = self.scan_files(&self.markdown_files(), &needle);
        debug!(?mode, needle = %needle, hits = out.len(), "vault scan finished");
        out
    }

    /// First hit of `needle` in each of `files`. Files that vanished or cannot
    /// be read are skipped.
    fn scan_files(&self, files: &[PathBuf], needle: &str) -> Vec<Note> {
        files
            .iter()
            .filter_map(|path| {
                let snippet = first_hit_in_file(path, needle, self.config().context_chars)?;
                Some(Note {
                    name: display_name(path, Some(self.root()), true),
                    path: path.clone(),
                    description: snippet,
                })
            })
            .collect()
    }
}

fn first_hit_in_file(path: &Path, needle: &str, context: usize) -> Option<String> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "skipping unreadable note");
            return None;
        }
    };

    for line in BufReader::new(file).split(b'\n') {
        let line = match line {
            Ok(l) => l,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "note read failed mid-scan");
                return None;
            }
        };
        let line = String::from_utf8_lossy(&line).to_lowercase();
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if let Some(snippet) = context_window(line, needle, context) {
            return Some(snippet);
        }
    }
    None
}

/// The first occurrence of `needle` in `line` with up to `context` characters
/// on either side. An empty needle never matches.
fn context_window(line: &str, needle: &str, context: usize) -> Option<String> {
    if needle.is_empty() {
        return None;
    }
    let start = line.find(needle)?;
    let before = &line[..start];
    let after = &line[start + needle.len()..];

    let skip = before.chars().count().saturating_sub(context);
    let mut out: String = before.chars().skip(skip).collect();
    out.push_str(needle);
    out.extend(after.chars().take(context));
    Some(out)
}
