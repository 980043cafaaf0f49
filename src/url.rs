use std::path::{Component, Path};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::Vault;
use crate::config::DEFAULT_URL_SCHEME;
use crate::paths::{vault_name, with_md_extension};

/// Everything but RFC 3986 unreserved characters is escaped, `/` included.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlMode {
    /// Open an existing note.
    Open,
    /// Create the note if needed, then open it.
    New,
}

impl UrlMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::New => "new",
        }
    }
}

impl std::fmt::Display for UrlMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deep link to `note` in the `obsidian` scheme.
///
/// `note` may be a path under `vault`, a vault-relative path or a bare name;
/// anything that does not resolve under `vault` is passed through as-is.
pub fn build_url(vault: &Path, note: &str, mode: UrlMode) -> String {
    build_url_with_scheme(DEFAULT_URL_SCHEME, vault, note, mode)
}

pub fn build_url_with_scheme(scheme: &str, vault: &Path, note: &str, mode: UrlMode) -> String {
    let name = vault_name(vault);
    let note = with_md_extension(note);
    let file = relative_to_vault(vault, Path::new(&note)).unwrap_or(note);

    format!(
        "{scheme}://{mode}?vault={}&file={}",
        utf8_percent_encode(&name, QUERY_VALUE),
        utf8_percent_encode(&file, QUERY_VALUE),
    )
}

/// `note` relative to `vault`, joined with `/`, when `vault` is a proper prefix.
fn relative_to_vault(vault: &Path, note: &Path) -> Option<String> {
    let rel = note.strip_prefix(vault).ok()?;
    let parts: Vec<_> = rel
        .components()
        .map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Option<_>>()?;
    (!parts.is_empty()).then(|| parts.join("/"))
}

impl Vault {
    pub fn url(&self, note: &str, mode: UrlMode) -> String {
        build_url_with_scheme(&self.config().url_scheme, self.root(), note, mode)
    }

    /// Deep link to today's daily note: `open` when it exists, `new` otherwise.
    pub fn daily_url(&self) -> String {
        let daily = self.daily_path();
        let mode = if daily.exists {
            UrlMode::Open
        } else {
            UrlMode::New
        };
        let note = if daily.folder.is_empty() {
            daily.date
        } else {
            format!("{}/{}", daily.folder, daily.date)
        };
        self.url(&note, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_uses_fallback() {
        assert_eq!(
            build_url(Path::new("/a/vault"), "Test Note", UrlMode::Open),
            "obsidian://open?vault=vault&file=Test%20Note.md"
        );
        assert_eq!(
            build_url(Path::new("~/vault"), "test.md", UrlMode::Open),
            "obsidian://open?vault=vault&file=test.md"
        );
    }

    #[test]
    fn path_under_vault_becomes_relative() {
        assert_eq!(
            build_url(Path::new("/a/vault/"), "/a/vault/sub/Note", UrlMode::Open),
            "obsidian://open?vault=vault&file=sub%2FNote.md"
        );
        assert_eq!(
            build_url(Path::new("~/vault"), "~/vault/test", UrlMode::Open),
            "obsidian://open?vault=vault&file=test.md"
        );
    }

    #[test]
    fn new_mode_and_trailing_separator() {
        assert_eq!(
            build_url(
                Path::new("/home/kira/Documents/main_notes/"),
                "Ulauncher Test",
                UrlMode::New
            ),
            "obsidian://new?vault=main_notes&file=Ulauncher%20Test.md"
        );
    }

    #[test]
    fn special_characters_are_escaped() {
        assert_eq!(
            build_url(Path::new("/v/My Vault"), "Java - Programming Language", UrlMode::Open),
            "obsidian://open?vault=My%20Vault&file=Java%20-%20Programming%20Language.md"
        );
        assert_eq!(
            build_url(Path::new("/v"), "a&b=c?#", UrlMode::Open),
            "obsidian://open?vault=v&file=a%26b%3Dc%3F%23.md"
        );
        assert_eq!(
            build_url(Path::new("/v"), "Café", UrlMode::Open),
            "obsidian://open?vault=v&file=Caf%C3%A9.md"
        );
    }

    #[test]
    fn sibling_with_shared_string_prefix_is_not_relative() {
        assert_eq!(
            build_url(Path::new("/a/vault"), "/a/vault2/x", UrlMode::Open),
            "obsidian://open?vault=vault&file=%2Fa%2Fvault2%2Fx.md"
        );
    }

    #[test]
    fn custom_scheme() {
        assert_eq!(
            build_url_with_scheme("obsidian-dev", Path::new("/v"), "x", UrlMode::New),
            "obsidian-dev://new?vault=v&file=x.md"
        );
    }
}
