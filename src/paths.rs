use std::path::{Component, Path};

pub(crate) const NOTE_EXTENSION: &str = ".md";
const BREADCRUMB_SEPARATOR: &str = " > ";

/// Name the host application knows the vault by: its last path segment.
pub fn vault_name(vault: &Path) -> String {
    // `Path::file_name` already ignores a trailing separator.
    vault
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Human-facing name of a note.
///
/// With a vault, the vault-relative path rendered as a breadcrumb
/// (`projects > alpha > plan`); without one, or when `path` is not under the
/// vault, just the file name.
pub fn display_name(path: &Path, vault: Option<&Path>, strip_extension: bool) -> String {
    let segments: Vec<String> = match vault.and_then(|v| path.strip_prefix(v).ok()) {
        Some(rel) if rel.components().next().is_some() => rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect(),
        _ => path
            .file_name()
            .map(|s| vec![s.to_string_lossy().into_owned()])
            .unwrap_or_default(),
    };

    let Some((last, parents)) = segments.split_last() else {
        return String::new();
    };
    let last = if strip_extension {
        strip_last_extension(last)
    } else {
        last.as_str()
    };

    let mut out = String::new();
    for p in parents {
        out.push_str(p);
        out.push_str(BREADCRUMB_SEPARATOR);
    }
    out.push_str(last);
    out
}

/// Appends `.md` unless the name already carries it.
pub fn with_md_extension(name: &str) -> String {
    if name.ends_with(NOTE_EXTENSION) {
        name.to_string()
    } else {
        format!("{name}{NOTE_EXTENSION}")
    }
}

fn strip_last_extension(name: &str) -> &str {
    match name.rfind('.') {
        // A leading dot marks a hidden file, not an extension.
        Some(ix) if ix > 0 => &name[..ix],
        _ => name,
    }
}
