use oxidian_launcher::{UrlMode, Vault};

fn make_vault() -> anyhow::Result<(tempfile::TempDir, Vault)> {
    let temp = tempfile::tempdir()?;
    let root = temp.path().join("vault");
    std::fs::create_dir_all(&root)?;
    let vault = Vault::open(&root)?;
    Ok((temp, vault))
}

#[test]
fn create_note_is_idempotent() -> anyhow::Result<()> {
    let (_temp, vault) = make_vault()?;
    let first = vault.create_note("Meeting Notes")?;
    let second = vault.create_note("Meeting Notes")?;
    assert_eq!(first, second);
    assert_eq!(std::fs::read_to_string(&first)?, "# Meeting Notes");
    Ok(())
}

#[test]
fn created_note_is_searchable_and_linkable() -> anyhow::Result<()> {
    let (_temp, vault) = make_vault()?;
    let path = vault.create_note("projects/Launch Plan")?;
    assert!(path.ends_with("projects/Launch Plan.md"));

    let notes = vault.search_notes("launch");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].name, "projects > Launch Plan");
    assert_eq!(notes[0].path, path);

    assert_eq!(
        vault.url(&path.to_string_lossy(), UrlMode::Open),
        "obsidian://open?vault=vault&file=projects%2FLaunch%20Plan.md"
    );
    Ok(())
}

#[test]
fn append_without_file_targets_daily_note() -> anyhow::Result<()> {
    let (_temp, vault) = make_vault()?;
    std::fs::create_dir_all(vault.root().join(".obsidian"))?;
    std::fs::write(
        vault.root().join(".obsidian/daily-notes.json"),
        r#"{"folder": "Daily"}"#,
    )?;

    let expected = vault.daily_path().path;
    let written = vault.append_to_note("", "- [ ] call back")?;
    assert_eq!(written, expected);
    assert!(written.starts_with(vault.root().join("Daily")));

    let text = std::fs::read_to_string(&written)?;
    assert!(text.ends_with("- [ ] call back"));
    assert_eq!(text.lines().filter(|l| !l.is_empty()).count(), 1);
    Ok(())
}

#[test]
fn append_keeps_existing_content() -> anyhow::Result<()> {
    let (_temp, vault) = make_vault()?;
    let path = vault.create_note("Inbox")?;
    vault.append_to_note("Inbox", "quick thought")?;
    let text = std::fs::read_to_string(&path)?;
    assert!(text.starts_with("# Inbox"));
    assert!(text.ends_with("quick thought"));
    assert_eq!(text.lines().count(), 2);
    Ok(())
}
