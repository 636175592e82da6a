use anyhow::{Context, Result};
use burnup::parser::save_project;
use dialoguer::Confirm;
use std::io::IsTerminal;
use std::path::Path;

/// Delete a contributor's record for a date. Without `yes`, asks first.
pub fn run(dir: &Path, id: u64, date: &str, user: Option<&str>, yes: bool) -> Result<bool> {
    let user = super::resolve_contributor(dir, user)?;
    let (mut project, path) = super::load_project_dir(dir)?;

    if !yes {
        if !std::io::stdin().is_terminal() {
            anyhow::bail!("Refusing to delete without confirmation. Pass --yes.");
        }
        let confirmed = Confirm::new()
            .with_prompt("Are you sure? There is no undo.")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Nothing removed");
            return Ok(false);
        }
    }

    project.remove_record(id, &user, date)?;
    save_project(&project, &path).context("Failed to save project")?;

    tracing::info!(id, user = %user, date, "removed record");
    println!("Removed {}'s record for {} from node {}", user, date, id);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use burnup::parser::load_project;
    use burnup::test_helpers::{make_logged_node, setup_project};
    use tempfile::TempDir;

    #[test]
    fn test_remove_with_yes() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(".burnup");
        let path = setup_project(
            &dir,
            vec![make_logged_node(1, "Root", "alice", "2024-01-03", 1.0, 2.0)],
        );

        assert!(run(&dir, 1, "2024-01-03", Some("alice"), true).unwrap());
        assert!(!load_project(&path).unwrap().root().unwrap().has_data());
    }

    #[test]
    fn test_remove_missing_record_fails() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(".burnup");
        setup_project(
            &dir,
            vec![make_logged_node(1, "Root", "alice", "2024-01-03", 1.0, 2.0)],
        );

        let err = run(&dir, 1, "2024-01-04", Some("alice"), true).unwrap_err();
        assert!(err.to_string().contains("No record"));
    }
}
