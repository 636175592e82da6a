use anyhow::{Context, Result};
use burnup::parser::save_project;
use std::path::Path;

/// Add a child item under `parent`
pub fn run(dir: &Path, parent: u64, title: Option<&str>, json: bool) -> Result<u64> {
    let (mut project, path) = super::load_project_dir(dir)?;

    let id = project.add_child(parent, title)?;
    save_project(&project, &path).context("Failed to save project")?;

    let node = super::resolve_node(&project, Some(id))?;
    tracing::info!(id, parent, "added node");
    if json {
        println!("{}", serde_json::to_string_pretty(node)?);
    } else {
        println!("Added node {} '{}' under {}", id, node.title, parent);
    }
    Ok(id)
}
