pub mod add;
pub mod init;
pub mod log;
pub mod remove;
pub mod rename;
pub mod series;
pub mod show;
pub mod table;
pub mod tree;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use burnup::config::Config;
use burnup::graph::{Node, Project};
use burnup::parser::load_project;

pub fn project_path(dir: &Path) -> PathBuf {
    dir.join("project.json")
}

/// Load the project snapshot from the given directory.
/// Returns the project and the path to the snapshot (needed for save_project).
pub fn load_project_dir(dir: &Path) -> Result<(Project, PathBuf)> {
    let path = project_path(dir);
    if !path.exists() {
        anyhow::bail!("Project not initialized. Run 'burnup init' first.");
    }
    let project = load_project(&path).context("Failed to load project")?;
    Ok((project, path))
}

pub fn load_config(dir: &Path) -> Result<Config> {
    Config::load(dir).context("Failed to load config")
}

/// Resolve `id` to a node, defaulting to the first root.
pub fn resolve_node(project: &Project, id: Option<u64>) -> Result<&Node> {
    match id {
        Some(id) => Ok(project.find_or_err(id)?),
        None => project
            .root()
            .ok_or_else(|| anyhow::anyhow!("Project has no root node")),
    }
}

/// Contributor from `--user`, falling back to the configured default.
pub fn resolve_contributor(dir: &Path, user: Option<&str>) -> Result<String> {
    if let Some(user) = user {
        return Ok(user.to_string());
    }
    load_config(dir)?
        .project
        .default_contributor
        .ok_or_else(|| {
            anyhow::anyhow!("No contributor given. Pass --user or set project.default_contributor")
        })
}

/// Format a number without a trailing ".0" for whole values.
pub fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
