use anyhow::{Context, Result};
use burnup::graph::Project;
use burnup::parser::save_project;
use std::fs;
use std::path::Path;

use super::project_path;

/// Default content for .burnup/.gitignore
const GITIGNORE_CONTENT: &str = r#"# Burnup gitignore
project.lock
.project.tmp.*
"#;

pub fn run(dir: &Path, title: &str) -> Result<()> {
    if dir.exists() {
        anyhow::bail!("Project already initialized at {}", dir.display());
    }

    fs::create_dir_all(dir).context("Failed to create project directory")?;

    save_project(&Project::new(title), project_path(dir)).context("Failed to create project.json")?;

    let gitignore_path = dir.join(".gitignore");
    fs::write(&gitignore_path, GITIGNORE_CONTENT).context("Failed to create .gitignore")?;

    println!("Initialized project '{}' at {}", title, dir.display());
    Ok(())
}
