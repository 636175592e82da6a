use anyhow::{Context, Result};
use burnup::parser::save_project;
use std::path::Path;

pub fn run(dir: &Path, id: u64, title: &str) -> Result<()> {
    let (mut project, path) = super::load_project_dir(dir)?;

    project.rename(id, title)?;
    save_project(&project, &path).context("Failed to save project")?;

    println!("Renamed node {} to '{}'", id, title);
    Ok(())
}
