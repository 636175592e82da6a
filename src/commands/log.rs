use anyhow::{Context, Result};
use burnup::dates;
use burnup::graph::DataRecord;
use burnup::parser::save_project;
use std::path::Path;

use super::fmt_num;

/// Log progress and remaining effort for a contributor on a node
pub fn run(
    dir: &Path,
    id: u64,
    date: Option<&str>,
    progress: f64,
    remaining: f64,
    user: Option<&str>,
) -> Result<()> {
    let user = super::resolve_contributor(dir, user)?;
    let date = match date {
        Some(d) => d.to_string(),
        None => dates::today().format(dates::DATE_FORMAT).to_string(),
    };

    let (mut project, path) = super::load_project_dir(dir)?;
    let replaced = project.log_record(id, &user, &date, DataRecord::new(progress, remaining))?;
    save_project(&project, &path).context("Failed to save project")?;

    tracing::info!(id, user = %user, date = %date, "logged record");
    match replaced {
        Some(old) => println!(
            "Updated {} on node {} for {}: progress {} -> {}, remaining {} -> {}",
            date,
            id,
            user,
            fmt_num(old.progress),
            fmt_num(progress),
            fmt_num(old.remaining),
            fmt_num(remaining)
        ),
        None => println!(
            "Logged {} on node {} for {}: progress {}, remaining {}",
            date,
            id,
            user,
            fmt_num(progress),
            fmt_num(remaining)
        ),
    }
    Ok(())
}
