use anyhow::{Context, Result};
use burnup::summary::{SummaryRow, summary_table};
use std::path::Path;

use super::fmt_num;

/// Print the rolled-up summary of a node's children
pub fn run(dir: &Path, id: Option<u64>, json: bool) -> Result<Vec<SummaryRow>> {
    let (project, _path) = super::load_project_dir(dir)?;
    let node = super::resolve_node(&project, id)?;

    let rows = summary_table(&node.nodes)
        .with_context(|| format!("Failed to summarize node {}", node.id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else if rows.is_empty() {
        println!("'{}' has no sub-items", node.title);
    } else {
        print_table(&rows);
    }
    Ok(rows)
}

fn print_table(rows: &[SummaryRow]) {
    let width = rows
        .iter()
        .map(|r| r.level * 2 + r.title.chars().count())
        .max()
        .unwrap_or(0)
        .max(5);
    println!("{:<width$}  {:>10} {:>10} {:>10}", "ITEM", "PROGRESS", "REMAINING", "TOTAL", width = width);
    for row in rows {
        let label = format!("{}{}", "  ".repeat(row.level), row.title);
        println!(
            "{:<width$}  {:>10} {:>10} {:>10}",
            label,
            fmt_num(row.progress),
            fmt_num(row.remaining),
            fmt_num(row.total),
            width = width
        );
    }
}
