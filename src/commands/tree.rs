use anyhow::Result;
use burnup::graph::preorder;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct OutlineEntry<'a> {
    id: u64,
    title: &'a str,
    depth: usize,
    records: usize,
}

/// Print the whole project as an indented outline
pub fn run(dir: &Path, json: bool) -> Result<()> {
    let (project, _path) = super::load_project_dir(dir)?;

    let entries: Vec<OutlineEntry> = preorder(project.roots())
        .into_iter()
        .map(|(depth, node)| OutlineEntry {
            id: node.id,
            title: &node.title,
            depth,
            records: node.records().count(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        let logged = if entry.records > 0 {
            format!(" ({} records)", entry.records)
        } else {
            String::new()
        };
        println!("{}[{}] {}{}", "  ".repeat(entry.depth), entry.id, entry.title, logged);
    }

    let dups = project.duplicate_ids();
    if !dups.is_empty() {
        eprintln!("Warning: duplicate node ids {:?}; lookups resolve to the first match", dups);
    }
    Ok(())
}
