use anyhow::Result;
use burnup::graph::{DataRecord, find_path};
use serde::Serialize;
use std::path::Path;

use super::fmt_num;

#[derive(Debug, Serialize)]
struct ChildInfo {
    id: u64,
    title: String,
}

#[derive(Debug, Serialize)]
struct RecordInfo {
    contributor: String,
    date: String,
    #[serde(flatten)]
    record: DataRecord,
}

/// JSON output structure for show command
#[derive(Debug, Serialize)]
struct NodeDetails {
    id: u64,
    title: String,
    path: Vec<ChildInfo>,
    children: Vec<ChildInfo>,
    records: Vec<RecordInfo>,
}

pub fn run(dir: &Path, id: Option<u64>, json: bool) -> Result<()> {
    let (project, _path) = super::load_project_dir(dir)?;
    let node = super::resolve_node(&project, id)?;

    let path = find_path(project.roots(), node.id)
        .unwrap_or_default()
        .into_iter()
        .map(|n| ChildInfo {
            id: n.id,
            title: n.title.clone(),
        })
        .collect();

    let details = NodeDetails {
        id: node.id,
        title: node.title.clone(),
        path,
        children: node
            .nodes
            .iter()
            .map(|c| ChildInfo {
                id: c.id,
                title: c.title.clone(),
            })
            .collect(),
        records: node
            .records()
            .map(|(user, date, rec)| RecordInfo {
                contributor: user.to_string(),
                date: date.to_string(),
                record: *rec,
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&details)?);
    } else {
        print_human_readable(&details);
    }
    Ok(())
}

fn print_human_readable(details: &NodeDetails) {
    let crumbs: Vec<&str> = details.path.iter().map(|c| c.title.as_str()).collect();
    println!("Node: {}", details.id);
    println!("Title: {}", details.title);
    println!("Path: {}", crumbs.join(" > "));

    if !details.children.is_empty() {
        println!();
        println!("Children:");
        for child in &details.children {
            println!("  [{}] {}", child.id, child.title);
        }
    }

    println!();
    if details.records.is_empty() {
        println!("No records logged");
        return;
    }
    println!("Records:");
    println!("  {:<12} {:<16} {:>10} {:>10}", "DATE", "CONTRIBUTOR", "PROGRESS", "REMAINING");
    let mut rows: Vec<&RecordInfo> = details.records.iter().collect();
    rows.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.contributor.cmp(&b.contributor)));
    for r in rows {
        println!(
            "  {:<12} {:<16} {:>10} {:>10}",
            r.date,
            r.contributor,
            fmt_num(r.record.progress),
            fmt_num(r.record.remaining)
        );
    }
}
