use anyhow::{Context, Result};
use burnup::series::{SeriesSet, TrackingSeries, tracking_series};
use chrono::DateTime;
use std::path::Path;

use super::fmt_num;

/// Print weekly burn-up series for a node (the first root by default).
/// Per-contributor series are included only with `by_contributor`.
pub fn run(dir: &Path, id: Option<u64>, by_contributor: bool, json: bool) -> Result<TrackingSeries> {
    let (project, _path) = super::load_project_dir(dir)?;
    let opts = super::load_config(dir)?.aggregate_options()?;
    let node = super::resolve_node(&project, id)?;

    let mut series = tracking_series(std::slice::from_ref(node), &opts)
        .with_context(|| format!("Failed to build series for node {}", node.id))?;
    if !by_contributor {
        series.by_contributor.clear();
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&series)?);
    } else {
        print_human_output(&node.title, &series);
    }
    Ok(series)
}

fn week_label(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| millis.to_string())
}

fn print_rows(set: &SeriesSet) {
    let [progress, remaining, total] = set.all();
    for t in 0..set.len() {
        println!(
            "  {:<12} {:>10} {:>10} {:>10}",
            week_label(progress.data[t].0),
            fmt_num(progress.data[t].1),
            fmt_num(remaining.data[t].1),
            fmt_num(total.data[t].1)
        );
    }
}

fn print_human_output(title: &str, series: &TrackingSeries) {
    println!("Burn-up: {}", title);
    println!();
    println!("  {:<12} {:>10} {:>10} {:>10}", "WEEK ENDING", "PROGRESS", "REMAINING", "TOTAL");
    print_rows(&series.combined);

    for (user, set) in &series.by_contributor {
        println!();
        println!("  {}:", user);
        print_rows(set);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burnup::test_helpers::{make_logged_node, setup_project};
    use tempfile::TempDir;

    #[test]
    fn test_week_label() {
        assert_eq!(week_label(0), "1970-01-01");
        assert_eq!(week_label(7 * 24 * 60 * 60 * 1000), "1970-01-08");
    }

    #[test]
    fn test_series_unknown_node_fails() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(".burnup");
        setup_project(&dir, vec![make_logged_node(1, "Root", "a", "2024-01-03", 1.0, 1.0)]);

        assert!(run(&dir, Some(1), false, true).is_ok());
        let err = run(&dir, Some(9), false, true).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_series_by_contributor_flag_applies_to_json() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(".burnup");
        setup_project(&dir, vec![make_logged_node(1, "Root", "a", "2024-01-03", 1.0, 1.0)]);

        let plain = run(&dir, None, false, true).unwrap();
        assert!(plain.by_contributor.is_empty());
        assert!(serde_json::to_value(&plain).unwrap().get("by_contributor").is_none());

        let detailed = run(&dir, None, true, true).unwrap();
        assert!(detailed.by_contributor.contains_key("a"));
        assert_eq!(detailed.combined, plain.combined);
    }

    #[test]
    fn test_series_malformed_date_fails() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(".burnup");
        setup_project(&dir, vec![make_logged_node(1, "Root", "a", "3rd of May", 1.0, 1.0)]);

        let err = run(&dir, None, false, false).unwrap_err();
        assert!(format!("{:#}", err).contains("3rd of May"));
    }
}
