use crate::graph::{DataRecord, Node, Project};
use crate::parser::save_project;
use std::path::{Path, PathBuf};

/// Create a leaf node with the given id and title.
pub fn make_node(id: u64, title: &str) -> Node {
    Node::new(id, title)
}

/// Create a leaf node carrying a single record.
pub fn make_logged_node(
    id: u64,
    title: &str,
    contributor: &str,
    date: &str,
    progress: f64,
    remaining: f64,
) -> Node {
    Node::new(id, title).with_record(contributor, date, DataRecord::new(progress, remaining))
}

/// Create a project directory at `dir` holding the given roots, and return
/// the path to the snapshot file.
pub fn setup_project(dir: &Path, roots: Vec<Node>) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join("project.json");
    save_project(&Project::from_roots(roots), &path).unwrap();
    path
}
