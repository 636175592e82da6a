use crate::dates::{self, DateError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Records logged by one contributor on one node, keyed by date string.
pub type ContributorLog = BTreeMap<String, DataRecord>;

/// All records logged on one node, keyed by contributor name.
pub type DataLog = BTreeMap<String, ContributorLog>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("Node {0} not found")]
    NodeNotFound(u64),
    #[error("No record for '{contributor}' on {date} at node {node}")]
    RecordNotFound {
        node: u64,
        contributor: String,
        date: String,
    },
    #[error("{field} must be >= 0 (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("Contributor name must not be empty")]
    EmptyContributor,
    #[error(transparent)]
    Date(#[from] DateError),
}

/// A single progress/remaining-effort entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct DataRecord {
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub remaining: f64,
}

impl DataRecord {
    pub fn new(progress: f64, remaining: f64) -> Self {
        Self {
            progress,
            remaining,
        }
    }
}

/// A tree element: a named work item with ordered children and its own log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DataLog>,
}

impl Node {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            nodes: Vec::new(),
            data: None,
        }
    }

    /// Builder-style helper to append a child.
    pub fn with_child(mut self, child: Node) -> Self {
        self.nodes.push(child);
        self
    }

    /// Builder-style helper to set a record, overwriting any with the same key.
    pub fn with_record(mut self, contributor: &str, date: &str, record: DataRecord) -> Self {
        self.data
            .get_or_insert_with(DataLog::new)
            .entry(contributor.to_string())
            .or_default()
            .insert(date.to_string(), record);
        self
    }

    pub fn has_data(&self) -> bool {
        self.data
            .as_ref()
            .is_some_and(|d| d.values().any(|log| !log.is_empty()))
    }

    /// Contributors with records on this node (not descendants).
    pub fn contributors(&self) -> impl Iterator<Item = &str> {
        self.data.iter().flat_map(|d| d.keys().map(String::as_str))
    }

    /// This node's own records as `(contributor, date, record)`.
    pub fn records(&self) -> impl Iterator<Item = (&str, &str, &DataRecord)> {
        self.data.iter().flat_map(|d| {
            d.iter().flat_map(|(user, log)| {
                log.iter()
                    .map(move |(date, rec)| (user.as_str(), date.as_str(), rec))
            })
        })
    }
}

/// Depth-first, pre-order search for `id` across a forest.
pub fn find(nodes: &[Node], id: u64) -> Option<&Node> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find(&node.nodes, id) {
            return Some(found);
        }
    }
    None
}

pub fn find_mut(nodes: &mut [Node], id: u64) -> Option<&mut Node> {
    for node in nodes.iter_mut() {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_mut(&mut node.nodes, id) {
            return Some(found);
        }
    }
    None
}

/// Root-to-node chain of the first node matching `id`.
pub fn find_path(nodes: &[Node], id: u64) -> Option<Vec<&Node>> {
    for node in nodes {
        if node.id == id {
            return Some(vec![node]);
        }
        if let Some(mut path) = find_path(&node.nodes, id) {
            path.insert(0, node);
            return Some(path);
        }
    }
    None
}

/// Pre-order flattening of a forest, each node tagged with its depth.
pub fn preorder(nodes: &[Node]) -> Vec<(usize, &Node)> {
    fn walk<'a>(nodes: &'a [Node], depth: usize, out: &mut Vec<(usize, &'a Node)>) {
        for node in nodes {
            out.push((depth, node));
            walk(&node.nodes, depth + 1, out);
        }
    }
    let mut out = Vec::new();
    walk(nodes, 0, &mut out);
    out
}

/// A project: the forest of root items, stored as a plain JSON array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Project {
    roots: Vec<Node>,
}

impl Project {
    /// A fresh project with a single root of id 1.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            roots: vec![Node::new(1, title)],
        }
    }

    pub fn from_roots(roots: Vec<Node>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    pub fn root(&self) -> Option<&Node> {
        self.roots.first()
    }

    pub fn find(&self, id: u64) -> Option<&Node> {
        find(&self.roots, id)
    }

    pub fn find_or_err(&self, id: u64) -> Result<&Node, EditError> {
        self.find(id).ok_or(EditError::NodeNotFound(id))
    }

    fn find_mut_or_err(&mut self, id: u64) -> Result<&mut Node, EditError> {
        find_mut(&mut self.roots, id).ok_or(EditError::NodeNotFound(id))
    }

    pub fn len(&self) -> usize {
        preorder(&self.roots).len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Next identifier to hand out: one past the largest id in use.
    pub fn next_id(&self) -> u64 {
        preorder(&self.roots)
            .iter()
            .map(|(_, n)| n.id)
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Ids that occur more than once, in ascending order.
    ///
    /// Snapshots built with the decimal `parent*10 + index` scheme collide
    /// once a node has ten or more children.
    pub fn duplicate_ids(&self) -> Vec<u64> {
        let mut counts: HashMap<u64, usize> = HashMap::new();
        for (_, node) in preorder(&self.roots) {
            *counts.entry(node.id).or_default() += 1;
        }
        let mut dups: Vec<u64> = counts
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(id, _)| id)
            .collect();
        dups.sort_unstable();
        dups
    }

    /// Append a child to `parent_id`, returning the new node's id.
    ///
    /// Without a title the child is named after its parent and position,
    /// e.g. the third child of "Launch" is "Launch.3".
    pub fn add_child(&mut self, parent_id: u64, title: Option<&str>) -> Result<u64, EditError> {
        let id = self.next_id();
        let parent = self.find_mut_or_err(parent_id)?;
        let title = match title {
            Some(t) => t.to_string(),
            None => format!("{}.{}", parent.title, parent.nodes.len() + 1),
        };
        parent.nodes.push(Node::new(id, title));
        Ok(id)
    }

    pub fn rename(&mut self, id: u64, title: &str) -> Result<(), EditError> {
        self.find_mut_or_err(id)?.title = title.to_string();
        Ok(())
    }

    /// Log a record, replacing any existing one for the same contributor and
    /// calendar date. Returns the replaced record.
    pub fn log_record(
        &mut self,
        node_id: u64,
        contributor: &str,
        date: &str,
        record: DataRecord,
    ) -> Result<Option<DataRecord>, EditError> {
        if contributor.trim().is_empty() {
            return Err(EditError::EmptyContributor);
        }
        check_non_negative("progress", record.progress)?;
        check_non_negative("remaining", record.remaining)?;
        let key = dates::normalize(date)?;
        let day = dates::parse_date(&key)?;

        let node = self.find_mut_or_err(node_id)?;
        let log = node
            .data
            .get_or_insert_with(DataLog::new)
            .entry(contributor.to_string())
            .or_default();

        // Older snapshots may key the same day in another textual form.
        let same_day: Vec<String> = log
            .keys()
            .filter(|k| **k != key && dates::parse_date(k).ok() == Some(day))
            .cloned()
            .collect();
        let mut previous = None;
        for k in same_day {
            previous = log.remove(&k);
        }
        Ok(log.insert(key, record).or(previous))
    }

    /// Remove a contributor's record for a calendar date.
    pub fn remove_record(
        &mut self,
        node_id: u64,
        contributor: &str,
        date: &str,
    ) -> Result<DataRecord, EditError> {
        let node = self.find_mut_or_err(node_id)?;
        let not_found = || EditError::RecordNotFound {
            node: node_id,
            contributor: contributor.to_string(),
            date: date.to_string(),
        };

        let data = node.data.as_mut().ok_or_else(not_found)?;
        let log = data.get_mut(contributor).ok_or_else(not_found)?;
        // Exact key first, so records under unparseable keys can still be removed.
        let key = if log.contains_key(date) {
            date.to_string()
        } else {
            let day = dates::parse_date(date)?;
            log.keys()
                .find(|k| dates::parse_date(k).ok() == Some(day))
                .cloned()
                .ok_or_else(not_found)?
        };
        let removed = log.remove(&key).ok_or_else(not_found)?;

        if log.is_empty() {
            data.remove(contributor);
        }
        if data.is_empty() {
            node.data = None;
        }
        Ok(removed)
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), EditError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EditError::Negative { field, value })
    }
}
