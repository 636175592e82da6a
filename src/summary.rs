//! Rolled-up totals per node, and the flat indented table built from them.

use crate::dates::{self, DateError};
use crate::graph::Node;
use chrono::NaiveDate;
use serde::Serialize;

/// A node's own data plus everything beneath it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryNode {
    pub id: u64,
    pub title: String,
    pub progress: f64,
    pub remaining: f64,
    pub total: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SummaryNode>,
}

/// One line of the summary table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub id: u64,
    pub title: String,
    pub level: usize,
    pub progress: f64,
    pub remaining: f64,
    pub total: f64,
}

/// Summarize each node of a forest, mirroring its shape.
pub fn summary_tree(nodes: &[Node]) -> Result<Vec<SummaryNode>, DateError> {
    nodes.iter().map(summarize).collect()
}

fn summarize(node: &Node) -> Result<SummaryNode, DateError> {
    let children = summary_tree(&node.nodes)?;
    let mut progress: f64 = children.iter().map(|c| c.progress).sum();
    let mut remaining: f64 = children.iter().map(|c| c.remaining).sum();

    if let Some(data) = &node.data {
        for (user, log) in data {
            let mut dated: Vec<(NaiveDate, f64, f64)> = Vec::with_capacity(log.len());
            for (raw, rec) in log {
                let date = dates::parse_record_date(node.id, user, raw)?;
                dated.push((date, rec.progress, rec.remaining));
            }
            // Stable: equal dates keep key order, so the later key wins.
            dated.sort_by_key(|(date, _, _)| *date);

            progress += dated.iter().map(|(_, p, _)| p).sum::<f64>();
            remaining += dated.last().map_or(0.0, |(_, _, r)| *r);
        }
    }

    Ok(SummaryNode {
        id: node.id,
        title: node.title.clone(),
        progress,
        remaining,
        total: progress + remaining,
        children,
    })
}

/// Pre-order rows for a forest, `level` 0 for the given nodes themselves.
pub fn summary_table(nodes: &[Node]) -> Result<Vec<SummaryRow>, DateError> {
    let tree = summary_tree(nodes)?;
    let mut rows = Vec::new();
    flatten(&tree, 0, &mut rows);
    Ok(rows)
}

fn flatten(nodes: &[SummaryNode], level: usize, rows: &mut Vec<SummaryRow>) {
    for node in nodes {
        rows.push(SummaryRow {
            id: node.id,
            title: node.title.clone(),
            level,
            progress: node.progress,
            remaining: node.remaining,
            total: node.total,
        });
        flatten(&node.children, level + 1, rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DataRecord;

    #[test]
    fn test_leaf_without_data_is_zero() {
        let s = summary_tree(&[Node::new(1, "Leaf")]).unwrap();
        assert_eq!(s[0].progress, 0.0);
        assert_eq!(s[0].remaining, 0.0);
        assert_eq!(s[0].total, 0.0);
        assert!(s[0].children.is_empty());
    }

    #[test]
    fn test_single_record() {
        let node = Node::new(1, "Leaf").with_record("alice", "2024-01-03", DataRecord::new(2.0, 8.0));
        let s = summary_tree(&[node]).unwrap();
        assert_eq!((s[0].progress, s[0].remaining, s[0].total), (2.0, 8.0, 10.0));
    }

    #[test]
    fn test_remaining_is_chronologically_last() {
        let node = Node::new(1, "Leaf")
            .with_record("alice", "2024-01-09", DataRecord::new(1.0, 3.0))
            .with_record("alice", "2024-01-01T10:00:00Z", DataRecord::new(1.0, 20.0))
            .with_record("alice", "2024-01-05", DataRecord::new(1.0, 6.0));
        let s = summary_tree(&[node]).unwrap();
        assert_eq!(s[0].progress, 3.0);
        assert_eq!(s[0].remaining, 3.0);
    }

    #[test]
    fn test_children_roll_up_into_parent() {
        let tree = vec![
            Node::new(1, "Root")
                .with_child(Node::new(2, "A").with_record("a", "2024-01-01", DataRecord::new(1.0, 2.0)))
                .with_child(Node::new(3, "B").with_record("b", "2024-01-01", DataRecord::new(1.0, 3.0))),
        ];
        let s = summary_tree(&tree).unwrap();
        assert_eq!(s[0].progress, 2.0);
        assert_eq!(s[0].remaining, 5.0);
        assert_eq!(s[0].total, 7.0);
    }

    #[test]
    fn test_own_data_adds_per_contributor() {
        let tree = vec![
            Node::new(1, "Root")
                .with_record("a", "2024-01-01", DataRecord::new(1.0, 4.0))
                .with_record("a", "2024-01-08", DataRecord::new(2.0, 1.0))
                .with_record("b", "2024-01-02", DataRecord::new(5.0, 5.0))
                .with_child(Node::new(2, "A").with_record("a", "2024-01-20", DataRecord::new(1.0, 1.0))),
        ];
        let s = summary_tree(&tree).unwrap();
        assert_eq!(s[0].progress, 1.0 + 1.0 + 2.0 + 5.0);
        assert_eq!(s[0].remaining, 1.0 + 1.0 + 5.0);
    }

    #[test]
    fn test_table_is_preorder_with_levels() {
        let tree = vec![
            Node::new(1, "Root")
                .with_child(Node::new(2, "A").with_child(Node::new(4, "A.1")))
                .with_child(Node::new(3, "B")),
        ];
        let rows = summary_table(&tree[0].nodes).unwrap();
        let shape: Vec<(&str, usize)> = rows.iter().map(|r| (r.title.as_str(), r.level)).collect();
        assert_eq!(shape, vec![("A", 0), ("A.1", 1), ("B", 0)]);
    }

    #[test]
    fn test_malformed_date_fails() {
        let tree = vec![Node::new(1, "Root").with_record("a", "nope", DataRecord::default())];
        assert!(summary_table(&tree).is_err());
    }
}
