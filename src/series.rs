//! Burn-up time series for a subtree.
//!
//! Every contributor is bucketed on the same week-aligned axis. Progress
//! accumulates across buckets; remaining carries forward and is replaced by
//! the last record visited in a bucket (visit order, not date order).

use crate::dates::{self, DateError};
use crate::graph::Node;
use crate::interval::{bucketize, chart_span};
use crate::visit::visit;
use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Inputs that are not part of the tree itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Charts always extend to this date.
    pub today: NaiveDate,
    /// First day of each weekly bucket.
    pub week_start: Weekday,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            today: dates::today(),
            week_start: Weekday::Sun,
        }
    }
}

/// A named sequence of `(epoch-millis, value)` points in ascending time order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub data: Vec<(i64, f64)>,
}

impl Series {
    fn new(name: &str, ends: &[i64], values: &[f64]) -> Self {
        Self {
            name: name.to_string(),
            data: ends.iter().copied().zip(values.iter().copied()).collect(),
        }
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().map(|(_, v)| *v)
    }

    pub fn last_value(&self) -> Option<f64> {
        self.data.last().map(|(_, v)| *v)
    }
}

/// Progress, Remaining and Total over the same buckets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSet {
    pub progress: Series,
    pub remaining: Series,
    pub total: Series,
}

impl SeriesSet {
    fn from_columns(ends: &[i64], progress: &[f64], remaining: &[f64]) -> Self {
        let total: Vec<f64> = progress.iter().zip(remaining).map(|(p, r)| p + r).collect();
        Self {
            progress: Series::new("Progress", ends, progress),
            remaining: Series::new("Remaining", ends, remaining),
            total: Series::new("Total", ends, &total),
        }
    }

    /// The three series in chart order.
    pub fn all(&self) -> [&Series; 3] {
        [&self.progress, &self.remaining, &self.total]
    }

    pub fn len(&self) -> usize {
        self.progress.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.progress.data.is_empty()
    }
}

/// Combined series plus each contributor's own series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingSeries {
    /// Bucket boundaries; bucket `t` is `[boundaries[t], boundaries[t + 1])`.
    pub boundaries: Vec<NaiveDate>,
    #[serde(flatten)]
    pub combined: SeriesSet,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub by_contributor: BTreeMap<String, SeriesSet>,
}

/// Everyone who logged anything in the forest.
pub fn contributors(nodes: &[Node]) -> BTreeSet<String> {
    fn walk(nodes: &[Node], out: &mut BTreeSet<String>) {
        for node in nodes {
            out.extend(node.contributors().map(String::from));
            walk(&node.nodes, out);
        }
    }
    let mut out = BTreeSet::new();
    walk(nodes, &mut out);
    out
}

/// Build the burn-up series for a forest.
pub fn tracking_series(nodes: &[Node], opts: &AggregateOptions) -> Result<TrackingSeries, DateError> {
    let span = chart_span(nodes, opts.today)?;
    let boundaries = bucketize(span.min, span.max, opts.week_start);
    let buckets = boundaries.len().saturating_sub(1);
    let ends: Vec<i64> = boundaries.iter().skip(1).map(|d| dates::epoch_millis(*d)).collect();

    let mut sum_progress = vec![0.0; buckets];
    let mut sum_remaining = vec![0.0; buckets];
    let mut by_contributor = BTreeMap::new();

    let first = boundaries.first().copied().unwrap_or(span.min);
    let last = boundaries.last().copied().unwrap_or(first);

    for user in contributors(nodes) {
        // One walk per contributor; each record lands in the bucket whose
        // start is the last boundary on or before its date.
        let mut added = vec![0.0; buckets];
        let mut overrides: Vec<Option<f64>> = vec![None; buckets];
        visit(nodes, &user, first, last, &mut |date, rec| {
            let t = boundaries.partition_point(|b| *b <= date) - 1;
            added[t] += rec.progress;
            overrides[t] = Some(rec.remaining);
        })?;

        let mut progress = vec![0.0; buckets];
        let mut remaining = vec![0.0; buckets];
        let (mut p, mut r) = (0.0, 0.0);
        for t in 0..buckets {
            p += added[t];
            r = overrides[t].unwrap_or(r);
            progress[t] = p;
            remaining[t] = r;
            sum_progress[t] += p;
            sum_remaining[t] += r;
        }

        by_contributor.insert(user, SeriesSet::from_columns(&ends, &progress, &remaining));
    }

    tracing::debug!(
        buckets,
        contributors = by_contributor.len(),
        "built tracking series"
    );

    Ok(TrackingSeries {
        boundaries,
        combined: SeriesSet::from_columns(&ends, &sum_progress, &sum_remaining),
        by_contributor,
    })
}
