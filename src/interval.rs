//! Week-aligned time axis for burn-up charts.

use crate::dates::{self, DateError};
use crate::graph::Node;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;

/// Inclusive range of calendar dates covered by logged records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateSpan {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateSpan {
    fn include(&mut self, date: NaiveDate) {
        self.min = self.min.min(date);
        self.max = self.max.max(date);
    }

    /// Span for a subtree with nothing logged: just `today`.
    pub fn today(today: NaiveDate) -> Self {
        Self {
            min: today,
            max: today,
        }
    }
}

/// Earliest and latest record date anywhere in the forest.
///
/// Returns `Ok(None)` when no records exist.
pub fn date_span(nodes: &[Node]) -> Result<Option<DateSpan>, DateError> {
    let mut span: Option<DateSpan> = None;
    collect_span(nodes, &mut span)?;
    Ok(span)
}

fn collect_span(nodes: &[Node], span: &mut Option<DateSpan>) -> Result<(), DateError> {
    for node in nodes {
        for (user, raw, _) in node.records() {
            let date = dates::parse_record_date(node.id, user, raw)?;
            match span {
                Some(s) => s.include(date),
                None => *span = Some(DateSpan::today(date)),
            }
        }
        collect_span(&node.nodes, span)?;
    }
    Ok(())
}

/// Span to chart: the logged span with `max` pulled forward to `today`, or a
/// span of just `today` when nothing is logged.
pub fn chart_span(nodes: &[Node], today: NaiveDate) -> Result<DateSpan, DateError> {
    let mut span = date_span(nodes)?.unwrap_or(DateSpan::today(today));
    if span.max < today {
        span.max = today;
    }
    Ok(span)
}

/// Most recent `week_start` on or before `date`.
pub fn week_floor(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let back = (date.weekday().num_days_from_sunday() + 7 - week_start.num_days_from_sunday()) % 7;
    date - Days::new(u64::from(back))
}

/// Week boundaries from the week containing `min` through the first week
/// start after `max`.
///
/// `N` boundaries describe `N - 1` half-open buckets `[b[t], b[t + 1])`.
/// The result always has at least two boundaries; a reversed span collapses
/// onto the week containing `max`.
pub fn bucketize(min: NaiveDate, max: NaiveDate, week_start: Weekday) -> Vec<NaiveDate> {
    let min = if min > max { max } else { min };
    let start = week_floor(min, week_start);
    let end = week_floor(max, week_start) + Days::new(7);

    let mut boundaries = Vec::new();
    let mut cursor = start;
    while cursor <= end {
        boundaries.push(cursor);
        cursor = cursor + Days::new(7);
    }
    boundaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DataRecord;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_week_floor_sunday_start() {
        // 2024-01-03 is a Wednesday; the week began Sunday 2023-12-31.
        assert_eq!(week_floor(d(2024, 1, 3), Weekday::Sun), d(2023, 12, 31));
        assert_eq!(week_floor(d(2023, 12, 31), Weekday::Sun), d(2023, 12, 31));
        assert_eq!(week_floor(d(2024, 1, 3), Weekday::Mon), d(2024, 1, 1));
    }

    #[test]
    fn test_bucketize_single_day() {
        let b = bucketize(d(2024, 1, 3), d(2024, 1, 3), Weekday::Sun);
        assert_eq!(b, vec![d(2023, 12, 31), d(2024, 1, 7)]);
    }

    #[test]
    fn test_bucketize_spans_weeks() {
        let b = bucketize(d(2024, 1, 3), d(2024, 1, 17), Weekday::Sun);
        assert_eq!(
            b,
            vec![d(2023, 12, 31), d(2024, 1, 7), d(2024, 1, 14), d(2024, 1, 21)]
        );
    }

    #[test]
    fn test_bucketize_max_on_week_start_gets_own_bucket() {
        let b = bucketize(d(2024, 1, 3), d(2024, 1, 7), Weekday::Sun);
        assert_eq!(b.last(), Some(&d(2024, 1, 14)));
        assert!(b.windows(2).any(|w| w[0] <= d(2024, 1, 7) && d(2024, 1, 7) < w[1]));
    }

    #[test]
    fn test_bucketize_reversed_span_collapses() {
        let b = bucketize(d(2024, 2, 1), d(2024, 1, 3), Weekday::Sun);
        assert_eq!(b, vec![d(2023, 12, 31), d(2024, 1, 7)]);
    }

    #[test]
    fn test_date_span_covers_subtree() {
        let tree = vec![
            Node::new(1, "Root")
                .with_record("alice", "2024-01-10", DataRecord::new(1.0, 1.0))
                .with_child(
                    Node::new(2, "Child")
                        .with_record("bob", "2023-12-01", DataRecord::default())
                        .with_record("bob", "2024-03-05", DataRecord::default()),
                ),
        ];
        let span = date_span(&tree).unwrap().unwrap();
        assert_eq!(span.min, d(2023, 12, 1));
        assert_eq!(span.max, d(2024, 3, 5));
    }

    #[test]
    fn test_date_span_empty_is_none() {
        let tree = vec![Node::new(1, "Root").with_child(Node::new(2, "Child"))];
        assert_eq!(date_span(&tree).unwrap(), None);
    }

    #[test]
    fn test_chart_span_extends_to_today() {
        let tree = vec![Node::new(1, "Root").with_record("a", "2024-01-10", DataRecord::default())];
        let span = chart_span(&tree, d(2024, 6, 1)).unwrap();
        assert_eq!(span, DateSpan { min: d(2024, 1, 10), max: d(2024, 6, 1) });

        let empty = chart_span(&[Node::new(1, "Root")], d(2024, 6, 1)).unwrap();
        assert_eq!(empty, DateSpan::today(d(2024, 6, 1)));
    }

    #[test]
    fn test_chart_span_keeps_future_max() {
        let tree = vec![Node::new(1, "Root").with_record("a", "2030-01-10", DataRecord::default())];
        let span = chart_span(&tree, d(2024, 6, 1)).unwrap();
        assert_eq!(span.max, d(2030, 1, 10));
    }

    #[test]
    fn test_date_span_malformed_date_fails() {
        let tree = vec![
            Node::new(1, "Root")
                .with_child(Node::new(4, "Bad").with_record("carol", "03/01/2024", DataRecord::default())),
        ];
        let err = date_span(&tree).unwrap_err();
        assert_eq!(
            err,
            DateError::Malformed {
                node: 4,
                contributor: "carol".to_string(),
                date: "03/01/2024".to_string(),
            }
        );
    }
}
