use crate::dates::{self, DateError};
use crate::graph::{DataRecord, Node};
use chrono::NaiveDate;

/// Walk the forest pre-order (children in array order), calling `on_record`
/// with the date of each of `contributor`'s records dated in `[start, end)`.
///
/// Within a node, records are visited in key order. Any unparseable date met
/// for `contributor` aborts the walk.
pub fn visit<F>(
    nodes: &[Node],
    contributor: &str,
    start: NaiveDate,
    end: NaiveDate,
    on_record: &mut F,
) -> Result<(), DateError>
where
    F: FnMut(NaiveDate, &DataRecord),
{
    for node in nodes {
        if let Some(log) = node.data.as_ref().and_then(|d| d.get(contributor)) {
            for (raw, record) in log {
                let date = dates::parse_record_date(node.id, contributor, raw)?;
                if start <= date && date < end {
                    on_record(date, record);
                }
            }
        }
        visit(&node.nodes, contributor, start, end, on_record)?;
    }
    Ok(())
}
