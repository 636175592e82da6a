pub mod config;
pub mod dates;
pub mod graph;
pub mod interval;
pub mod parser;
pub mod series;
pub mod summary;
pub mod visit;

#[cfg(any(test, feature = "test-support"))]
pub mod test_helpers;

pub use config::{ChartConfig, Config, ProjectConfig};
pub use dates::DateError;
pub use graph::{DataRecord, EditError, Node, Project, find, find_path};
pub use interval::{DateSpan, bucketize, chart_span, date_span};
pub use parser::{StoreError, load_project, save_project};
pub use series::{AggregateOptions, Series, SeriesSet, TrackingSeries, tracking_series};
pub use summary::{SummaryNode, SummaryRow, summary_table, summary_tree};
pub use visit::visit;
