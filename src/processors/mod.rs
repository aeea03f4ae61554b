pub mod duplicates;
pub mod geo_filter;
pub mod hierarchy_join;
pub mod integrity_checker;
pub mod temporal_aggregator;

pub use duplicates::resolve_duplicates;
pub use geo_filter::{filter_by_geo, GeoSelection, SelectorOptions};
pub use hierarchy_join::HierarchyJoin;
pub use integrity_checker::{IntegrityChecker, IntegrityReport, ValueViolation, ViolationType};
pub use temporal_aggregator::{aggregate, aggregate_by_name, bucket_start};
