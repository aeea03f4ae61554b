pub mod scatter;
pub mod summary_reducer;

pub use scatter::{scatter_pairs, ScatterPoint};
pub use summary_reducer::{summarize, summary_table, GroupSummary, SeriesSummary, Statistics};
