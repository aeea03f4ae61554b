pub mod constants;
pub mod dates;
pub mod progress;

pub use constants::*;
pub use dates::{month_start, parse_day_first, quarter_start, week_start, year_start};
pub use progress::ProgressReporter;
