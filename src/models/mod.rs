pub mod joined;
pub mod observation;
pub mod province;
pub mod request;
pub mod series;
pub mod station;
pub mod variable;

pub use joined::JoinedRecord;
pub use observation::Observation;
pub use province::ProvinceRef;
pub use request::{AnalysisMode, GroupBy, Period, PlotMode, TimeseriesRequest};
pub use series::{AggregatedRow, AggregatedSeries};
pub use station::StationRef;
pub use variable::{MeanAccumulator, Variable, WeatherValues, VARIABLE_COUNT};
