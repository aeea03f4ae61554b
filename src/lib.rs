pub mod analyzers;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;

pub use config::{DataConfig, DuplicatePolicy};
pub use dataset::ClimateDataset;
pub use error::{ProcessingError, Result};
pub use models::{GroupBy, Period, TimeseriesRequest, Variable};
pub use processors::GeoSelection;
