//! Flat entry points over the load, join, filter, aggregate and summarize
//! stages, for callers that do not want to hold a [`ClimateDataset`].

use crate::config::{DataConfig, DuplicatePolicy};
use crate::dataset::ClimateDataset;
use crate::error::Result;
use crate::readers::{ReferenceData, ReferenceLoader};

pub use crate::analyzers::summarize;
pub use crate::processors::{aggregate, filter_by_geo};

/// Read the provinces, stations and observations tables named by `config`
pub fn load_reference_data(config: &DataConfig) -> Result<ReferenceData> {
    ReferenceLoader::new(config.clone()).load(None)
}

/// Resolve duplicate observations and join them with stations and provinces
pub fn join_all(data: ReferenceData, policy: DuplicatePolicy) -> Result<ClimateDataset> {
    ClimateDataset::from_reference(data, policy)
}
