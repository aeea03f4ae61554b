use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A province of the station network, unique by `province_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvinceRef {
    pub province_id: u16,
    pub province_name: Arc<str>,
}

impl ProvinceRef {
    pub fn new(province_id: u16, province_name: &str) -> Self {
        Self {
            province_id,
            province_name: Arc::from(province_name),
        }
    }
}
