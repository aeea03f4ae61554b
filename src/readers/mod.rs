pub mod observation_reader;
pub mod province_reader;
pub mod reference_loader;
pub mod station_reader;
pub mod table;

pub use observation_reader::ObservationReader;
pub use province_reader::ProvinceReader;
pub use reference_loader::{ReferenceData, ReferenceLoader};
pub use station_reader::StationReader;
