use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed {source_name} data at row {row}: {message}")]
    DataFormat {
        source_name: String,
        row: usize,
        message: String,
    },

    #[error("Unknown column: '{name}'")]
    UnknownColumn { name: String },

    #[error("Duplicate observation for station {station_id} on {date}")]
    DuplicateObservation {
        station_id: u32,
        date: chrono::NaiveDate,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl ProcessingError {
    pub fn data_format(source_name: &str, row: usize, message: impl Into<String>) -> Self {
        ProcessingError::DataFormat {
            source_name: source_name.to_string(),
            row,
            message: message.into(),
        }
    }

    pub fn unknown_column(name: &str) -> Self {
        ProcessingError::UnknownColumn {
            name: name.to_string(),
        }
    }
}
