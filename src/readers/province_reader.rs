use crate::error::{ProcessingError, Result};
use crate::models::ProvinceRef;
use crate::readers::table::{csv_reader, require_columns, row_error};
use crate::utils::constants::PROVINCES_SOURCE;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
struct ProvinceRow {
    province_id: u16,

    #[validate(length(min = 1))]
    province_name: String,
}

pub struct ProvinceReader;

impl ProvinceReader {
    pub fn new() -> Self {
        Self
    }

    /// Read provinces, sorted by `province_id`
    pub fn read_provinces(&self, path: &Path) -> Result<Vec<ProvinceRef>> {
        let file = File::open(path)?;
        let provinces = self.read_from(BufReader::new(file))?;
        info!("Loaded {} provinces from {}", provinces.len(), path.display());
        Ok(provinces)
    }

    pub fn read_from<R: Read>(&self, reader: R) -> Result<Vec<ProvinceRef>> {
        let mut reader = csv_reader(reader);
        require_columns(&mut reader, PROVINCES_SOURCE, &["province_id", "province_name"])?;

        let mut provinces = Vec::new();
        for (index, result) in reader.deserialize::<ProvinceRow>().enumerate() {
            let row_number = index + 1;
            let row = result.map_err(|e| row_error(PROVINCES_SOURCE, row_number, e))?;

            row.validate().map_err(|e| {
                ProcessingError::data_format(PROVINCES_SOURCE, row_number, e.to_string())
            })?;

            provinces.push(ProvinceRef::new(row.province_id, &row.province_name));
        }

        provinces.sort_by_key(|p| p.province_id);
        Ok(provinces)
    }
}

impl Default for ProvinceReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_provinces_sorted() -> Result<()> {
        let data = "province_id,province_name\n2,Sumatera Utara\n1,Aceh\n";
        let provinces = ProvinceReader::new().read_from(data.as_bytes())?;

        assert_eq!(provinces.len(), 2);
        assert_eq!(provinces[0], ProvinceRef::new(1, "Aceh"));
        assert_eq!(&*provinces[1].province_name, "Sumatera Utara");
        Ok(())
    }

    #[test]
    fn test_bad_province_id() {
        let data = "province_id,province_name\n1,Aceh\nx,Bali\n";
        let err = ProvinceReader::new().read_from(data.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            ProcessingError::DataFormat { ref source_name, row: 2, .. } if source_name == "provinces"
        ));
    }

    #[test]
    fn test_missing_column() {
        let data = "id,name\n1,Aceh\n";
        assert!(ProvinceReader::new().read_from(data.as_bytes()).is_err());
    }
}
