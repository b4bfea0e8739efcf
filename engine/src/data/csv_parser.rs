use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use shared::models::PriceTable;
use shared::utils::parse_time_key;

use crate::error::ChartError;

/// Reads the table layout written by `csv_writer`: a header row, the time
/// index in the first column, one numeric column per indicator after it.
pub struct TableCsvParser;

impl TableCsvParser {
    pub fn load_table_from_csv<P: AsRef<Path>>(file_path: P) -> Result<PriceTable, ChartError> {
        let path = file_path.as_ref();
        let file = File::open(path)?;
        let table = Self::parse_table_csv(BufReader::new(file))?;
        tracing::info!(
            path = %path.display(),
            rows = table.len(),
            columns = table.columns().len(),
            "Loaded price table from CSV"
        );
        Ok(table)
    }

    pub fn parse_table_csv<R: Read>(reader: R) -> Result<PriceTable, ChartError> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers = rdr.headers()?.clone();
        let index_name = headers
            .get(0)
            .ok_or_else(|| ChartError::CsvDataFormatError("missing header row".to_string()))?
            .to_string();
        let names: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

        let mut index = Vec::new();
        let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::new(); names.len()];

        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            let line = idx + 2;

            let key_str = record.get(0).unwrap_or("");
            let key = parse_time_key(key_str).ok_or_else(|| {
                ChartError::CsvDataFormatError(format!("Invalid index value '{}' at line {}", key_str, line))
            })?;
            index.push(key);

            for (col, values) in columns.iter_mut().enumerate() {
                let raw = record.get(col + 1).unwrap_or("");
                let cell = parse_cell(raw).map_err(|e| {
                    ChartError::CsvDataFormatError(format!("Error parsing '{}' at line {}: {}", names[col], line, e))
                })?;
                values.push(cell);
            }
        }

        let mut table = PriceTable::new(index_name, index)?;
        for (name, values) in names.into_iter().zip(columns) {
            table.push_column(name, values)?;
        }
        Ok(table)
    }
}

// Empty fields and NaN are missing cells.
fn parse_cell(raw: &str) -> Result<Option<f64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|e| format!("failed to parse number '{}': {}", raw, e))?;
    if !value.is_finite() {
        return Err(format!("non-finite value '{}'", raw));
    }
    Ok(Some(value))
}
