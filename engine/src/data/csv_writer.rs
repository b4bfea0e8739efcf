use std::io::Write;

use csv::{Terminator, WriterBuilder};
use shared::models::PriceTable;
use shared::utils::format_time_key;

use crate::error::ChartError;

/// Writes the table as CSV: header row, index first, data columns in table
/// order, missing cells empty. Nothing is written if any cell is non-finite.
pub fn write_table_csv<W: Write>(table: &PriceTable, writer: W) -> Result<W, ChartError> {
    check_serializable(table)?;

    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    let mut header = Vec::with_capacity(table.columns().len() + 1);
    header.push(table.index_name());
    header.extend(table.column_names());
    wtr.write_record(&header).map_err(serialization_error)?;

    let mut record: Vec<String> = Vec::with_capacity(header.len());
    for (row, key) in table.index().iter().enumerate() {
        record.clear();
        record.push(format_time_key(key));
        for column in table.columns() {
            record.push(column.values[row].map(|v| v.to_string()).unwrap_or_default());
        }
        wtr.write_record(&record).map_err(serialization_error)?;
    }

    wtr.into_inner()
        .map_err(|e| ChartError::Serialization(format!("failed to flush CSV output: {}", e.error())))
}

pub fn table_to_csv_bytes(table: &PriceTable) -> Result<Vec<u8>, ChartError> {
    write_table_csv(table, Vec::new())
}

pub fn table_to_csv_string(table: &PriceTable) -> Result<String, ChartError> {
    let bytes = table_to_csv_bytes(table)?;
    String::from_utf8(bytes).map_err(|e| ChartError::Serialization(e.to_string()))
}

fn check_serializable(table: &PriceTable) -> Result<(), ChartError> {
    for column in table.columns() {
        let bad_cell = column.values.iter().enumerate().find_map(|(row, cell)| match cell {
            Some(value) if !value.is_finite() => Some((row, *value)),
            _ => None,
        });
        if let Some((row, value)) = bad_cell {
            return Err(ChartError::Serialization(format!(
                "cannot serialize value {} in column '{}' at row {}",
                value, column.name, row
            )));
        }
    }
    Ok(())
}

fn serialization_error(err: csv::Error) -> ChartError {
    ChartError::Serialization(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::csv_parser::TableCsvParser;
    use chrono::NaiveDate;
    use shared::utils::start_of_day;

    fn sample_table() -> PriceTable {
        let index = vec![
            start_of_day(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()),
            start_of_day(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()),
            start_of_day(NaiveDate::from_ymd_opt(2024, 1, 4).unwrap()),
        ];
        PriceTable::new("Date", index)
            .unwrap()
            .with_column("Open", vec![Some(187.15), Some(184.22), Some(182.15)])
            .unwrap()
            .with_column("High", vec![Some(188.44), Some(185.88), Some(183.0875)])
            .unwrap()
            .with_column("Low", vec![Some(183.89), Some(183.43), Some(180.88)])
            .unwrap()
            .with_column("Close", vec![Some(185.64), Some(184.25), Some(181.91)])
            .unwrap()
            .with_column("Volume", vec![Some(82488700.0), Some(58414500.0), Some(71983600.0)])
            .unwrap()
            .with_column("SMA", vec![None, Some(184.945), Some(183.08)])
            .unwrap()
            .with_column("RSI", vec![None, None, Some(0.1 + 0.2)])
            .unwrap()
    }

    #[test]
    fn test_csv_layout() {
        let csv = table_to_csv_string(&sample_table()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Date,Open,High,Low,Close,Volume,SMA,RSI");
        assert_eq!(lines[1], "2024-01-02,187.15,188.44,183.89,185.64,82488700,,");
        assert!(lines[3].starts_with("2024-01-04,182.15,183.0875,"));
    }

    #[test]
    fn test_round_trip_reconstructs_table() {
        let table = sample_table();
        let csv = table_to_csv_string(&table).unwrap();
        let parsed = TableCsvParser::parse_table_csv(csv.as_bytes()).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn test_round_trip_intraday_index() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let index = vec![
            day.and_hms_opt(9, 30, 0).unwrap(),
            day.and_hms_opt(9, 35, 0).unwrap(),
        ];
        let table = PriceTable::new("Datetime", index)
            .unwrap()
            .with_column("Close", vec![Some(1.5), Some(-2.25)])
            .unwrap();

        let csv = table_to_csv_string(&table).unwrap();
        assert!(csv.contains("2024-01-02 09:30:00,1.5"));
        assert_eq!(TableCsvParser::parse_table_csv(csv.as_bytes()).unwrap(), table);
    }

    #[test]
    fn test_names_needing_quotes_round_trip() {
        let table = PriceTable::new("Date, local", vec![start_of_day(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())])
            .unwrap()
            .with_column("Stoch \"K\"", vec![Some(80.0)])
            .unwrap();
        let csv = table_to_csv_string(&table).unwrap();
        assert_eq!(TableCsvParser::parse_table_csv(csv.as_bytes()).unwrap(), table);
    }

    #[test]
    fn test_non_finite_cell_is_serialization_error() {
        let mut table = sample_table();
        table.push_column("ATR", vec![Some(1.0), Some(f64::NAN), Some(2.0)]).unwrap();

        let err = table_to_csv_bytes(&table).unwrap_err();
        match err {
            ChartError::Serialization(msg) => {
                assert!(msg.contains("'ATR'"), "{}", msg);
                assert!(msg.contains("row 1"), "{}", msg);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
