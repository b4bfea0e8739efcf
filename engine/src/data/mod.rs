// Price table CSV input and output
pub mod csv_parser;
pub mod csv_writer;

pub use csv_parser::TableCsvParser;
pub use csv_writer::{table_to_csv_bytes, table_to_csv_string, write_table_csv};
