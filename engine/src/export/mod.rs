// CSV download offer for a price table
use shared::models::PriceTable;

use crate::data::table_to_csv_bytes;
use crate::error::ChartError;

pub const DOWNLOAD_LABEL: &str = "Download CSV";
pub const CSV_MIME: &str = "text/csv";

/// Bytes offered to the end user as a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub label: String,
    pub data: Vec<u8>,
    pub file_name: String,
    pub mime: String,
}

/// The hosting environment's download mechanism.
pub trait DownloadHost {
    fn offer_download(&mut self, request: DownloadRequest) -> Result<(), ChartError>;
}

/// Collects offered downloads instead of presenting them.
impl DownloadHost for Vec<DownloadRequest> {
    fn offer_download(&mut self, request: DownloadRequest) -> Result<(), ChartError> {
        self.push(request);
        Ok(())
    }
}

/// Serialises `table` to UTF-8 CSV and hands it to `host` as `filename`.
/// Serialisation failures reach the caller before the host sees anything.
pub fn export_csv(table: &PriceTable, filename: &str, host: &mut dyn DownloadHost) -> Result<(), ChartError> {
    let data = table_to_csv_bytes(table)?;
    let size = data.len();

    host.offer_download(DownloadRequest {
        label: DOWNLOAD_LABEL.to_string(),
        data,
        file_name: filename.to_string(),
        mime: CSV_MIME.to_string(),
    })?;

    tracing::info!(file_name = %filename, bytes = size, rows = table.len(), "Offered CSV download");
    Ok(())
}
