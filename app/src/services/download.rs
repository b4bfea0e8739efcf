// Serves downloads by saving them into an output directory
use std::path::{Path, PathBuf};

use engine::{ChartError, DownloadHost, DownloadRequest};

pub struct DirectoryDownloadHost {
    dir: PathBuf,
    saved: Vec<PathBuf>,
}

impl DirectoryDownloadHost {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            saved: Vec::new(),
        }
    }

    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }
}

impl DownloadHost for DirectoryDownloadHost {
    fn offer_download(&mut self, request: DownloadRequest) -> Result<(), ChartError> {
        // Only the final path component is honoured.
        let file_name = Path::new(&request.file_name)
            .file_name()
            .ok_or_else(|| ChartError::InvalidInput(format!("invalid download file name '{}'", request.file_name)))?;

        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, &request.data)?;

        tracing::info!(
            label = %request.label,
            mime = %request.mime,
            path = %path.display(),
            bytes = request.data.len(),
            "Saved download"
        );
        self.saved.push(path);
        Ok(())
    }
}
