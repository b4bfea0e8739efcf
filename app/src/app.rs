// One chart run: validate, fetch, compose, write the chart, offer the CSV
use std::path::PathBuf;

use anyhow::{Context, Result};
use engine::data::TableCsvParser;
use engine::{export_csv, validate_parameters, ChartComposer, DownloadHost, DownloadRequest, ErrorDisplay};
use shared::utils::start_of_day;

use crate::cli::RunArgs;
use crate::config::AppConfig;
use crate::services::DirectoryDownloadHost;

const CHART_LABEL: &str = "Chart JSON";
const CHART_MIME: &str = "application/json";

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Parameters failed validation; nothing was fetched or written.
    Rejected,
    Completed {
        chart_path: PathBuf,
        csv_path: PathBuf,
        rows: usize,
        traces: usize,
    },
}

pub fn run(config: &AppConfig, args: &RunArgs, display: &mut dyn ErrorDisplay) -> Result<RunOutcome> {
    if !validate_parameters(&args.ticker, args.start, args.end, display) {
        return Ok(RunOutcome::Rejected);
    }
    let ticker = args.ticker.trim();
    let file_stem = file_stem_for(ticker);

    // The CSV file stands in for the market-data source.
    let table = TableCsvParser::load_table_from_csv(&args.data_path)
        .with_context(|| format!("failed to load price data from '{}'", args.data_path.display()))?
        .between(start_of_day(args.start), start_of_day(args.end));
    if table.is_empty() {
        tracing::warn!(%ticker, start = %args.start, end = %args.end, "No rows in the requested date range");
    }

    let chart = ChartComposer::new(config.chart.clone()).compose(&table, &args.indicators)?;

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.export.output_dir.clone());
    let mut host = DirectoryDownloadHost::new(&output_dir);

    host.offer_download(DownloadRequest {
        label: CHART_LABEL.to_string(),
        data: serde_json::to_vec_pretty(&chart)?,
        file_name: format!("{}_chart.json", file_stem),
        mime: CHART_MIME.to_string(),
    })
    .context("failed to write chart")?;
    let chart_path = last_saved(&host)?;

    export_csv(&table, &format!("{}_{}_{}.csv", file_stem, args.start, args.end), &mut host)?;
    let csv_path = last_saved(&host)?;

    Ok(RunOutcome::Completed {
        chart_path,
        csv_path,
        rows: table.len(),
        traces: chart.trace_count(),
    })
}

/// Tickers such as `BRK/B` must stay a single file name inside the output directory.
fn file_stem_for(ticker: &str) -> String {
    ticker
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') || c.is_control() { '_' } else { c })
        .collect()
}

fn last_saved(host: &DirectoryDownloadHost) -> Result<PathBuf> {
    host.saved()
        .last()
        .cloned()
        .context("download host did not record the saved file")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::chart::{ChartDescription, PanelKind};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const PRICES: &str = "\
Date,Open,High,Low,Close,Volume,SMA,BB_Upper,BB_Mid,BB_Lower,RSI
2024-01-02,187.15,188.44,183.89,185.64,82488700,185.1,190.2,185.1,180.0,55.2
2024-01-03,184.22,185.88,183.43,184.25,58414500,184.9,189.9,184.9,179.9,48.7
2024-01-04,182.15,183.09,180.88,181.91,71983600,184.3,189.5,184.3,179.1,41.3
2024-01-05,181.99,182.76,180.17,181.18,62303300,183.7,189.0,183.7,178.4,39.8";

    fn prices_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", PRICES).unwrap();
        file
    }

    fn run_args(data: &NamedTempFile, out: &std::path::Path, ticker: &str, start: (u32, u32), end: (u32, u32)) -> RunArgs {
        RunArgs {
            data_path: data.path().to_path_buf(),
            ticker: ticker.to_string(),
            start: NaiveDate::from_ymd_opt(2024, start.0, start.1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, end.0, end.1).unwrap(),
            indicators: vec!["SMA".into(), "BB_Upper".into(), "BB_Mid".into(), "BB_Lower".into(), "RSI".into(), "FOO".into()],
            output_dir: Some(out.to_path_buf()),
            config_path: None,
        }
    }

    #[test]
    fn test_run_writes_chart_and_csv() {
        let data = prices_file();
        let out = tempfile::tempdir().unwrap();
        let config = AppConfig::load_default().unwrap();
        let args = run_args(&data, out.path(), "AAPL", (1, 3), (1, 5));

        let mut messages: Vec<String> = Vec::new();
        let outcome = run(&config, &args, &mut messages).unwrap();
        assert!(messages.is_empty());

        let (chart_path, csv_path, rows, traces) = match outcome {
            RunOutcome::Completed { chart_path, csv_path, rows, traces } => (chart_path, csv_path, rows, traces),
            other => panic!("expected a completed run, got {:?}", other),
        };
        assert_eq!(rows, 2);
        assert_eq!(traces, 7);
        assert_eq!(chart_path, out.path().join("AAPL_chart.json"));
        assert_eq!(csv_path, out.path().join("AAPL_2024-01-03_2024-01-05.csv"));

        let chart: ChartDescription = serde_json::from_str(&std::fs::read_to_string(&chart_path).unwrap()).unwrap();
        assert_eq!(chart.time_axis.values.len(), 2);
        assert_eq!(
            chart.panel(PanelKind::Price).unwrap().trace_names(),
            vec!["Candlestick", "SMA", "BB_Upper", "BB_Mid", "BB_Lower"]
        );
        assert_eq!(chart.panel(PanelKind::Indicator).unwrap().trace_names(), vec!["RSI"]);

        let exported = TableCsvParser::load_table_from_csv(&csv_path).unwrap();
        assert_eq!(exported.len(), 2);
        assert_eq!(exported.column("Close").unwrap().values, vec![Some(184.25), Some(181.91)]);
    }

    #[test]
    fn test_invalid_parameters_stop_before_fetch() {
        let out = tempfile::tempdir().unwrap();
        let config = AppConfig::load_default().unwrap();
        let mut args = run_args(&prices_file(), out.path(), "AAPL", (1, 5), (1, 3));
        args.data_path = PathBuf::from("does/not/exist.csv");

        let mut messages: Vec<String> = Vec::new();
        assert_eq!(run(&config, &args, &mut messages).unwrap(), RunOutcome::Rejected);
        assert_eq!(messages, vec!["Start date must be before end date."]);
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_ohlcv_column_is_an_error() {
        let mut data = NamedTempFile::new().unwrap();
        writeln!(data, "Date,Open,High,Low,Close\n2024-01-02,1,2,0.5,1.5").unwrap();
        let out = tempfile::tempdir().unwrap();
        let config = AppConfig::load_default().unwrap();
        let args = run_args(&data, out.path(), "AAPL", (1, 1), (2, 1));

        let mut messages: Vec<String> = Vec::new();
        let err = run(&config, &args, &mut messages).unwrap_err();
        assert!(err.to_string().contains("Volume"), "{}", err);
    }

    #[test]
    fn test_ticker_separators_stay_inside_output_dir() {
        let data = prices_file();
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("out");
        let config = AppConfig::load_default().unwrap();
        let args = run_args(&data, &out, "../BRK/B", (1, 3), (1, 5));

        let mut messages: Vec<String> = Vec::new();
        let (chart_path, csv_path) = match run(&config, &args, &mut messages).unwrap() {
            RunOutcome::Completed { chart_path, csv_path, .. } => (chart_path, csv_path),
            other => panic!("expected a completed run, got {:?}", other),
        };

        assert_eq!(chart_path, out.join(".._BRK_B_chart.json"));
        assert_eq!(csv_path, out.join(".._BRK_B_2024-01-03_2024-01-05.csv"));
        assert!(chart_path.exists());
        assert!(csv_path.exists());
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_file_stem_replaces_separators() {
        assert_eq!(file_stem_for("AAPL"), "AAPL");
        assert_eq!(file_stem_for("BRK.B"), "BRK.B");
        assert_eq!(file_stem_for("../x"), ".._x");
        assert_eq!(file_stem_for("a\\b:c"), "a_b_c");
    }
}
