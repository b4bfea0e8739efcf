// Command-line arguments for a single chart run
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;

pub const USAGE: &str = "\
usage: stock-chart <data.csv> --ticker <SYMBOL> --start <YYYY-MM-DD> --end <YYYY-MM-DD>
                   [--indicators SMA,RSI,...] [--out <DIR>] [--config <FILE>]";

#[derive(Debug, Clone, PartialEq)]
pub struct RunArgs {
    pub data_path: PathBuf,
    /// Left empty when not given; parameter validation reports it.
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub indicators: Vec<String>,
    pub output_dir: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
}

impl RunArgs {
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut data_path = None;
        let mut ticker = String::new();
        let mut start = None;
        let mut end = None;
        let mut indicators = Vec::new();
        let mut output_dir = None;
        let mut config_path = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--ticker" => ticker = value_for(&arg, args.next())?,
                "--start" => start = Some(parse_date(&arg, &value_for(&arg, args.next())?)?),
                "--end" => end = Some(parse_date(&arg, &value_for(&arg, args.next())?)?),
                "--indicators" => indicators = split_indicators(&value_for(&arg, args.next())?),
                "--out" => output_dir = Some(PathBuf::from(value_for(&arg, args.next())?)),
                "--config" => config_path = Some(PathBuf::from(value_for(&arg, args.next())?)),
                "-h" | "--help" => bail!("help requested"),
                flag if flag.starts_with("--") => bail!("unknown option '{}'", flag),
                _ if data_path.is_none() => data_path = Some(PathBuf::from(&arg)),
                _ => bail!("unexpected argument '{}'", arg),
            }
        }

        Ok(RunArgs {
            data_path: data_path.ok_or_else(|| anyhow!("missing data file"))?,
            ticker,
            start: start.ok_or_else(|| anyhow!("missing --start"))?,
            end: end.ok_or_else(|| anyhow!("missing --end"))?,
            indicators,
            output_dir,
            config_path,
        })
    }
}

fn value_for(flag: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| anyhow!("{} needs a value", flag))
}

fn parse_date(flag: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").with_context(|| format!("{} expects YYYY-MM-DD, got '{}'", flag, value))
}

fn split_indicators(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
