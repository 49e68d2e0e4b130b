use std::path::{Path, PathBuf};

use clap::Parser;

use crate::domain::SourceSide;

/// Default directory for exported files
pub const DEFAULT_OUT_DIR: &str = "out";

/// Command-line arguments of the `refinery` binary
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "refinery",
    about = "Consolidate two lead exports and split the result into CSV chunks"
)]
pub struct RefineryArgs {
    /// Source A upload
    #[arg(value_name = "SOURCE_A_CSV")]
    pub source_a: PathBuf,

    /// Source B upload
    #[arg(value_name = "SOURCE_B_CSV")]
    pub source_b: PathBuf,

    /// ETL parameters as JSON; built-in defaults when absent
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[arg(long = "out", value_name = "DIR", default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,

    /// Requested chunk size, clamped to the configured bounds
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub chunk_size: Option<i64>,

    /// Columns kept in chunk files; every column when absent
    #[arg(long, value_name = "C1,C2,...", value_delimiter = ',', value_parser = parse_column)]
    pub columns: Option<Vec<String>>,
}

impl RefineryArgs {
    pub fn source_path(&self, side: SourceSide) -> &Path {
        match side {
            SourceSide::A => &self.source_a,
            SourceSide::B => &self.source_b,
        }
    }

    /// Requested columns with blank entries dropped
    pub fn selected_columns(&self) -> Option<Vec<String>> {
        self.columns.as_ref().map(|columns| {
            columns
                .iter()
                .filter(|column| !column.is_empty())
                .cloned()
                .collect()
        })
    }
}

fn parse_column(raw: &str) -> Result<String, String> {
    Ok(raw.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(list: &[&str]) -> Result<RefineryArgs, clap::Error> {
        RefineryArgs::try_parse_from(std::iter::once("refinery").chain(list.iter().copied()))
    }

    #[test]
    fn parses_positional_sources_with_defaults() {
        let parsed = parse(&["spider.csv", "gosom.csv"]).unwrap();
        assert_eq!(parsed.source_a, PathBuf::from("spider.csv"));
        assert_eq!(parsed.source_b, PathBuf::from("gosom.csv"));
        assert_eq!(parsed.out_dir, PathBuf::from("out"));
        assert!(parsed.config.is_none());
        assert!(parsed.chunk_size.is_none());
        assert!(parsed.selected_columns().is_none());
    }

    #[test]
    fn parses_every_flag() {
        let parsed = parse(&[
            "--config",
            "etl.json",
            "a.csv",
            "--chunk-size",
            "120",
            "b.csv",
            "--out",
            "exports",
            "--columns",
            "name, phone,,url",
        ])
        .unwrap();

        assert_eq!(parsed.config, Some(PathBuf::from("etl.json")));
        assert_eq!(parsed.chunk_size, Some(120));
        assert_eq!(parsed.out_dir, PathBuf::from("exports"));
        assert_eq!(
            parsed.selected_columns(),
            Some(vec!["name".to_string(), "phone".to_string(), "url".to_string()])
        );
        assert_eq!(parsed.source_b, PathBuf::from("b.csv"));
    }

    #[test]
    fn rejects_wrong_positional_count() {
        assert_eq!(
            parse(&["only.csv"]).unwrap_err().kind(),
            ErrorKind::MissingRequiredArgument
        );
        assert!(parse(&["a.csv", "b.csv", "c.csv"]).is_err());
    }

    #[test]
    fn rejects_missing_flag_value() {
        assert!(parse(&["a.csv", "b.csv", "--out"]).is_err());
    }

    #[test]
    fn rejects_non_numeric_chunk_size() {
        assert_eq!(
            parse(&["a.csv", "b.csv", "--chunk-size", "big"])
                .unwrap_err()
                .kind(),
            ErrorKind::ValueValidation
        );
    }

    #[test]
    fn negative_chunk_size_is_left_for_clamping() {
        let parsed = parse(&["a.csv", "b.csv", "--chunk-size", "-5"]).unwrap();
        assert_eq!(parsed.chunk_size, Some(-5));
    }

    #[test]
    fn rejects_unknown_flag() {
        assert_eq!(
            parse(&["a.csv", "b.csv", "--verbose"]).unwrap_err().kind(),
            ErrorKind::UnknownArgument
        );
    }
}
