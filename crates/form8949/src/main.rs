//! form8949: Generate Form 8949 capital-gains CSVs from a flat ledger file.
//!
//! Reads `security,date,quantity,unitPrice` rows, matches sells against
//! buys FIFO, and writes the short-term, long-term and remainder reports
//! next to the input file (or into `--out-dir`).
//!
//! Usage:
//!   cargo run -p form8949 -- trades.csv
//!   cargo run -p form8949 -- trades.csv --out-dir reports/

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use gains_engine::{generate_reports, write_reports, EngineError, ReportSink};

/// Filesystem sink: one file per report, newline-terminated rows.
struct FileReportSink {
    dir: PathBuf,
}

impl ReportSink for FileReportSink {
    fn write_report(&mut self, name: &str, lines: &[String]) -> Result<(), EngineError> {
        let path = self.dir.join(name);
        let mut text = lines.join("\n");
        text.push('\n');
        std::fs::write(&path, text)
            .map_err(|e| EngineError::Sink(format!("{}: {}", path.display(), e)))?;
        tracing::info!("wrote {}", path.display());
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "form8949=info,gains_engine=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut input: Option<PathBuf> = None;
    let mut out_dir: Option<PathBuf> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--out-dir" => {
                i += 1;
                match args.get(i) {
                    Some(dir) => out_dir = Some(PathBuf::from(dir)),
                    None => bail!("--out-dir requires a path"),
                }
            }
            arg if input.is_none() => input = Some(PathBuf::from(arg)),
            arg => bail!("unexpected argument: {}", arg),
        }
        i += 1;
    }

    let input = match input {
        Some(path) => path,
        None => bail!("usage: form8949 <ledger.csv> [--out-dir DIR]"),
    };
    if !input.exists() {
        bail!("input data file doesn't exist: {}", input.display());
    }

    let raw = std::fs::read_to_string(&input)
        .with_context(|| format!("reading {}", input.display()))?;

    let dataset = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("ledger")
        .to_string();

    let dir = match out_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("creating {}", dir.display()))?;
            dir
        }
        None => input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    let reports = generate_reports(&raw).context("invalid transaction data")?;

    let mut sink = FileReportSink { dir };
    write_reports(&reports, &dataset, &mut sink)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_sink_writes_newline_terminated_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileReportSink {
            dir: dir.path().to_path_buf(),
        };

        sink.write_report("out.csv", &["a,b".to_string(), "c,d".to_string()])
            .unwrap();

        let written = std::fs::read_to_string(dir.path().join("out.csv")).unwrap();
        assert_eq!(written, "a,b\nc,d\n");
    }

    #[test]
    fn test_file_sink_reports_unwritable_path() {
        let mut sink = FileReportSink {
            dir: PathBuf::from("/nonexistent-report-dir"),
        };

        let err = sink
            .write_report("out.csv", &["a".to_string()])
            .unwrap_err();
        assert!(matches!(err, EngineError::Sink(_)));
    }
}
