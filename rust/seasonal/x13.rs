use chrono::Datelike;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{info, warn};

use crate::error::{PeriodError, PeriodResult};
use crate::frequency::Frequency;
use crate::seasonal::config::X13Config;
use crate::series::RegularSeries;

/// Removes every file in `dir` whose name starts with `stem` when dropped.
struct ScratchFiles {
    dir: PathBuf,
    stem: String,
}

impl ScratchFiles {
    fn new(dir: &Path) -> Self {
        ScratchFiles {
            dir: dir.to_path_buf(),
            stem: format!("regperiod-{:016x}", rand::random::<u64>()),
        }
    }

    fn path(&self, extension: &str) -> PathBuf {
        self.dir.join(format!("{}{}", self.stem, extension))
    }
}

impl Drop for ScratchFiles {
    fn drop(&mut self) {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %self.dir.display(), error = %e, "cannot list scratch directory");
                return;
            }
        };
        for entry in entries.flatten() {
            if entry.file_name().to_string_lossy().starts_with(&self.stem) {
                if let Err(e) = fs::remove_file(entry.path()) {
                    warn!(file = %entry.path().display(), error = %e, "cannot remove scratch file");
                }
            }
        }
    }
}

/// Seasonally adjust a monthly or quarterly series with X-13ARIMA-SEATS.
///
/// The series must be gapless, hold no missing values and span at least
/// [`X13Config::min_years`] years. Series of any other frequency are returned unchanged.
/// Returns the final seasonally adjusted values (table D11) on the same index.
///
/// The program runs synchronously. Files it reads and writes live in the configured scratch
/// directory under a random name and are removed before returning, on failure as well.
pub fn x13(series: &RegularSeries, config: &X13Config) -> PeriodResult<RegularSeries> {
    let freq = series.freq();
    let (period, monthly) = match freq {
        Frequency::Monthly => (12, true),
        Frequency::Quarterly(_) => (4, false),
        _ => {
            info!(freq = %freq, "seasonal adjustment skipped for this frequency");
            return Ok(series.clone());
        }
    };
    let required = config.min_years * period;
    if series.len() < required {
        return Err(PeriodError::InvalidArgument(format!(
            "seasonal adjustment needs at least {} observations at frequency '{}', got {}",
            required,
            freq,
            series.len()
        )));
    }
    if !series.index().is_full()? || series.values().iter().any(|v| !v.is_finite()) {
        return Err(PeriodError::InvalidArgument(
            "seasonal adjustment needs a gapless series without missing values".to_string(),
        ));
    }

    let start = match series.first_period() {
        Some(p) => {
            let end = p.to_timestamp()?;
            if monthly {
                p.strftime("%Y.%m")?
            } else {
                format!("{}.{}", end.year(), end.month0() / 3 + 1)
            }
        }
        None => return Ok(series.clone()),
    };

    let scratch = ScratchFiles::new(&config.scratch_dir);
    fs::write(scratch.path(".spc"), specification(series, &start, period))?;

    info!(
        executable = %config.executable.display(),
        stem = %scratch.stem,
        "running X-13ARIMA-SEATS"
    );
    let output = Command::new(&config.executable)
        .arg(scratch.path(""))
        .args(["-Q", "-P", "-N", "-R"])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()?;
    info!(status = %output.status, "X-13ARIMA-SEATS finished");

    let report = fs::read_to_string(scratch.path(".out")).map_err(|e| {
        PeriodError::SeasonalAdjustment(format!(
            "no output produced ({}, exit status {}): {}",
            e,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        ))
    })?;
    let values = parse_d11(&report, monthly)?;
    if values.len() != series.len() {
        return Err(PeriodError::SeasonalAdjustment(format!(
            "table D11 holds {} values for {} observations",
            values.len(),
            series.len()
        )));
    }
    Ok(series.with_values(values.into()))
}

fn specification(series: &RegularSeries, start: &str, period: usize) -> String {
    let data: Vec<String> = series.values().iter().map(|v| v.to_string()).collect();
    format!(
        "series{{\n  title=\"regperiod\"\n  start={start}\n  period={period}\n  data=(\n    {}\n  )\n  span=({start},)\n}}\nx11{{\n  print=(d11)\n}}\n",
        data.join("\n    "),
    )
}

/// Read table D11 from an X-13ARIMA-SEATS report.
///
/// Year rows follow the second rule line and run until the `AVGE` row. Monthly rows wrap onto
/// a second line ending with the yearly total; quarterly rows end with the total.
fn parse_d11(report: &str, monthly: bool) -> PeriodResult<Vec<f64>> {
    let truncated = || PeriodError::SeasonalAdjustment("table D11 is truncated".to_string());
    let mut lines = report.lines();
    let mut rules = 0;
    while rules < 2 {
        if lines.next().ok_or_else(truncated)?.starts_with(" -----") {
            rules += 1;
        }
    }

    let mut fields: Vec<String> = Vec::new();
    loop {
        let line = lines.next().ok_or_else(truncated)?;
        if line.contains("AVGE") {
            break;
        }
        let is_year_row = line
            .get(2..6)
            .is_some_and(|y| y.bytes().all(|b| b.is_ascii_digit()));
        if !is_year_row {
            continue;
        }
        let row: Vec<&str> = line.split_whitespace().collect();
        if monthly {
            fields.extend(row.iter().skip(1).map(|s| s.to_string()));
            let wrapped: Vec<&str> = lines.next().ok_or_else(truncated)?.split_whitespace().collect();
            let n = wrapped.len().saturating_sub(1);
            fields.extend(wrapped[..n].iter().map(|s| s.to_string()));
        } else {
            let n = row.len().saturating_sub(1);
            fields.extend(row.iter().take(n).skip(1).map(|s| s.to_string()));
        }
    }

    fields
        .iter()
        .map(|s| {
            s.parse::<f64>().map_err(|_| {
                PeriodError::SeasonalAdjustment(format!("'{}' in table D11 is not a number", s))
            })
        })
        .collect()
}
