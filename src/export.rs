//! Loading flight-log signals and exporting segment lists
//!
//! Signals are read from CSV exports of flight logs (one column per field,
//! header row first). Segment lists are written next to the input file, or
//! into `ExportOptions::output_dir` when set.

use crate::types::SegmentedSignal;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

#[cfg(feature = "csv")]
use crate::types::Signal;
#[cfg(feature = "csv")]
use tracing::warn;

/// Export options for controlling output formats
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub csv: bool,
    pub json: bool,
    pub output_dir: Option<String>,
}

/// Compute `<output_dir>/<input stem>.<suffix>.<extension>`.
///
/// The output directory defaults to the parent directory of the input file.
pub fn compute_export_path(
    input_path: &Path,
    suffix: &str,
    extension: &str,
    export_options: &ExportOptions,
) -> PathBuf {
    let base_name = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("signal");

    let output_dir = match export_options.output_dir {
        Some(ref dir) => PathBuf::from(dir),
        None => input_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    output_dir.join(format!("{base_name}.{suffix}.{extension}"))
}

#[cfg(any(feature = "csv", feature = "json"))]
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
            debug!("Created output directory: {:?}", parent);
        }
    }
    Ok(())
}

/// Numeric columns read from a CSV file
#[cfg(feature = "csv")]
#[derive(Debug, Clone, Default)]
pub struct CsvSignals {
    pub signals: Vec<Signal>,
    /// Selected columns dropped because a cell was empty or not a number
    pub skipped: Vec<String>,
}

/// Read the columns whose header satisfies `select` from a CSV file.
///
/// A selected column containing an empty or non-numeric cell is dropped and
/// listed in [`CsvSignals::skipped`]; flight-log exports routinely carry text
/// columns such as flight mode names.
#[cfg(feature = "csv")]
pub fn load_csv_signals<F>(path: &Path, select: F) -> Result<CsvSignals>
where
    F: Fn(&str) -> bool,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {:?}", path))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read CSV header: {:?}", path))?
        .clone();

    let selected: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(_, name)| select(name))
        .map(|(idx, name)| (idx, name.to_string()))
        .collect();

    let mut columns: Vec<Option<Vec<f64>>> = vec![Some(Vec::new()); selected.len()];

    for (row_idx, record) in reader.records().enumerate() {
        let record = record
            .with_context(|| format!("Failed to read CSV row {} in {:?}", row_idx + 2, path))?;
        for (slot, (col_idx, name)) in columns.iter_mut().zip(&selected) {
            let Some(values) = slot.as_mut() else {
                continue;
            };
            match record.get(*col_idx).map(str::parse::<f64>) {
                Some(Ok(value)) if value.is_finite() => values.push(value),
                _ => {
                    debug!(
                        "Dropping column '{}': unusable cell at row {}",
                        name,
                        row_idx + 2
                    );
                    *slot = None;
                }
            }
        }
    }

    let mut result = CsvSignals::default();
    for (values, (_, name)) in columns.into_iter().zip(selected) {
        match values {
            Some(values) => result.signals.push(Signal::new(name, values)),
            None => {
                warn!("Skipping non-numeric column '{}' in {:?}", name, path);
                result.skipped.push(name);
            }
        }
    }
    Ok(result)
}

/// Write segment rows `signal,x0,y0,x1,y1,slope` to any writer
#[cfg(feature = "csv")]
pub fn write_segments_csv<W: std::io::Write>(writer: W, signals: &[SegmentedSignal]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["signal", "x0", "y0", "x1", "y1", "slope"])?;
    for signal in signals {
        for segment in &signal.segments {
            writer.write_record([
                signal.name.clone(),
                segment.x0.to_string(),
                segment.y0.to_string(),
                segment.x1.to_string(),
                segment.y1.to_string(),
                segment.slope().to_string(),
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Export segment lists to `<stem>.segments.csv`
#[cfg(feature = "csv")]
pub fn export_segments_csv(
    input_path: &Path,
    signals: &[SegmentedSignal],
    export_options: &ExportOptions,
) -> Result<PathBuf> {
    let output_path = compute_export_path(input_path, "segments", "csv", export_options);
    ensure_parent_dir(&output_path)?;

    let file = std::fs::File::create(&output_path)
        .with_context(|| format!("Failed to create CSV file: {:?}", output_path))?;
    write_segments_csv(std::io::BufWriter::new(file), signals)
        .with_context(|| format!("Failed to write CSV file: {:?}", output_path))?;

    debug!("Exported {} signals to {:?}", signals.len(), output_path);
    Ok(output_path)
}

/// Export segment lists to `<stem>.segments.json`
#[cfg(feature = "json")]
pub fn export_segments_json(
    input_path: &Path,
    signals: &[SegmentedSignal],
    export_options: &ExportOptions,
) -> Result<PathBuf> {
    let output_path = compute_export_path(input_path, "segments", "json", export_options);
    ensure_parent_dir(&output_path)?;

    let file = std::fs::File::create(&output_path)
        .with_context(|| format!("Failed to create JSON file: {:?}", output_path))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), signals)
        .with_context(|| format!("Failed to write JSON file: {:?}", output_path))?;

    debug!("Exported {} signals to {:?}", signals.len(), output_path);
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_path_defaults_to_input_dir() {
        let options = ExportOptions::default();
        let path = compute_export_path(Path::new("/logs/flight01.csv"), "segments", "csv", &options);
        assert_eq!(path, PathBuf::from("/logs/flight01.segments.csv"));
    }

    #[test]
    fn test_export_path_honours_output_dir() {
        let options = ExportOptions {
            csv: true,
            json: false,
            output_dir: Some("/tmp/out".to_string()),
        };
        let path = compute_export_path(Path::new("/logs/flight01.csv"), "segments", "json", &options);
        assert_eq!(path, PathBuf::from("/tmp/out/flight01.segments.json"));
    }

    #[cfg(feature = "csv")]
    #[test]
    fn test_write_segments_csv_rows() {
        use crate::types::Segment;

        let signals = vec![SegmentedSignal {
            name: "ATT.Yaw".to_string(),
            samples: 5,
            segments: vec![Segment::new(0, 0.0, 2, 4.0), Segment::new(2, 4.0, 4, 4.0)],
        }];
        let mut buffer = Vec::new();
        write_segments_csv(&mut buffer, &signals).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "signal,x0,y0,x1,y1,slope");
        assert_eq!(lines[1], "ATT.Yaw,0,0,2,4,2");
        assert_eq!(lines[2], "ATT.Yaw,2,4,4,4,0");
    }
}
