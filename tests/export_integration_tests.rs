//! Integration tests for export functionality
//!
//! Tests the load/export layer across different scenarios:
//! - Numeric column loading with text columns skipped
//! - Column selection by predicate
//! - Segment CSV export with directory creation
//! - Output directory defaulting to input parent
//! - Error handling for missing files
//! - JSON export round trip (json feature)

#![cfg(feature = "csv")]

use flight_segment::{
    export_segments_csv, load_csv_signals, Algorithm, ExportOptions, SegmentationOptions,
    SegmentedSignal, Segmenter,
};
use std::fs;
use tempfile::TempDir;

const FLIGHT_CSV: &str = "\
time,ATT.Yaw,ATT.Roll,MODE
0,0.0,1.0,STABILIZE
1,1.0,1.0,STABILIZE
2,2.0,1.0,LOITER
3,3.0,1.0,LOITER
4,40.0,1.0,LOITER
5,41.0,1.0,RTL
";

fn write_log(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("flight01.csv");
    fs::write(&path, FLIGHT_CSV).expect("Failed to write test log");
    path
}

#[test]
fn test_load_skips_text_columns() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_log(&temp_dir);

    let loaded = load_csv_signals(&path, |_| true).expect("CSV should load");
    let names: Vec<&str> = loaded.signals.iter().map(|s| s.name.as_str()).collect();

    assert_eq!(names, vec!["time", "ATT.Yaw", "ATT.Roll"]);
    assert_eq!(loaded.skipped, vec!["MODE".to_string()]);
    assert_eq!(loaded.signals[1].values, vec![0.0, 1.0, 2.0, 3.0, 40.0, 41.0]);
}

#[test]
fn test_load_honours_column_selection() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_log(&temp_dir);

    let loaded = load_csv_signals(&path, |name| name.starts_with("ATT.")).unwrap();
    assert_eq!(loaded.signals.len(), 2);
    assert!(loaded.skipped.is_empty());
}

#[test]
fn test_load_missing_file_errors() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let result = load_csv_signals(&temp_dir.path().join("missing.csv"), |_| true);
    assert!(result.is_err(), "Missing file should produce an error");
}

#[test]
fn test_export_creates_output_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_log(&temp_dir);
    let nonexistent_dir = temp_dir.path().join("nonexistent").join("output");

    let loaded = load_csv_signals(&path, |name| name == "ATT.Yaw").unwrap();
    let segmenter = Segmenter::new(SegmentationOptions::new(Algorithm::TopDown, 1.0)).unwrap();
    let results: Vec<SegmentedSignal> = loaded
        .signals
        .iter()
        .map(|signal| SegmentedSignal {
            name: signal.name.clone(),
            samples: signal.len(),
            segments: segmenter.segment(&signal.values).unwrap(),
        })
        .collect();

    let export_opts = ExportOptions {
        csv: true,
        json: false,
        output_dir: Some(nonexistent_dir.to_str().unwrap().to_string()),
    };

    let output = export_segments_csv(&path, &results, &export_opts)
        .expect("Export should succeed and create directories");

    assert!(nonexistent_dir.exists(), "Output directory should be created");
    assert_eq!(output, nonexistent_dir.join("flight01.segments.csv"));

    let content = fs::read_to_string(&output).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("signal,x0,y0,x1,y1,slope"));
    let rows: Vec<&str> = lines.collect();
    assert!(rows.len() >= 2, "Jump at index 4 should split the trace");
    assert!(rows.iter().all(|row| row.starts_with("ATT.Yaw,")));
}

#[test]
fn test_export_defaults_to_input_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_log(&temp_dir);

    let results = vec![SegmentedSignal {
        name: "ATT.Roll".to_string(),
        samples: 6,
        segments: vec![flight_segment::Segment::new(0, 1.0, 5, 1.0)],
    }];

    let output = export_segments_csv(&path, &results, &ExportOptions::default()).unwrap();
    assert_eq!(output, temp_dir.path().join("flight01.segments.csv"));

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("ATT.Roll,0,1,5,1,0"));
}

#[cfg(feature = "json")]
#[test]
fn test_json_export_round_trips() {
    use flight_segment::{export_segments_json, Segment};

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_log(&temp_dir);

    let results = vec![SegmentedSignal {
        name: "ATT.Yaw".to_string(),
        samples: 6,
        segments: vec![Segment::new(0, 0.0, 3, 3.0), Segment::new(3, 3.0, 5, 41.0)],
    }];

    let export_opts = ExportOptions {
        csv: false,
        json: true,
        output_dir: None,
    };
    let output = export_segments_json(&path, &results, &export_opts).expect("JSON export");
    assert_eq!(output, temp_dir.path().join("flight01.segments.json"));

    let content = fs::read_to_string(&output).unwrap();
    let parsed: Vec<SegmentedSignal> = serde_json::from_str(&content).expect("Valid JSON");
    assert_eq!(parsed, results);

    let raw: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(raw[0]["segments"][1]["x1"], 5);
}
