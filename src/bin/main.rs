//! CLI binary for Flight Segment
//!
//! Segments numeric columns of flight-log CSV files and prints or exports
//! the resulting line segments.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use flight_segment::{
    export_segments_csv, load_csv_signals, unwrap_yaw, ExportOptions, SegmentationOptions,
    SegmentedSignal, Segmenter,
};
use glob::glob;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

fn build_command() -> Command {
    Command::new("Flight Segment")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(concat!(
            env!("CARGO_PKG_VERSION"),
            " (",
            env!("VERGEN_GIT_SHA"),
            ", built ",
            env!("VERGEN_BUILD_DATE"),
            ")"
        ))
        .about("Segment flight-log signals into piecewise-linear approximations.")
        .arg(
            Arg::new("files")
                .help("CSV flight-log files to segment (header row required, supports globbing)")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("column")
                .long("column")
                .short('c')
                .help("Regex selecting columns to segment; repeatable (default: every numeric column)")
                .value_name("REGEX")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("unwrap-yaw")
                .long("unwrap-yaw")
                .help("Regex selecting heading columns whose 0/360 wraparound is undone before segmenting; repeatable")
                .value_name("REGEX")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("algorithm")
                .long("algorithm")
                .short('a')
                .help("Segmentation algorithm: sw (sliding window), bu (bottom-up), td (top-down)")
                .default_value("td"),
        )
        .arg(
            Arg::new("fit")
                .long("fit")
                .help("Fit method: ls (least-squares regression) or inter (interpolation)")
                .default_value("ls"),
        )
        .arg(
            Arg::new("error")
                .long("error")
                .help("Error method: ssr (sum of squared residuals) or rsq (1 - R², budget in [0, 1])")
                .default_value("ssr"),
        )
        .arg(
            Arg::new("max-error")
                .long("max-error")
                .help("Maximum error a segment may carry")
                .value_parser(clap::value_parser!(f64))
                .default_value("1.0"),
        )
        .arg(
            Arg::new("error-growth")
                .long("error-growth")
                .help("Top-down only: fractional budget relaxation per split level")
                .value_parser(clap::value_parser!(f64))
                .default_value("0.0"),
        )
        .arg(
            Arg::new("batch-size")
                .long("batch-size")
                .help("Top-down only: stride between split candidates")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .help("Export segments to <name>.segments.csv")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Export segments to <name>.segments.json (requires the json feature)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for output files (default: same as input file)")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and detailed segmentation information")
                .action(ArgAction::SetTrue),
        )
}

fn init_tracing(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn segmenter_from_matches(matches: &ArgMatches) -> Result<Segmenter> {
    let name = |id: &str| matches.get_one::<String>(id).cloned().unwrap_or_default();

    let mut options = SegmentationOptions {
        algorithm: name("algorithm").parse()?,
        fit_method: name("fit").parse()?,
        error_method: name("error").parse()?,
        max_error: *matches.get_one::<f64>("max-error").unwrap_or(&1.0),
        error_growth: *matches.get_one::<f64>("error-growth").unwrap_or(&0.0),
        ..SegmentationOptions::default()
    };
    options.batch_size = matches.get_one::<usize>("batch-size").copied();

    Ok(Segmenter::new(options)?)
}

fn compile_patterns(matches: &ArgMatches, id: &str) -> Result<Vec<Regex>> {
    matches
        .get_many::<String>(id)
        .map(|values| {
            values
                .map(|pattern| {
                    Regex::new(pattern)
                        .with_context(|| format!("Invalid --{id} pattern '{pattern}'"))
                })
                .collect::<Result<Vec<_>>>()
        })
        .transpose()
        .map(Option::unwrap_or_default)
}

fn expand_inputs(patterns: &[&String]) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for pattern in patterns {
        if pattern.contains('*') || pattern.contains('?') {
            match glob(pattern) {
                Ok(entries) => {
                    for entry in entries {
                        match entry {
                            Ok(path) => paths.push(path),
                            Err(e) => warn!("Error reading path in pattern '{pattern}': {e}"),
                        }
                    }
                }
                Err(e) => warn!("Invalid glob pattern '{pattern}': {e}"),
            }
        } else {
            paths.push(PathBuf::from(pattern));
        }
    }

    paths.retain(|path| {
        if !path.is_file() {
            warn!("File does not exist: {path:?}");
            return false;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if !is_csv {
            warn!("Skipping file without .csv extension: {path:?}");
        }
        is_csv
    });
    paths
}

fn process_file(
    path: &Path,
    selectors: &[Regex],
    yaw_columns: &[Regex],
    segmenter: &Segmenter,
    export_options: &ExportOptions,
) -> Result<usize> {
    let loaded = load_csv_signals(path, |name| {
        selectors.is_empty() || selectors.iter().any(|re| re.is_match(name))
    })?;

    if !loaded.skipped.is_empty() {
        debug!("Skipped non-numeric columns: {:?}", loaded.skipped);
    }

    let mut results = Vec::new();
    for signal in &loaded.signals {
        let values = if yaw_columns.iter().any(|re| re.is_match(&signal.name)) {
            debug!("Unwrapping heading column '{}'", signal.name);
            unwrap_yaw(&signal.values)
        } else {
            signal.values.clone()
        };
        match segmenter.segment(&values) {
            Ok(segments) => {
                let result = SegmentedSignal {
                    name: signal.name.clone(),
                    samples: signal.len(),
                    segments,
                };
                println!(
                    "  {:<32} {:>8} samples -> {:>6} segments ({:.1} samples/segment)",
                    result.name,
                    result.samples,
                    result.segments.len(),
                    result.compression()
                );
                results.push(result);
            }
            Err(e) => {
                // Segmentation unavailable for this signal; dependent analysis skips it
                eprintln!("  {:<32} segmentation unavailable: {e}", signal.name);
            }
        }
    }

    if export_options.csv && !results.is_empty() {
        let out = export_segments_csv(path, &results, export_options)?;
        println!("Exported segments to: {}", out.display());
    }

    #[cfg(feature = "json")]
    if export_options.json && !results.is_empty() {
        let out = flight_segment::export_segments_json(path, &results, export_options)?;
        println!("Exported segments to: {}", out.display());
    }

    #[cfg(not(feature = "json"))]
    if export_options.json {
        warn!("JSON export requested but the json feature is not enabled");
    }

    Ok(results.len())
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();

    let debug = matches.get_flag("debug");
    init_tracing(debug);

    let segmenter = segmenter_from_matches(&matches).context("Invalid segmentation options")?;

    let selectors = compile_patterns(&matches, "column")?;
    let yaw_columns = compile_patterns(&matches, "unwrap-yaw")?;

    let export_options = ExportOptions {
        csv: matches.get_flag("csv"),
        json: matches.get_flag("json"),
        output_dir: matches.get_one::<String>("output-dir").cloned(),
    };

    let file_patterns: Vec<&String> = matches
        .get_many::<String>("files")
        .map(|files| files.collect())
        .unwrap_or_default();
    debug!("Input patterns: {file_patterns:?}");

    let paths = expand_inputs(&file_patterns);
    if paths.is_empty() {
        eprintln!("Error: No valid CSV files found to process.");
        eprintln!("Input patterns were: {file_patterns:?}");
        std::process::exit(1);
    }

    let mut processed_files = 0;
    for (index, path) in paths.iter().enumerate() {
        if index > 0 {
            println!();
        }
        println!("Processing: {}", path.display());

        match process_file(path, &selectors, &yaw_columns, &segmenter, &export_options) {
            Ok(0) => eprintln!("No signal in {} could be segmented", path.display()),
            Ok(_) => processed_files += 1,
            Err(e) => {
                eprintln!("Error processing {}: {e:#}", path.display());
                eprintln!("Continuing with next file...");
            }
        }
    }

    if processed_files == 0 {
        eprintln!(
            "Error: No files were successfully processed out of {} files found.",
            paths.len()
        );
        eprintln!("Use --debug flag for more detailed error information.");
        std::process::exit(1);
    }

    Ok(())
}
