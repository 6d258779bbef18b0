mod csv;
mod json;
mod text;

use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use rolling_stats::Stats;
use serde::Serialize;

use crate::offload::OffloadResult;
use crate::signal_processing::FilterKind;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Transfer timing over one or more runs of the same filter, in milliseconds
#[derive(Debug, Clone, Serialize)]
pub struct TimingSummary {
    pub count: usize,
    pub mean_ms: f64,
    pub std_dev_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

impl TimingSummary {
    pub fn from_durations(durations: &[Duration]) -> Option<Self> {
        if durations.is_empty() {
            return None;
        }
        let mut stats: Stats<f64> = Stats::new();
        for d in durations {
            stats.update(d.as_secs_f64() * 1000.0);
        }
        Some(Self {
            count: stats.count,
            mean_ms: stats.mean,
            std_dev_ms: stats.std_dev,
            min_ms: stats.min,
            max_ms: stats.max,
        })
    }
}

/// What gets reported for one applied filter
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub filter: FilterKind,
    pub samples: usize,
    pub sample_rate: u32,
    pub clipped_samples: usize,
    pub latency_samples: usize,
    pub timing: Option<TimingSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,
}

impl RunSummary {
    /// Summary of `result` with timing gathered over `durations` (all runs, including `result`'s).
    pub fn new(result: &OffloadResult, durations: &[Duration], output_file: Option<PathBuf>) -> Self {
        Self {
            filter: result.filter(),
            samples: result.len(),
            sample_rate: result.sample_rate(),
            clipped_samples: result.clipped_samples(),
            latency_samples: result.latency_samples(),
            timing: TimingSummary::from_durations(durations),
            output_file,
        }
    }
}

pub trait Formatter: Send {
    fn format(&self, summary: &RunSummary) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_summary() {
        let durations = [
            Duration::from_millis(10),
            Duration::from_millis(20),
            Duration::from_millis(30),
        ];
        let timing = TimingSummary::from_durations(&durations).unwrap();
        assert_eq!(timing.count, 3);
        assert!((timing.mean_ms - 20.0).abs() < 1e-9);
        assert!((timing.min_ms - 10.0).abs() < 1e-9);
        assert!((timing.max_ms - 30.0).abs() < 1e-9);
        assert!(TimingSummary::from_durations(&[]).is_none());
    }

    #[test]
    fn test_timestamp_shape() {
        let ts = iso8601_timestamp();
        assert_eq!(ts.len(), "2026-01-01T00:00:00.000Z".len());
        assert!(ts.ends_with('Z'));
    }
}
