use super::{Formatter, RunSummary, iso8601_timestamp};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, summary: &RunSummary) -> String {
        let (runs, mean, min, max) = summary.timing.as_ref().map_or(
            (String::new(), String::new(), String::new(), String::new()),
            |t| {
                (
                    t.count.to_string(),
                    format!("{:.4}", t.mean_ms),
                    format!("{:.4}", t.min_ms),
                    format!("{:.4}", t.max_ms),
                )
            },
        );
        let file = summary
            .output_file
            .as_ref()
            .map_or(String::new(), |p| p.display().to_string());
        format!(
            "{},{},{},{},{},{},{},{},{},{},{}",
            iso8601_timestamp(),
            summary.filter.compact_name(),
            summary.samples,
            summary.sample_rate,
            summary.clipped_samples,
            summary.latency_samples,
            runs,
            mean,
            min,
            max,
            file
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some("ts,filter,samples,sample_rate,clipped,latency_samples,runs,mean_ms,min_ms,max_ms,file")
    }
}
