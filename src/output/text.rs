use super::{Formatter, RunSummary};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, summary: &RunSummary) -> String {
        let mut line = match &summary.timing {
            Some(t) => format!(
                "{:<9} Success! ({:.4}s) {} samples @ {}Hz",
                summary.filter.as_str(),
                t.mean_ms / 1000.0,
                summary.samples,
                summary.sample_rate
            ),
            None => format!(
                "{:<9} {} samples @ {}Hz",
                summary.filter.as_str(),
                summary.samples,
                summary.sample_rate
            ),
        };

        if self.verbose {
            if let Some(t) = &summary.timing
                && t.count > 1
            {
                line.push_str(&format!(
                    " [runs: {}, min: {:.3}ms, max: {:.3}ms, std: {:.3}ms]",
                    t.count, t.min_ms, t.max_ms, t.std_dev_ms
                ));
            }
            line.push_str(&format!(
                " [latency: {} samples, clipped: {}]",
                summary.latency_samples, summary.clipped_samples
            ));
        }

        if let Some(path) = &summary.output_file {
            line.push_str(&format!(" -> {}", path.display()));
        }
        line
    }
}
