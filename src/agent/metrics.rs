//! Telemetry scraping from agent diagnostic output.

use std::collections::BTreeMap;
use tracing::info;

/// Metric name to value.
pub type Metrics = BTreeMap<String, f64>;

/// Keywords marking a line as token or cost telemetry.
const METRIC_KEYWORDS: &[&str] = &["tokens", "cost"];

/// Scan agent output for token and cost telemetry.
///
/// Matching lines are logged. Nothing is parsed into the map yet, so the
/// result is currently always `None`; callers must treat `None` and an empty
/// map alike as "no metrics available".
pub fn extract_metrics<I, S>(lines: I) -> Option<Metrics>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    // TODO: parse "tokens: N" / "cost: $X" into the map once the Copilot CLI
    // log format for usage lines is pinned down.
    let metrics = Metrics::new();

    for line in lines {
        let line = line.as_ref();
        let lower = line.to_lowercase();
        if METRIC_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
            info!("Metric: {}", line);
        }
    }

    if metrics.is_empty() {
        None
    } else {
        Some(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_lines_do_not_populate_metrics() {
        let lines = ["starting session", "tokens: 42", "Total COST: $0.01"];
        assert_eq!(extract_metrics(lines), None);
    }

    #[test]
    fn test_no_matching_lines() {
        assert_eq!(extract_metrics(["hello", "world"]), None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_metrics(Vec::<String>::new()), None);
    }
}
