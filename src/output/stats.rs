//! Human-readable run statistics

use crate::output::traits::CrawlReport;

/// Renders the statistics block of a report
pub fn format_statistics(report: &CrawlReport) -> String {
    let stats = &report.stats;
    let mut out = String::new();

    out.push_str("=== Crawl Statistics ===\n\n");
    out.push_str(&format!("  Base URL: {}\n", report.base_url));
    out.push_str(&format!("  Final state: {}\n", report.state.as_str()));
    if let Some(duration) = stats.duration() {
        out.push_str(&format!(
            "  Duration: {}.{:03}s\n",
            duration.num_seconds(),
            duration.num_milliseconds().rem_euclid(1000)
        ));
    }
    out.push('\n');

    out.push_str(&format!("  Pages crawled: {}\n", stats.pages_crawled));
    out.push_str(&format!("  Targets found: {}\n", stats.targets_found));
    out.push_str(&format!("  Fetch errors: {}\n", stats.fetch_errors));
    out.push_str(&format!("  Retries performed: {}\n", stats.retries_performed));

    let attempted = stats.pages_crawled + stats.fetch_errors;
    let success_rate = if attempted > 0 {
        (stats.pages_crawled as f64 / attempted as f64) * 100.0
    } else {
        0.0
    };
    out.push_str(&format!(
        "\nSuccess Rate: {:.1}% ({} / {} pages fetched)\n",
        success_rate, stats.pages_crawled, attempted
    ));

    if report.is_partial() {
        out.push_str("\nNote: the run was interrupted; results are partial.\n");
    }

    out
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(report: &CrawlReport) {
    print!("{}", format_statistics(report));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::CrawlState;
    use crate::output::RunStats;

    fn report(state: CrawlState, pages: u64, errors: u64) -> CrawlReport {
        CrawlReport {
            state,
            base_url: "https://example.com/".to_string(),
            targets: vec![],
            stats: RunStats {
                pages_crawled: pages,
                fetch_errors: errors,
                ..RunStats::default()
            },
        }
    }

    #[test]
    fn test_success_rate() {
        let text = format_statistics(&report(CrawlState::Completed, 8, 2));
        assert!(text.contains("Success Rate: 80.0% (8 / 10 pages fetched)"));
        assert!(!text.contains("partial"));
    }

    #[test]
    fn test_zero_pages() {
        let text = format_statistics(&report(CrawlState::Completed, 0, 0));
        assert!(text.contains("Success Rate: 0.0%"));
    }

    #[test]
    fn test_partial_note() {
        let text = format_statistics(&report(CrawlState::Aborted, 2, 0));
        assert!(text.contains("Final state: aborted"));
        assert!(text.contains("results are partial"));
    }
}
