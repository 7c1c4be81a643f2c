//! Crawl and run statistics
//!
//! [`CrawlStats`] tracks what happened to each URL of one site crawl;
//! [`RunStatistics`] tracks what happened to each candidate of a run.

/// Per-URL outcome counters for a single site crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages fetched as HTML
    pub fetched: usize,
    /// Rejected by the scope filter (other domain, extension, exclusion)
    pub out_of_scope: usize,
    /// Rejected by robots.txt
    pub robots_denied: usize,
    /// Responses with status >= 400
    pub http_errors: usize,
    /// Timeouts, connection failures and unreadable bodies
    pub network_errors: usize,
    /// Responses that were not HTML
    pub non_html: usize,
    /// HTML pages without visible text
    pub empty_text: usize,
}

impl CrawlStats {
    /// Total number of URLs skipped for any reason
    pub fn skipped(&self) -> usize {
        self.out_of_scope
            + self.robots_denied
            + self.http_errors
            + self.network_errors
            + self.non_html
            + self.empty_text
    }
}

/// What happened to one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOutcome {
    /// Results written; carries the number of pages
    Scraped(usize),
    /// Crawl finished without any page text
    Empty,
    /// No usable homepage URL
    NoHomepage,
    /// Output artifact already present
    AlreadyScraped,
    /// Crawl interrupted before completion
    Aborted,
    /// Crawl or write failed
    Failed,
}

/// Per-candidate counters for a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatistics {
    pub candidates: usize,
    pub scraped: usize,
    pub empty: usize,
    pub skipped_no_homepage: usize,
    pub skipped_existing: usize,
    pub aborted: usize,
    pub failed: usize,
    /// Pages written across all scraped candidates
    pub total_pages: usize,
}

impl RunStatistics {
    /// Counts one candidate outcome
    pub fn record(&mut self, outcome: CandidateOutcome) {
        self.candidates += 1;
        match outcome {
            CandidateOutcome::Scraped(pages) => {
                self.scraped += 1;
                self.total_pages += pages;
            }
            CandidateOutcome::Empty => self.empty += 1,
            CandidateOutcome::NoHomepage => self.skipped_no_homepage += 1,
            CandidateOutcome::AlreadyScraped => self.skipped_existing += 1,
            CandidateOutcome::Aborted => self.aborted += 1,
            CandidateOutcome::Failed => self.failed += 1,
        }
    }

    /// Candidates skipped without crawling
    pub fn skipped(&self) -> usize {
        self.skipped_no_homepage + self.skipped_existing
    }

    /// Share of crawled candidates that produced output, as a percentage
    pub fn success_rate(&self) -> f64 {
        let crawled = self.scraped + self.empty + self.failed;
        if crawled == 0 {
            return 0.0;
        }
        (self.scraped as f64 / crawled as f64) * 100.0
    }
}

/// Prints run statistics to stdout in a formatted manner
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Candidates processed: {}", stats.candidates);
    println!("  Scraped: {} ({} pages)", stats.scraped, stats.total_pages);
    println!("  Empty: {}", stats.empty);
    println!(
        "  Skipped: {} (no homepage: {}, already scraped: {})",
        stats.skipped(),
        stats.skipped_no_homepage,
        stats.skipped_existing
    );
    println!("  Failed: {}", stats.failed);
    if stats.aborted > 0 {
        println!("  Aborted: {}", stats.aborted);
    }
    println!();

    println!("Success Rate: {:.1}%", stats.success_rate());
}
