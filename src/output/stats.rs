//! Run statistics
//!
//! Counted by the record assembler as rows move through the pipeline and
//! printed at the end of a run.

/// Outcome counts for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Rows considered (after the row limit)
    pub rows_total: usize,

    /// Rows that produced an output file
    pub processed: usize,

    /// Rows without a usable group name
    pub skipped: usize,

    /// Rows for which no website was found
    pub unresolved: usize,

    /// Rows abandoned because of an error
    pub failed: usize,

    /// Services across all written records
    pub services_found: usize,
}

impl RunStatistics {
    /// Share of considered rows that produced a file, in percent
    pub fn success_rate(&self) -> f64 {
        if self.rows_total == 0 {
            0.0
        } else {
            self.processed as f64 / self.rows_total as f64 * 100.0
        }
    }

    pub fn average_services(&self) -> f64 {
        if self.processed == 0 {
            0.0
        } else {
            self.services_found as f64 / self.processed as f64
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== Run Statistics ===\n");

    println!("Rows:");
    println!("  Considered: {}", stats.rows_total);
    println!("  Processed: {}", stats.processed);
    println!("  Skipped (no group name): {}", stats.skipped);
    println!("  No website found: {}", stats.unresolved);
    println!("  Failed: {}", stats.failed);
    println!();

    println!("Services:");
    println!("  Total found: {}", stats.services_found);
    println!("  Average per group: {:.1}", stats.average_services());
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} rows written)",
        stats.success_rate(),
        stats.processed,
        stats.rows_total
    );
}
