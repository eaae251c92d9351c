//! Output module for per-group records and run reporting
//!
//! This module handles:
//! - The JSON record written for each physician group
//! - File naming and writing
//! - Run statistics
//! - Quality review of previously written records

pub mod analysis;
mod record;
pub mod stats;
mod writer;

pub use analysis::{analyze_directory, print_quality_report, QualityReport, ServiceQuality};
pub use record::OutputRecord;
pub use stats::{print_statistics, RunStatistics};
pub use writer::{record_file_name, sanitize_file_name, RecordWriter};
