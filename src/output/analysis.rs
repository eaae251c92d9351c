//! Quality review of written records
//!
//! Reads the basic records in an output directory and sorts every stored
//! service into good (names a service keyword), problematic (contains an
//! exclude phrase) or neutral. Useful for tuning the keyword lists.

use super::record::OutputRecord;
use crate::classifier::Lexicon;
use crate::Result;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceQuality {
    Good,
    Problematic,
    Neutral,
}

/// Grades one stored service string
pub fn grade_service(service: &str, lexicon: &Lexicon) -> ServiceQuality {
    if lexicon.has_exclude(service) {
        ServiceQuality::Problematic
    } else if lexicon.has_include(service) {
        ServiceQuality::Good
    } else {
        ServiceQuality::Neutral
    }
}

/// Services of one record with their grades
#[derive(Debug, Clone)]
pub struct GroupQuality {
    pub group_name: String,
    pub services: Vec<(String, ServiceQuality)>,
}

#[derive(Debug, Clone, Default)]
pub struct QualityReport {
    pub groups: Vec<GroupQuality>,
    pub total: usize,
    pub good: usize,
    pub problematic: usize,
    /// Exclude phrases by number of services they hit, most frequent first
    pub top_problematic: Vec<(String, usize)>,
    /// Service keywords by number of good services they hit, most frequent first
    pub top_good: Vec<(String, usize)>,
}

impl QualityReport {
    pub fn neutral(&self) -> usize {
        self.total - self.good - self.problematic
    }

    fn percent(&self, n: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            n as f64 / self.total as f64 * 100.0
        }
    }
}

/// Grades every basic record in `directory`
///
/// Files that are not JSON, enriched copies (`enhanced_*`) and unreadable
/// files are skipped; the latter with a warning.
pub fn analyze_directory(directory: &Path, lexicon: &Lexicon) -> Result<QualityReport> {
    let mut paths: Vec<_> = fs::read_dir(directory)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            name.ends_with(".json") && !name.starts_with("enhanced_")
        })
        .collect();
    paths.sort();

    let mut records = Vec::new();
    for path in paths {
        let parsed = fs::read_to_string(&path)
            .map_err(crate::ScoutError::from)
            .and_then(|content| Ok(serde_json::from_str::<OutputRecord>(&content)?));
        match parsed {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!("Error reading {}: {}", path.display(), e),
        }
    }

    Ok(analyze_records(&records, lexicon))
}

pub fn analyze_records(records: &[OutputRecord], lexicon: &Lexicon) -> QualityReport {
    let mut report = QualityReport::default();
    let mut problem_hits: HashMap<&str, usize> = HashMap::new();
    let mut good_hits: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let mut graded = Vec::with_capacity(record.services.len());
        for service in &record.services {
            let quality = grade_service(service, lexicon);
            match quality {
                ServiceQuality::Problematic => {
                    report.problematic += 1;
                    for phrase in lexicon.matching_excludes(service) {
                        *problem_hits.entry(phrase).or_default() += 1;
                    }
                }
                ServiceQuality::Good => {
                    report.good += 1;
                    for keyword in lexicon.matching_includes(service) {
                        *good_hits.entry(keyword).or_default() += 1;
                    }
                }
                ServiceQuality::Neutral => {}
            }
            report.total += 1;
            graded.push((service.clone(), quality));
        }
        report.groups.push(GroupQuality {
            group_name: record.group_name.clone(),
            services: graded,
        });
    }

    report.top_problematic = ranked(problem_hits);
    report.top_good = ranked(good_hits);
    report
}

fn ranked(hits: HashMap<&str, usize>) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = hits.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// Prints the report to stdout
pub fn print_quality_report(report: &QualityReport) {
    println!("=== Service Quality ===");

    for group in &report.groups {
        println!("\n{}", group.group_name);
        println!("  Total services: {}", group.services.len());
        for (service, quality) in &group.services {
            let label = match quality {
                ServiceQuality::Good => "good",
                ServiceQuality::Problematic => "problematic",
                ServiceQuality::Neutral => "neutral",
            };
            println!("  [{}] {}", label, truncate(service, 80));
        }
    }

    println!("\nSummary:");
    println!("  Total services: {}", report.total);
    println!("  Good: {} ({:.1}%)", report.good, report.percent(report.good));
    println!(
        "  Problematic: {} ({:.1}%)",
        report.problematic,
        report.percent(report.problematic)
    );
    println!("  Neutral: {} ({:.1}%)", report.neutral(), report.percent(report.neutral()));

    if !report.top_problematic.is_empty() {
        println!("\nTop problematic phrases:");
        for (phrase, count) in report.top_problematic.iter().take(10) {
            println!("  {}: {}", phrase, count);
        }
    }

    if !report.top_good.is_empty() {
        println!("\nTop service keywords:");
        for (keyword, count) in report.top_good.iter().take(10) {
            println!("  {}: {}", keyword, count);
        }
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(max).collect::<String>())
    }
}
