use super::record::OutputRecord;
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

const ENRICHED_PREFIX: &str = "enhanced_";

/// File-system-safe form of a group name
///
/// Keeps word characters, whitespace and `-`, trims, and turns spaces into
/// underscores. A name with nothing left becomes `unnamed`.
///
/// ```
/// use service_scout::output::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("Eye Care & Surgery, P.C."), "Eye_Care__Surgery_PC");
/// ```
pub fn sanitize_file_name(group_name: &str) -> String {
    let kept: String = group_name
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    let name = kept.trim().replace(' ', "_");
    if name.is_empty() {
        "unnamed".to_string()
    } else {
        name
    }
}

/// File name for a record; enriched records get the `enhanced_` prefix
pub fn record_file_name(record: &OutputRecord) -> String {
    let prefix = if record.is_enriched() { ENRICHED_PREFIX } else { "" };
    format!("{}{}.json", prefix, sanitize_file_name(&record.group_name))
}

/// Writes one JSON document per record into a directory
#[derive(Debug, Clone)]
pub struct RecordWriter {
    directory: PathBuf,
    pretty: bool,
}

impl RecordWriter {
    /// Creates the output directory if it does not exist
    pub fn new(directory: impl Into<PathBuf>, pretty: bool) -> Result<Self> {
        let directory = directory.into();
        if !directory.exists() {
            fs::create_dir_all(&directory)?;
            tracing::info!("Created output directory: {}", directory.display());
        }
        Ok(Self { directory, pretty })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Writes the record, replacing any earlier file for the same group
    pub fn write(&self, record: &OutputRecord) -> Result<PathBuf> {
        let path = self.directory.join(record_file_name(record));
        let json = if self.pretty {
            serde_json::to_string_pretty(record)?
        } else {
            serde_json::to_string(record)?
        };
        fs::write(&path, json)?;
        tracing::info!("Saved results to: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Enrichment;
    use crate::state::ServiceSet;
    use tempfile::TempDir;
    use url::Url;

    fn record(name: &str) -> OutputRecord {
        OutputRecord::new(
            name,
            name,
            "Austin, TX",
            &Url::parse("https://brighteyes.com/").unwrap(),
            ["Cataract Surgery"].into_iter().collect::<ServiceSet>(),
        )
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("Bright Eyes"), "Bright_Eyes");
        assert_eq!(sanitize_file_name("  Smith-Jones Eye Associates. "), "Smith-Jones_Eye_Associates");
        assert_eq!(sanitize_file_name("A/B: Vision"), "AB_Vision");
        assert_eq!(sanitize_file_name("???"), "unnamed");
    }

    #[test]
    fn test_file_names() {
        assert_eq!(record_file_name(&record("Bright Eyes")), "Bright_Eyes.json");
        let enriched = record("Bright Eyes").with_enrichment(Enrichment::default());
        assert_eq!(record_file_name(&enriched), "enhanced_Bright_Eyes.json");
    }

    #[test]
    fn test_write_creates_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested").join("output");
        let writer = RecordWriter::new(&dir, true).unwrap();

        let path = writer.write(&record("Bright Eyes")).unwrap();

        assert_eq!(path, dir.join("Bright_Eyes.json"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n  \"group_name\": \"Bright Eyes\""));
        let back: OutputRecord = serde_json::from_str(&content).unwrap();
        assert_eq!(back.services, vec!["Cataract Surgery"]);
    }
}
