//! Read-only patient directory
//!
//! Built once at startup, either from the built-in seed data or from a YAML
//! file, and never mutated afterwards.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{OutcallError, Result};

use super::record::PatientRecord;

/// YAML file structure
#[derive(Debug, Deserialize)]
struct YamlDirectory {
    patients: Vec<PatientRecord>,
}

/// Immutable identifier → record mapping that remembers insertion order
#[derive(Debug, Clone)]
pub struct Directory {
    records: Vec<PatientRecord>,
    index: HashMap<String, usize>,
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

impl Directory {
    /// Build a directory, rejecting duplicate identifiers
    pub fn from_records(records: Vec<PatientRecord>) -> Result<Self> {
        let mut index = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            if index.insert(record.id.clone(), pos).is_some() {
                return Err(OutcallError::Config(format!(
                    "Duplicate patient ID in directory: {}",
                    record.id
                )));
            }
        }
        Ok(Self { records, index })
    }

    /// The seed directory of test patients
    pub fn builtin() -> Self {
        let records = vec![
            PatientRecord::new("12345", "John Smith", "+15854836965")
                .with_email("john.smith@email.com")
                .with_appointments(ymd(2024, 12, 15), ymd(2025, 1, 15))
                .with_care_team("Dr. Johnson", "Cardiology"),
            PatientRecord::new("67890", "Sarah Williams", "+15854836965")
                .with_email("sarah.williams@email.com")
                .with_appointments(ymd(2024, 11, 20), ymd(2025, 2, 20))
                .with_care_team("Dr. Anderson", "Orthopedics"),
            PatientRecord::new("54321", "Michael Brown", "+16693332017")
                .with_email("michael.brown@email.com")
                .with_appointments(ymd(2024, 10, 10), ymd(2025, 1, 10))
                .with_care_team("Dr. Martinez", "General Medicine"),
        ];

        let index = records
            .iter()
            .enumerate()
            .map(|(pos, r)| (r.id.clone(), pos))
            .collect();
        Self { records, index }
    }

    /// Load a directory from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            OutcallError::Config(format!(
                "Failed to read directory file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Load a directory from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let parsed: YamlDirectory = serde_yaml::from_str(content)
            .map_err(|e| OutcallError::Config(format!("Failed to parse directory YAML: {}", e)))?;
        Self::from_records(parsed.patients)
    }

    /// Look up a record by identifier
    pub fn get(&self, id: &str) -> Option<&PatientRecord> {
        self.index.get(id).map(|&pos| &self.records[pos])
    }

    /// All identifiers, in insertion order
    pub fn ids(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.id.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PatientRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE_YAML: &str = r#"
patients:
  - id: "A1"
    name: Alice Example
    phone_number: "+15550000001"
    email: alice@example.com
    last_appointment: 2024-01-02
    next_appointment_due: 2024-07-02
    doctor: Dr. Who
    department: Dermatology
  - id: "B2"
    name: Bob Example
    phone_number: "+15550000002"
    email: bob@example.com
    last_appointment: 2024-02-03
    next_appointment_due: 2024-08-03
    doctor: Dr. Strange
    department: Neurology
"#;

    #[test]
    fn test_builtin_directory() {
        let dir = Directory::builtin();
        assert_eq!(dir.len(), 3);
        assert_eq!(dir.ids(), vec!["12345", "67890", "54321"]);

        let john = dir.get("12345").unwrap();
        assert_eq!(john.name, "John Smith");
        assert_eq!(john.department, "Cardiology");
        assert_eq!(john.last_appointment, ymd(2024, 12, 15));
    }

    #[test]
    fn test_get_nonexistent() {
        let dir = Directory::builtin();
        assert!(dir.get("99999").is_none());
        assert!(dir.get("").is_none());
    }

    #[test]
    fn test_from_yaml_preserves_order() {
        let dir = Directory::from_yaml(SAMPLE_YAML).unwrap();
        assert_eq!(dir.ids(), vec!["A1", "B2"]);
        assert_eq!(dir.get("B2").unwrap().doctor, "Dr. Strange");
    }

    #[test]
    fn test_from_records_rejects_duplicates() {
        let records = vec![
            PatientRecord::new("1", "First", "+1"),
            PatientRecord::new("1", "Second", "+2"),
        ];
        let err = Directory::from_records(records).unwrap_err();
        assert!(matches!(err, OutcallError::Config(_)));
        assert!(err.to_string().contains("Duplicate patient ID"));
    }

    #[test]
    fn test_from_yaml_invalid() {
        assert!(Directory::from_yaml("patients: [ {").is_err());
        assert!(Directory::from_yaml("patients:\n  - id: x\n").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_YAML.as_bytes()).unwrap();

        let dir = Directory::from_file(file.path()).unwrap();
        assert_eq!(dir.len(), 2);
        assert!(dir.get("A1").is_some());
    }

    #[test]
    fn test_from_file_missing() {
        let err = Directory::from_file("/nonexistent/patients.yml").unwrap_err();
        assert!(err.to_string().contains("Failed to read directory file"));
    }

    #[test]
    fn test_empty_directory() {
        let dir = Directory::from_yaml("patients: []").unwrap();
        assert!(dir.is_empty());
        assert!(dir.ids().is_empty());
    }
}
