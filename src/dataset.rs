use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

// ============================================================================
// OUTCOME CLASS
// ============================================================================

/// Binary launch outcome as stored in the `class` column (1 = success, 0 = failure)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OutcomeClass {
    Failure,
    Success,
}

impl OutcomeClass {
    /// Label shown in the single-site pie chart
    pub fn label(&self) -> &'static str {
        match self {
            OutcomeClass::Success => "Success",
            OutcomeClass::Failure => "Failure",
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            OutcomeClass::Success => 1,
            OutcomeClass::Failure => 0,
        }
    }

    pub fn is_success(&self) -> bool {
        *self == OutcomeClass::Success
    }
}

impl TryFrom<u8> for OutcomeClass {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(OutcomeClass::Success),
            0 => Ok(OutcomeClass::Failure),
            other => Err(format!("outcome class must be 0 or 1, got {}", other)),
        }
    }
}

impl From<OutcomeClass> for u8 {
    fn from(class: OutcomeClass) -> Self {
        class.code()
    }
}

// ============================================================================
// LAUNCH RECORD
// ============================================================================

/// One row of the launch table.
/// Column names follow the published dataset; unknown columns are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    #[serde(rename = "Launch Site")]
    pub launch_site: String,

    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,

    #[serde(rename = "Booster Version Category")]
    pub booster_version_category: String,

    #[serde(rename = "class")]
    pub class: OutcomeClass,

    // Optional columns, only used for hover text
    #[serde(rename = "Flight Number", default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<u32>,

    #[serde(rename = "Booster Version", default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booster_version: Option<String>,
}

impl LaunchRecord {
    pub fn new(
        launch_site: &str,
        payload_mass_kg: f64,
        booster_version_category: &str,
        class: OutcomeClass,
    ) -> Self {
        LaunchRecord {
            launch_site: launch_site.to_string(),
            payload_mass_kg,
            booster_version_category: booster_version_category.to_string(),
            class,
            flight_number: None,
            booster_version: None,
        }
    }

    /// Builder pattern: add flight number
    pub fn with_flight_number(mut self, flight_number: u32) -> Self {
        self.flight_number = Some(flight_number);
        self
    }

    /// Builder pattern: add booster version
    pub fn with_booster_version(mut self, booster_version: &str) -> Self {
        self.booster_version = Some(booster_version.to_string());
        self
    }
}

// ============================================================================
// DATASET HANDLE
// ============================================================================

/// Immutable, cheaply clonable handle to the loaded launch table.
///
/// Built once at startup and handed to every consumer explicitly.
/// Clones share the same records.
#[derive(Debug, Clone)]
pub struct Dataset {
    inner: Arc<DatasetInner>,
}

#[derive(Debug)]
struct DatasetInner {
    records: Vec<LaunchRecord>,
    site_names: Vec<String>,
    payload_bounds: Option<(f64, f64)>,
    source: String,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    /// Load the launch table from a CSV file
    pub fn load_csv(csv_path: &Path) -> Result<Dataset> {
        let file = std::fs::File::open(csv_path)
            .with_context(|| format!("Failed to open CSV file {}", csv_path.display()))?;

        Self::from_reader(file, &csv_path.display().to_string())
    }

    /// Parse a launch table from any CSV reader (header row required)
    pub fn from_reader<R: Read>(reader: R, source: &str) -> Result<Dataset> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for (index, result) in rdr.deserialize().enumerate() {
            // Line 1 is the header
            let line = index + 2;
            let record: LaunchRecord = result
                .with_context(|| format!("Failed to deserialize launch record at line {}", line))?;

            if !record.payload_mass_kg.is_finite() {
                bail!(
                    "Payload mass at line {} is not a finite number: {}",
                    line,
                    record.payload_mass_kg
                );
            }

            records.push(record);
        }

        Ok(Self::from_records(records, source))
    }

    /// Wrap already-built records (tests, fixtures)
    pub fn from_records(records: Vec<LaunchRecord>, source: &str) -> Dataset {
        let mut site_names: Vec<String> = Vec::new();
        for record in &records {
            if !site_names.iter().any(|s| s == &record.launch_site) {
                site_names.push(record.launch_site.clone());
            }
        }

        let payload_bounds = records.iter().map(|r| r.payload_mass_kg).fold(None, |acc, mass| {
            match acc {
                None => Some((mass, mass)),
                Some((lo, hi)) => Some((f64::min(lo, mass), f64::max(hi, mass))),
            }
        });

        Dataset {
            inner: Arc::new(DatasetInner {
                records,
                site_names,
                payload_bounds,
                source: source.to_string(),
                loaded_at: Utc::now(),
            }),
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.inner.records
    }

    pub fn len(&self) -> usize {
        self.inner.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.records.is_empty()
    }

    /// Distinct site names in first-appearance order
    pub fn site_names(&self) -> &[String] {
        &self.inner.site_names
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.inner.site_names.iter().any(|s| s == site)
    }

    /// Smallest payload mass in the table (None when empty)
    pub fn min_payload(&self) -> Option<f64> {
        self.inner.payload_bounds.map(|(lo, _)| lo)
    }

    /// Largest payload mass in the table (None when empty)
    pub fn max_payload(&self) -> Option<f64> {
        self.inner.payload_bounds.map(|(_, hi)| hi)
    }

    pub fn total_successes(&self) -> usize {
        self.records().iter().filter(|r| r.class.is_success()).count()
    }

    /// Where the records came from (file path or fixture name)
    pub fn source(&self) -> &str {
        &self.inner.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.inner.loaded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,0,0.0,F9 v1.0  B0004,v1.0
2,3,VAFB SLC-4E,1,500.0,F9 v1.1  B1003,v1.1
3,4,KSC LC-39A,1,9600.0,F9 FT B1031.1,FT
";

    #[test]
    fn test_parse_published_columns() {
        let dataset = Dataset::from_reader(SAMPLE_CSV.as_bytes(), "sample").unwrap();

        assert_eq!(dataset.len(), 4);
        let first = &dataset.records()[0];
        assert_eq!(first.launch_site, "CCAFS LC-40");
        assert_eq!(first.class, OutcomeClass::Failure);
        assert_eq!(first.flight_number, Some(1));
        assert_eq!(first.booster_version.as_deref(), Some("F9 v1.0  B0003"));
        assert_eq!(dataset.records()[3].payload_mass_kg, 9600.0);
        assert_eq!(dataset.records()[3].booster_version_category, "FT");
    }

    #[test]
    fn test_site_names_keep_first_appearance_order() {
        let dataset = Dataset::from_reader(SAMPLE_CSV.as_bytes(), "sample").unwrap();

        assert_eq!(
            dataset.site_names(),
            &["CCAFS LC-40".to_string(), "VAFB SLC-4E".to_string(), "KSC LC-39A".to_string()]
        );
        assert!(dataset.has_site("KSC LC-39A"));
        assert!(!dataset.has_site("CCAFS SLC-40"));
    }

    #[test]
    fn test_payload_bounds_and_success_total() {
        let dataset = Dataset::from_reader(SAMPLE_CSV.as_bytes(), "sample").unwrap();

        assert_eq!(dataset.min_payload(), Some(0.0));
        assert_eq!(dataset.max_payload(), Some(9600.0));
        assert_eq!(dataset.total_successes(), 2);
    }

    #[test]
    fn test_optional_columns_may_be_absent() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,class\nA,100,FT,1\n";
        let dataset = Dataset::from_reader(csv.as_bytes(), "minimal").unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].flight_number, None);
        assert_eq!(dataset.records()[0].booster_version, None);
    }

    #[test]
    fn test_missing_required_column_is_an_error() {
        let csv = "Launch Site,Booster Version Category,class\nA,FT,1\n";
        assert!(Dataset::from_reader(csv.as_bytes(), "broken").is_err());
    }

    #[test]
    fn test_outcome_class_outside_zero_one_is_an_error() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,class\nA,100,FT,2\n";
        let err = Dataset::from_reader(csv.as_bytes(), "broken").unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn test_non_numeric_payload_is_an_error() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,class\nA,heavy,FT,1\n";
        assert!(Dataset::from_reader(csv.as_bytes(), "broken").is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = Dataset::load_csv(Path::new("definitely/not/here.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_header_only_file_is_empty_dataset() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,class\n";
        let dataset = Dataset::from_reader(csv.as_bytes(), "empty").unwrap();

        assert!(dataset.is_empty());
        assert!(dataset.site_names().is_empty());
        assert_eq!(dataset.min_payload(), None);
    }

    #[test]
    fn test_clones_share_records() {
        let dataset = Dataset::from_records(
            vec![LaunchRecord::new("A", 1.0, "FT", OutcomeClass::Success)],
            "fixture",
        );
        let clone = dataset.clone();

        assert!(std::ptr::eq(dataset.records().as_ptr(), clone.records().as_ptr()));
        assert_eq!(clone.source(), "fixture");
    }
}
