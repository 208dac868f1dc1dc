use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Pandemic record ──────────────────────────────────────────────────────

/// One historical epidemic or pandemic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PandemicRecord {
    pub id: String,
    pub name: String,
    /// Year of onset. Whether it is BCE is carried by `era`, not by the sign.
    pub year: i32,
    /// Century label, e.g. "14 век". Only ever compared for equality.
    pub era: String,
    pub deaths: u64,
    pub regions: Vec<String>,
    pub symptoms: Vec<String>,
    pub description: String,
    /// Display color token, e.g. "#D946EF"
    pub color: String,
}

// ── Dataset ──────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate record id {0:?}")]
    DuplicateId(String),
    #[error("record {0:?} has no regions")]
    EmptyRegions(String),
    #[error("record {0:?} has no symptoms")]
    EmptySymptoms(String),
}

/// On-disk shape of a dataset file.
#[derive(Serialize, Deserialize)]
struct DatasetFile {
    pandemics: Vec<PandemicRecord>,
}

/// Ordered, validated collection of records. Insertion order is the default
/// grid order; views that need another order sort a copy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    records: Vec<PandemicRecord>,
}

const BUILTIN_JSON: &str = include_str!("../data/pandemics.json");

impl Dataset {
    pub fn new(records: Vec<PandemicRecord>) -> Result<Self, DatasetError> {
        let mut seen = HashSet::new();
        for r in &records {
            if !seen.insert(r.id.as_str()) {
                return Err(DatasetError::DuplicateId(r.id.clone()));
            }
            if r.regions.is_empty() {
                return Err(DatasetError::EmptyRegions(r.id.clone()));
            }
            if r.symptoms.is_empty() {
                return Err(DatasetError::EmptySymptoms(r.id.clone()));
            }
        }
        Ok(Self { records })
    }

    /// Parse `{ "pandemics": [...] }` and validate it.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let file: DatasetFile = serde_json::from_str(json)?;
        Self::new(file.pandemics)
    }

    /// The canonical dataset embedded at compile time.
    pub fn builtin() -> Result<Self, DatasetError> {
        Self::from_json(BUILTIN_JSON)
    }

    pub fn to_json_pretty(&self) -> Result<String, DatasetError> {
        let file = DatasetFile {
            pandemics: self.records.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    pub fn records(&self) -> &[PandemicRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PandemicRecord> {
        self.records.iter()
    }

    pub fn get(&self, id: &str) -> Option<&PandemicRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Look a record up by id first, then by exact name.
    pub fn find(&self, key: &str) -> Option<&PandemicRecord> {
        self.get(key)
            .or_else(|| self.records.iter().find(|r| r.name == key))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a PandemicRecord;
    type IntoIter = std::slice::Iter<'a, PandemicRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
