//! Records and output document written by the ingestion pipelines

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Raw-text template produced by the v1 pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTemplateRecord {
    pub plan_type_key: String,
    pub plan_type_label: String,
    pub source_file: String,
    pub raw_text: String,
}

/// Enriched template produced by the v2 pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub plan_id: String,
    pub plan_type_key: String,
    pub plan_type_label: String,
    pub source_file: String,
    pub raw_text: String,
    pub metadata: PlanMetadata,
}

/// Metadata derived from a template's filename and text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanMetadata {
    /// `YYYY-MM-DD` taken from the filename
    pub date: Option<String>,
    pub distance_meters: Option<u32>,
    pub pool_type: PoolType,
    pub difficulty: Difficulty,
    pub focus_areas: Vec<FocusArea>,
    pub equipment_required: Vec<Equipment>,
    pub estimated_duration_minutes: u32,
    pub intensity: Intensity,
}

/// Course designation of a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PoolType {
    /// Short course yards
    #[default]
    Scy,
    /// Short course meters
    Scm,
    /// Long course meters
    Lcm,
}

impl PoolType {
    /// Parse `SCY`, `SCM` or `LCM`, ignoring case
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "SCY" => Some(PoolType::Scy),
            "SCM" => Some(PoolType::Scm),
            "LCM" => Some(PoolType::Lcm),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PoolType::Scy => "SCY",
            PoolType::Scm => "SCM",
            PoolType::Lcm => "LCM",
        }
    }
}

impl fmt::Display for PoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty tier derived from total distance
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Elite,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Elite => "elite",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Training focus of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusArea {
    Endurance,
    Volume,
    Technique,
    StrokeWork,
    Speed,
    Sprint,
    Mixed,
    Variety,
    Kick,
}

/// Training equipment a plan mentions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    PullBuoy,
    Fins,
    Kickboard,
    Paddles,
    Snorkel,
    Band,
}

/// Session intensity. Not derived from content yet, so every plan is `medium`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    #[default]
    Medium,
}

/// Per-category success counts, serialized as a JSON object in catalog order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeCounts(Vec<(String, usize)>);

impl TypeCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the count for `key`, replacing an earlier value for the same key
    pub fn set(&mut self, key: &str, count: usize) {
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = count,
            None => self.0.push((key.to_string(), count)),
        }
    }

    #[cfg(test)]
    pub(crate) fn get(&self, key: &str) -> Option<usize> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, c)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(k, c)| (k.as_str(), *c))
    }
}

impl Serialize for TypeCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, count) in &self.0 {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

/// Run statistics reported by the v2 pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub total_files: usize,
    pub successful: usize,
    pub failed: usize,
    pub by_type: TypeCounts,
}

/// The JSON artifact written at the end of a run
#[derive(Debug, Clone, Serialize)]
pub struct OutputDocument<T> {
    pub templates: Vec<T>,
    pub version: String,
    /// Always serialized, as `null` when absent
    pub generated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<RunStats>,
}
