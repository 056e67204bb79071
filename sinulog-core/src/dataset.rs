//! The raw event dataset, as shipped with the app.
//!
//! A JSON object keyed by date or date range, each value an object of
//! event name to detail. Document order is preserved for both levels.

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::detail::Detail;
use crate::error::{ScheduleError, ScheduleResult};

/// Sinulog 2025 schedule bundled into the binary.
pub const BUNDLED_DATASET: &str = include_str!("../data/sinulog-2025.json");

/// One top-level entry: a date key and the events listed under it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    pub key: String,
    pub events: Vec<(String, Detail)>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDataset {
    entries: Vec<RawEntry>,
}

impl RawDataset {
    pub fn new(entries: Vec<RawEntry>) -> Self {
        RawDataset { entries }
    }

    pub fn bundled() -> ScheduleResult<Self> {
        Self::from_json(BUNDLED_DATASET)
    }

    pub fn from_json(json: &str) -> ScheduleResult<Self> {
        serde_json::from_str(json).map_err(|e| ScheduleError::Dataset(e.to_string()))
    }

    /// Load a dataset document from disk.
    pub fn load(path: &Path) -> ScheduleResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
            .map_err(|e| ScheduleError::Dataset(format!("{}: {}", path.display(), e)))
    }

    pub fn entries(&self) -> &[RawEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for RawDataset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let OrderedMap(entries) = OrderedMap::<OrderedMap<Detail>>::deserialize(deserializer)?;

        let entries = entries
            .into_iter()
            .map(|(key, OrderedMap(events))| RawEntry { key, events })
            .collect();

        Ok(RawDataset { entries })
    }
}

/// A JSON object read into a Vec so key order survives.
struct OrderedMap<V>(Vec<(String, V)>);

impl<'de, V> Deserialize<'de> for OrderedMap<V>
where
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V> Visitor<'de> for OrderedMapVisitor<V>
where
    V: Deserialize<'de>,
{
    type Value = OrderedMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            entries.push((key, value));
        }
        Ok(OrderedMap(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_order_is_preserved() {
        let raw = RawDataset::from_json(
            r#"{
                "January 19 2025": { "Zumba": "[5:00 AM, SRP]", "Awit": "[6:00 AM, SRP]" },
                "January 9 2025": { "Walk with Jesus": "[4:00 AM, Fuente Osmeña]" }
            }"#,
        )
        .unwrap();

        let keys: Vec<_> = raw.entries().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["January 19 2025", "January 9 2025"]);

        let names: Vec<_> = raw.entries()[0].events.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Zumba", "Awit"]);
    }

    #[test]
    fn test_list_details_collapse_to_first() {
        let raw = RawDataset::from_json(
            r#"{ "January 18 2025": { "Procession": ["[1:00 PM, Plaza Independencia]", "notes"] } }"#,
        )
        .unwrap();

        let (_, detail) = &raw.entries()[0].events[0];
        assert_eq!(detail.as_str(), "[1:00 PM, Plaza Independencia]");
    }

    #[test]
    fn test_rejects_non_object_document() {
        assert!(matches!(
            RawDataset::from_json("[1, 2, 3]"),
            Err(ScheduleError::Dataset(_))
        ));
    }

    #[test]
    fn test_bundled_dataset_parses() {
        let raw = RawDataset::bundled().unwrap();
        assert!(!raw.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(&path, r#"{ "January 9 2025": { "Opening Salvo": "[6:00 PM, Plaza Independencia]" } }"#)
            .unwrap();

        let raw = RawDataset::load(&path).unwrap();
        assert_eq!(raw.len(), 1);

        assert!(matches!(
            RawDataset::load(&dir.path().join("missing.json")),
            Err(ScheduleError::Io(_))
        ));
    }
}
