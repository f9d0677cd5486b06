use std::collections::{BTreeMap, btree_map::Entry};

use chrono::{DateTime, Utc};

/// Summary rows the market data pages carry next to the hourly values.
pub const SUMMARY_KEYS: [&str; 6] = ["Average", "Min", "Max", "Off-peak 1", "Off-peak 2", "Peak"];

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PriceRecord {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,

    /// Price, or [`PriceRecord::INVALID`] when the upstream has no usable value.
    pub value: f64,
}

impl PriceRecord {
    pub const INVALID: f64 = f64::INFINITY;

    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>, value: f64) -> Self {
        Self { start, end, value }
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        self.value == Self::INVALID || self.value.is_nan()
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct AreaSeries {
    pub code: String,
    pub metadata: BTreeMap<String, f64>,
    pub records: Vec<PriceRecord>,
}

impl AreaSeries {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into(), metadata: BTreeMap::new(), records: Vec::new() }
    }

    /// Merge the metadata, the keys that are already present are kept.
    pub fn merge_metadata(&mut self, metadata: impl IntoIterator<Item = (String, f64)>) {
        for (key, value) in metadata {
            if let Entry::Vacant(entry) = self.metadata.entry(key) {
                entry.insert(value);
            }
        }
    }

    /// Append the record unless there is already one starting at the same time.
    pub fn push(&mut self, record: PriceRecord) -> bool {
        if self.records.iter().any(|existing| existing.start == record.start) {
            false
        } else {
            self.records.push(record);
            true
        }
    }
}

/// Per-area series in the order the areas were first seen.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, derive_more::IntoIterator)]
#[into_iterator(owned, ref)]
pub struct MergeResult {
    pub areas: Vec<AreaSeries>,
}

impl MergeResult {
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&AreaSeries> {
        self.areas.iter().find(|series| series.code == code)
    }

    /// Get the area series, inserting an empty one at the end if it is not there yet.
    pub fn get_or_insert(&mut self, code: &str) -> &mut AreaSeries {
        let index = match self.areas.iter().position(|series| series.code == code) {
            Some(index) => index,
            None => {
                self.areas.push(AreaSeries::new(code));
                self.areas.len() - 1
            }
        };
        &mut self.areas[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &AreaSeries> {
        self.areas.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.areas.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}
