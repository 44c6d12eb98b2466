use std::collections::HashMap;

use chrono::NaiveDateTime;
#[cfg(feature = "serde")]
use serde::Serialize;

/// A single time-windowed ranking entry: the period label (e.g. 日, 週, 月)
/// and the point total for that window.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RankEntry {
    pub period: String,
    pub points: u64,
}

impl RankEntry {
    pub fn new<S: Into<String>>(period: S, points: u64) -> Self {
        RankEntry {
            period: period.into(),
            points,
        }
    }
}

/// One extracted field value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(untagged))]
pub enum MetricValue {
    /// Integer metric (word count, points, bookmark count, ...).
    Count(u64),
    /// Raw captured text, trimmed.
    Text(String),
    /// Captured text split into whitespace-separated tokens.
    Tags(Vec<String>),
    /// Last-update timestamp.
    Timestamp(NaiveDateTime),
    /// Ranking entries in extraction order. May be empty, never null.
    Ranks(Vec<RankEntry>),
}

/// The output of one extraction run: a mapping from field name to a nullable
/// value.
///
/// Every configured field is present after [extract](crate::extract::MetricExtractor::extract)
/// has run; a field whose marker was missing or whose capture could not be
/// coerced holds a null value. Nulls are observable through [MetricRecord::is_null],
/// while [MetricRecord::get] and the typed accessors flatten them away.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct MetricRecord {
    fields: HashMap<String, Option<MetricValue>>,
}

impl MetricRecord {
    pub(crate) fn insert(&mut self, field: &str, value: Option<MetricValue>) {
        self.fields.insert(field.to_string(), value);
    }

    /// The value of `field`, if it was extracted successfully.
    pub fn get(&self, field: &str) -> Option<&MetricValue> {
        self.fields.get(field).and_then(Option::as_ref)
    }

    /// Returns true if `field` is part of the record but holds no value.
    pub fn is_null(&self, field: &str) -> bool {
        matches!(self.fields.get(field), Some(None))
    }

    /// Returns true if `field` is part of the record, null or not.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over all fields, nulls included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&MetricValue>)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_ref()))
    }

    pub fn count(&self, field: &str) -> Option<u64> {
        match self.get(field) {
            Some(MetricValue::Count(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        match self.get(field) {
            Some(MetricValue::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn tags(&self, field: &str) -> Option<&[String]> {
        match self.get(field) {
            Some(MetricValue::Tags(tags)) => Some(tags.as_slice()),
            _ => None,
        }
    }

    pub fn timestamp(&self, field: &str) -> Option<NaiveDateTime> {
        match self.get(field) {
            Some(MetricValue::Timestamp(ts)) => Some(*ts),
            _ => None,
        }
    }

    pub fn ranks(&self, field: &str) -> Option<&[RankEntry]> {
        match self.get(field) {
            Some(MetricValue::Ranks(entries)) => Some(entries.as_slice()),
            _ => None,
        }
    }
}
