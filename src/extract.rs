use anyhow::{anyhow, bail, Result};
use chrono::NaiveDateTime;
use log::{error, trace, warn};
use regex::Regex;

use crate::patterns::{self, FieldKind, FieldTable};
use crate::record::{MetricRecord, MetricValue, RankEntry};

/// Extracts metric fields from the flattened text of one search-result table.
///
/// The extractor holds the current target text and the record produced from
/// it. [reset](MetricExtractor::reset) swaps in a new text and discards all
/// previously computed values; [extract](MetricExtractor::extract) rebuilds
/// the record from scratch, so running it twice on the same text yields the
/// same record.
///
/// Extraction never fails as a whole. A field whose marker is missing or
/// whose captured value cannot be coerced is recorded as null and the
/// failure is logged; every other field is still produced.
pub struct MetricExtractor {
    table: FieldTable,
    text: String,
    record: MetricRecord,
}

impl MetricExtractor {
    /// Create an extractor over `text` with the default field table.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self::with_table(text, FieldTable::default())
    }

    /// Create an extractor over `text` with a caller-supplied field table.
    pub fn with_table<S: Into<String>>(text: S, table: FieldTable) -> Self {
        MetricExtractor {
            table,
            text: text.into(),
            record: MetricRecord::default(),
        }
    }

    /// Replace the target text and discard any previously computed fields.
    pub fn reset<S: Into<String>>(&mut self, text: S) {
        self.text = text.into();
        self.record = MetricRecord::default();
    }

    /// Run every configured pattern against the current text.
    pub fn extract(&mut self) {
        let text = self.text.as_str();
        let mut record = MetricRecord::default();

        record.insert(
            "word_cnt",
            scan_scalar(text, &patterns::WORD_COUNT, "word_cnt", FieldKind::Count),
        );
        record.insert(
            "post_cnt",
            scan_scalar(text, &patterns::POST_COUNT, "post_cnt", FieldKind::Count),
        );

        for entry in self.table.entries() {
            record.insert(
                entry.field(),
                scan_scalar(text, entry.regex(), entry.field(), entry.kind()),
            );
        }

        record.insert("rank", Some(MetricValue::Ranks(scan_ranks(text))));

        self.record = record;
    }

    /// The record produced by the last [extract](MetricExtractor::extract) call.
    pub fn record(&self) -> &MetricRecord {
        &self.record
    }

    /// Clone the accumulated record into the public output type.
    pub fn to_record(&self) -> MetricRecord {
        self.record.clone()
    }
}

/// Scan `text` with `regex` and return the first capture that coerces under
/// the field's kind.
///
/// Candidates are tried in match order; one that fails coercion falls
/// through to the next occurrence. A miss is logged at error level, a
/// capture set where nothing coerced at warn level, and either way the
/// caller records a null value.
fn scan_scalar(text: &str, regex: &Regex, field: &str, kind: FieldKind) -> Option<MetricValue> {
    let mut failure = None;

    for caps in regex.captures_iter(text) {
        let raw = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        match coerce(raw, kind) {
            Ok(value) => return Some(value),
            Err(err) => failure = Some(err),
        }
    }

    match failure {
        Some(err) => warn!("field {field:?}: no candidate coerced: {err}"),
        None => error!("field {field:?}: no match in input text"),
    }
    None
}

/// Collect every period/points pair in the ranking section, in match order.
/// An entry whose point value does not coerce is skipped.
fn scan_ranks(text: &str) -> Vec<RankEntry> {
    let mut entries = Vec::new();

    for caps in patterns::RANK.captures_iter(text) {
        let period = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let raw_points = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        match coerce_count(raw_points) {
            Ok(points) => entries.push(RankEntry::new(period, points)),
            Err(err) => warn!("rank entry {period:?}: {err}"),
        }
    }

    if entries.is_empty() {
        trace!("no ranking entries in input text");
    }
    entries
}

fn coerce(raw: &str, kind: FieldKind) -> Result<MetricValue> {
    match kind {
        FieldKind::Count => coerce_count(raw).map(MetricValue::Count),
        FieldKind::Text => {
            let text = raw.trim();
            if text.is_empty() {
                bail!("empty capture");
            }
            Ok(MetricValue::Text(text.to_string()))
        }
        FieldKind::Tags => {
            let tags: Vec<String> = raw.split_whitespace().map(str::to_string).collect();
            if tags.is_empty() {
                bail!("empty capture");
            }
            Ok(MetricValue::Tags(tags))
        }
        FieldKind::Timestamp => coerce_timestamp(raw).map(MetricValue::Timestamp),
    }
}

/// Strip everything but digits, then parse. Thousands separators and unit
/// suffixes disappear here; a capture without any digits is a failure.
fn coerce_count(raw: &str) -> Result<u64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        bail!("no digits in {raw:?}");
    }
    digits
        .parse::<u64>()
        .map_err(|err| anyhow!("cannot parse {digits:?}: {err}"))
}

fn coerce_timestamp(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), patterns::UPDATE_LAYOUT)
        .map_err(|err| anyhow!("bad timestamp {raw:?}: {err}"))
}
