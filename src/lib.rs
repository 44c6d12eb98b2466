pub mod extract;
pub mod html;
pub mod patterns;
pub mod record;

use crate::extract::MetricExtractor;
use crate::record::MetricRecord;

/// Run every default pattern against `text` and return the resulting record.
///
/// `text` is the flattened text of one search-result metrics table, one cell
/// per line (see [html::flatten_table_text]). Fields whose markers are
/// missing or unparseable come back null; the record itself is always
/// produced.
pub fn extract(text: &str) -> MetricRecord {
    let mut extractor = MetricExtractor::new(text);
    extractor.extract();
    extractor.to_record()
}
