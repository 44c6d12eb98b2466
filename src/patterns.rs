use std::collections::HashSet;
use std::sync::LazyLock;

use anyhow::{bail, Result};
use log::error;
use regex::Regex;

/// Word count: a digit run (possibly with thousands separators) directly
/// before the 文字 marker.
pub static WORD_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\d,]+)文字").expect("word count pattern"));

/// Post count: the digit run inside the (全N部分) marker.
pub static POST_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(全([\d,]*)部分\)").expect("post count pattern"));

/// Ranking entries: at most two ideographs naming the period before 間,
/// then the point value, both suffixed with pt.
pub static RANK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\p{Han}{1,2})間pt\D{1,5}([\d,]*)pt").expect("rank pattern"));

/// Layout of the timestamp following the last-update marker.
pub const UPDATE_LAYOUT: &str = "%Y/%m/%d %H:%M";

/// The kind of value a field coerces to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Integer; every non-digit character is stripped before parsing.
    Count,
    /// Raw captured text, trimmed. Empty captures do not count as a match.
    Text,
    /// Captured text split on whitespace into a list of tokens.
    Tags,
    /// Timestamp in the [UPDATE_LAYOUT] layout.
    Timestamp,
}

/// A metric anchored to a literal label in the source text, e.g. the genre
/// value following ジャンル.
#[derive(Debug, Clone)]
pub struct LabelField {
    pub field: String,
    pub label: String,
    pub kind: FieldKind,
}

impl LabelField {
    pub fn new<F: Into<String>, L: Into<String>>(field: F, label: L, kind: FieldKind) -> Self {
        LabelField {
            field: field.into(),
            label: label.into(),
            kind,
        }
    }
}

/// A label field with its pattern compiled.
pub(crate) struct CompiledField {
    field: String,
    kind: FieldKind,
    regex: Regex,
}

impl CompiledField {
    pub(crate) fn field(&self) -> &str {
        &self.field
    }

    pub(crate) fn kind(&self) -> FieldKind {
        self.kind
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// The label-to-field table the extractor runs against.
///
/// Validated and compiled up front so that extraction can never encounter an
/// unregistered pattern: duplicate field names and empty labels are rejected
/// here, and an entry whose template the regex engine refuses is logged and
/// dropped from the table.
pub struct FieldTable {
    entries: Vec<CompiledField>,
}

impl FieldTable {
    pub fn new(fields: Vec<LabelField>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(fields.len());

        for spec in fields {
            if spec.label.trim().is_empty() {
                bail!("field {:?} has an empty label", spec.field);
            }
            if !seen.insert(spec.field.clone()) {
                bail!("duplicate field {:?}", spec.field);
            }
            match Regex::new(&template(&spec)) {
                Ok(regex) => entries.push(CompiledField {
                    field: spec.field,
                    kind: spec.kind,
                    regex,
                }),
                Err(err) => {
                    error!(
                        "field {:?}: pattern failed to compile, skipping: {err}",
                        spec.field
                    );
                }
            }
        }

        Ok(FieldTable { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of all configured fields, in table order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.field())
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = &CompiledField> {
        self.entries.iter()
    }
}

impl Default for FieldTable {
    fn default() -> Self {
        FieldTable::new(default_fields()).expect("default field table is valid")
    }
}

/// The canonical label table for search result pages.
pub fn default_fields() -> Vec<LabelField> {
    vec![
        LabelField::new("genre", "ジャンル", FieldKind::Text),
        LabelField::new("keywords", "キーワード", FieldKind::Tags),
        LabelField::new("global_point", "総合ポイント", FieldKind::Count),
        LabelField::new("weekly_unique_cnt", "週別ユニークユーザ", FieldKind::Count),
        LabelField::new("review_cnt", "レビュー数", FieldKind::Count),
        LabelField::new("bookmark_cnt", "ブックマーク", FieldKind::Count),
        LabelField::new("hyouka_cnt", "評価人数", FieldKind::Count),
        LabelField::new("hyouka_point", "評価ポイント", FieldKind::Count),
        LabelField::new("most_recent_update", "最終更新日", FieldKind::Timestamp),
    ]
}

/// Build the pattern for one label field.
///
/// The label is matched literally; the value follows after a short run of
/// separator characters, bounded at 5 so a label can never pick up a value
/// from an unrelated part of the text. The text/tags separator class stays
/// on the label's own line, since the flattened input carries one table cell
/// per line.
fn template(spec: &LabelField) -> String {
    let label = regex::escape(&spec.label);
    match spec.kind {
        FieldKind::Count => format!(r"{label}\D{{1,5}}([\d,]*)"),
        FieldKind::Text | FieldKind::Tags => format!(r"{label}[^\w\n]{{1,5}}(.*)"),
        FieldKind::Timestamp => {
            format!(r"{label}\D{{1,5}}(\d{{4}}/\d{{2}}/\d{{2}}\s\d{{2}}:\d{{2}})")
        }
    }
}
