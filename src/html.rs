use anyhow::{anyhow, Result};

/// Flatten the text content of the first table in an HTML fragment.
///
/// Each text node is trimmed and its internal whitespace collapsed to single
/// spaces; empty nodes are dropped and the rest joined with newlines, one
/// table cell per line. This is the input shape the metric patterns expect,
/// so the output can be fed straight into
/// [MetricExtractor](crate::extract::MetricExtractor).
pub fn flatten_table_text(html: &str) -> Result<String> {
    let dom = tl::parse(html, tl::ParserOptions::default())
        .map_err(|_| anyhow!("Failed to parse document!"))?;
    let parser = dom.parser();

    let table = dom
        .nodes()
        .iter()
        .find_map(|node| node.as_tag().filter(|tag| tag.name() == "table"))
        .ok_or(anyhow!("No table element in document!"))?;

    let lines: Vec<String> = table
        .children()
        .all(parser)
        .iter()
        .filter_map(|node| node.as_raw())
        .map(|raw| raw.as_utf8_str())
        .filter_map(|text| collapse_whitespace(&text))
        .collect();

    Ok(lines.join("\n"))
}

/// Collapse whitespace runs to single spaces; `None` if nothing is left.
fn collapse_whitespace(text: &str) -> Option<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}
