//! Case-insensitive substring search over the document index.
//!
//! Matching is deliberately simple: a document hits when the query
//! appears in its name or its content. No stemming, no ranking beyond
//! name order. Content hits carry a short context snippet around the
//! first occurrence.

use serde::{Deserialize, Serialize};

use crate::index::FileIndex;

/// Characters of context kept on each side of a content match.
pub const SNIPPET_RADIUS: usize = 60;

/// Marker appended where a snippet was cut out of longer content.
const SNIPPET_ELLIPSIS: char = '\u{2026}';

/// A single search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub path: String,
    pub name: String,
    pub ext: String,
    /// Context around the first content match, empty for name-only hits
    pub snippet: String,
}

/// Runs a substring query against every indexed document.
///
/// The query is trimmed and compared case-insensitively; an empty or
/// whitespace-only query matches nothing. Each matching document
/// appears exactly once, sorted like [`FileIndex::list`].
pub fn search(index: &FileIndex, query: &str) -> Vec<SearchHit> {
    let needle = query.to_lowercase().trim().to_string();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit> = Vec::new();
    for (path, entry) in index.entries() {
        let name_match = entry.name.to_lowercase().contains(&needle);
        let snippet = content_snippet(&entry.content, &needle);

        if name_match || snippet.is_some() {
            hits.push(SearchHit {
                path: path.clone(),
                name: entry.name.clone(),
                ext: entry.ext.clone(),
                snippet: snippet.unwrap_or_default(),
            });
        }
    }

    hits.sort_by_cached_key(|hit| (hit.name.to_lowercase(), hit.path.clone()));
    hits
}

/// Extracts a context window around the first occurrence of the
/// needle, or `None` when the content does not match.
///
/// The window spans [`SNIPPET_RADIUS`] characters on each side of the
/// match, clamped to the content. Newlines collapse to spaces and a
/// `…` marks each truncated edge.
fn content_snippet(content: &str, needle: &str) -> Option<String> {
    let match_start = first_match_char_index(content, needle)?;
    let needle_chars = needle.chars().count();
    let total_chars = content.chars().count();

    let start = match_start.saturating_sub(SNIPPET_RADIUS);
    let end = (match_start + needle_chars + SNIPPET_RADIUS).min(total_chars);

    let window: String = content.chars().skip(start).take(end - start).collect();
    let mut snippet = window.replace('\n', " ").trim().to_string();

    if start > 0 {
        snippet.insert(0, SNIPPET_ELLIPSIS);
    }
    if end < total_chars {
        snippet.push(SNIPPET_ELLIPSIS);
    }
    Some(snippet)
}

/// Character index of the first case-insensitive occurrence of the
/// needle, which must already be lowercase.
fn first_match_char_index(content: &str, needle: &str) -> Option<usize> {
    let lower = content.to_lowercase();
    let byte_index = lower.find(needle)?;
    Some(lower[..byte_index].chars().count())
}

/// Escapes text for HTML and wraps case-insensitive occurrences of
/// the query in `<mark>` tags.
///
/// The text is escaped before matching, so markup already present in
/// a document is neutralized and only the inserted tags survive.
pub fn highlight(text: &str, query: &str) -> String {
    let escaped = escape_html(text);
    let query = query.trim();
    if query.is_empty() {
        return escaped;
    }

    let escaped_query = escape_html(query);
    let pattern = format!("(?i){}", regex::escape(&escaped_query));
    match regex::Regex::new(&pattern) {
        Ok(re) => re
            .replace_all(&escaped, |caps: &regex::Captures<'_>| {
                format!("<mark>{}</mark>", &caps[0])
            })
            .into_owned(),
        Err(e) => {
            tracing::debug!(error = %e, "highlight pattern rejected, returning escaped text");
            escaped
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::index::FileIndex;
    use crate::sandbox::PathGuard;

    fn index_with(docs: &[(&str, &str)]) -> (TempDir, FileIndex) {
        let temp = TempDir::new().unwrap();
        let root = temp.path().canonicalize().unwrap();
        let mut index = FileIndex::new(PathGuard::new(&root));
        for (name, content) in docs {
            let path = root.join(name);
            fs::write(&path, content).unwrap();
            index.upsert(&path);
        }
        (temp, index)
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let (_temp, index) = index_with(&[("a.md", "anything")]);
        assert!(search(&index, "").is_empty());
        assert!(search(&index, "   ").is_empty());
    }

    #[test]
    fn test_match_by_name_or_content() {
        let (_temp, index) = index_with(&[
            ("deploy.md", "ship it"),
            ("notes.md", "remember to deploy on friday"),
            ("todo.md", "buy milk"),
        ]);

        let hits = search(&index, "deploy");
        let paths: Vec<_> = hits.iter().map(|h| h.path.as_str()).collect();
        assert_eq!(paths, vec!["deploy.md", "notes.md"]);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let (_temp, index) = index_with(&[("Setup.md", "Install the THING first")]);
        assert_eq!(search(&index, "setup").len(), 1);
        assert_eq!(search(&index, "thing").len(), 1);
        assert_eq!(search(&index, "InStAlL").len(), 1);
    }

    #[test]
    fn test_document_matching_both_ways_appears_once() {
        let (_temp, index) = index_with(&[("guide.md", "the guide to guides")]);
        let hits = search(&index, "guide");
        assert_eq!(hits.len(), 1);
        assert!(!hits[0].snippet.is_empty());
    }

    #[test]
    fn test_name_only_match_has_empty_snippet() {
        let (_temp, index) = index_with(&[("roadmap.md", "future plans")]);
        let hits = search(&index, "roadmap");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].snippet, "");
    }

    #[test]
    fn test_snippet_without_truncation_has_no_ellipsis() {
        let (_temp, index) = index_with(&[("a.md", "short needle here")]);
        let hits = search(&index, "needle");
        assert_eq!(hits[0].snippet, "short needle here");
    }

    #[test]
    fn test_snippet_is_windowed_with_ellipsis() {
        let prefix = "x".repeat(100);
        let suffix = "y".repeat(100);
        let content = format!("{prefix} needle {suffix}");
        let (_temp, index) = index_with(&[("a.md", content.as_str())]);

        let hits = search(&index, "needle");
        let snippet = &hits[0].snippet;
        assert!(snippet.starts_with('…'));
        assert!(snippet.ends_with('…'));
        assert!(snippet.contains("needle"));
        // 60 chars of context on each side plus the match and markers
        let expected_max = 60 + "needle".chars().count() + 60 + 2;
        assert!(snippet.chars().count() <= expected_max);
    }

    #[test]
    fn test_snippet_match_inside_leading_window_keeps_start() {
        let content = format!("needle {}", "z".repeat(200));
        let (_temp, index) = index_with(&[("a.md", content.as_str())]);

        let snippet = &search(&index, "needle")[0].snippet;
        assert!(snippet.starts_with("needle"));
        assert!(snippet.ends_with('…'));
    }

    #[test]
    fn test_snippet_collapses_newlines() {
        let content = format!("{}\nfirst needle line\nsecond line\n{}", "a".repeat(80), "b".repeat(80));
        let (_temp, index) = index_with(&[("a.md", content.as_str())]);

        let snippet = &search(&index, "needle")[0].snippet;
        assert!(!snippet.contains('\n'));
        assert!(snippet.contains("first needle line second line"));
    }

    #[test]
    fn test_snippet_counts_characters_not_bytes() {
        // multibyte content near the match must not split a character
        let content = format!("{}needle{}", "é".repeat(80), "分".repeat(80));
        let (_temp, index) = index_with(&[("a.md", content.as_str())]);

        let snippet = &search(&index, "needle")[0].snippet;
        assert!(snippet.contains("needle"));
        assert!(snippet.starts_with('…'));
        assert!(snippet.ends_with('…'));
    }

    #[test]
    fn test_snippet_uses_first_occurrence_only() {
        let content = format!("first needle {} second needle", "m".repeat(300));
        let (_temp, index) = index_with(&[("a.md", content.as_str())]);

        let snippet = &search(&index, "needle")[0].snippet;
        assert!(snippet.starts_with("first needle"));
        assert!(!snippet.contains("second"));
    }

    #[test]
    fn test_results_sorted_by_name_then_path() {
        let (_temp, index) = index_with(&[
            ("Banana.md", "fruit"),
            ("apple.md", "fruit"),
            ("cherry.md", "fruit"),
        ]);
        let names: Vec<_> = search(&index, "fruit").into_iter().map(|h| h.name).collect();
        assert_eq!(names, vec!["apple.md", "Banana.md", "cherry.md"]);
    }

    #[test]
    fn test_highlight_wraps_matches() {
        assert_eq!(
            highlight("deploy the Deployment", "deploy"),
            "<mark>deploy</mark> the <mark>Deploy</mark>ment"
        );
    }

    #[test]
    fn test_highlight_escapes_document_markup() {
        let out = highlight("<b>bold</b> move", "bold");
        assert_eq!(out, "&lt;b&gt;<mark>bold</mark>&lt;/b&gt; move");
    }

    #[test]
    fn test_highlight_matches_markup_queries() {
        let out = highlight("use <em>tags</em> sparingly", "<em>");
        assert_eq!(out, "use <mark>&lt;em&gt;</mark>tags&lt;/em&gt; sparingly");
    }

    #[test]
    fn test_highlight_empty_query_only_escapes() {
        assert_eq!(highlight("a & b", ""), "a &amp; b");
    }

    #[test]
    fn test_search_hit_wire_shape() {
        let hit = SearchHit {
            path: "a.md".into(),
            name: "a.md".into(),
            ext: "md".into(),
            snippet: "…ctx…".into(),
        };
        let json = serde_json::to_value(&hit).unwrap();
        assert_eq!(json["snippet"], "…ctx…");
    }
}
