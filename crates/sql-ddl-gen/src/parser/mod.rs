//! SQL field extraction.
//!
//! Turns raw SQL text into an ordered list of [`FieldDescriptor`]s using a
//! layered strategy chain, each attempt short-circuiting on first success:
//!
//! 1. `SELECT ... FROM`: the field list is bounded by the first standalone
//!    `FROM` at parenthesis depth 0.
//! 2. `SELECT` without `FROM`: the field list runs to the first trailing
//!    clause keyword (`WHERE`, `GROUP BY`, ...).
//! 3. Bare field list: the whole input, comments stripped.
//!
//! A strategy returns `None` when it does not recognize the input's
//! structure; a recognized structure may still yield zero descriptors (for
//! example when every entry is an unsupported subquery).

mod field_expr;

pub use field_expr::FieldDescriptor;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{DdlError, Result};

use field_expr::parse_field_expression;

static SELECT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bSELECT\b").expect("valid regex"));

static LINE_COMMENT_STRIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)--.*$").expect("valid regex"));

static BLOCK_COMMENT_STRIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid regex"));

static TRAILING_COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"--\s*(.+)$").expect("valid regex"));

/// Keywords that terminate the field list when no `FROM` is present,
/// tried in this order.
static STOP_KEYWORD_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    ["WHERE", "GROUP BY", "ORDER BY", "HAVING", "LIMIT", "UNION"]
        .iter()
        .map(|kw| Regex::new(&format!(r"(?i)\b{}\b", kw)).expect("valid regex"))
        .collect()
});

/// Extract the ordered field list from raw SQL text.
///
/// Returns [`DdlError::UnparsableSql`] when no strategy recognizes the
/// input. A recognized input whose entries were all dropped yields an empty
/// vector; callers surface that as [`DdlError::NoFieldsExtracted`].
pub fn parse_fields(sql: &str) -> Result<Vec<FieldDescriptor>> {
    let sql = sql.trim();

    if let Some(fields) = try_select_from(sql) {
        tracing::debug!(fields = fields.len(), "parsed SELECT ... FROM query");
        return Ok(fields);
    }

    if let Some(fields) = try_select_without_from(sql) {
        tracing::debug!(fields = fields.len(), "parsed SELECT without FROM");
        return Ok(fields);
    }

    if let Some(fields) = try_bare_field_list(sql) {
        tracing::debug!(fields = fields.len(), "parsed bare field list");
        return Ok(fields);
    }

    Err(DdlError::UnparsableSql)
}

/// Strategy 1: standard `SELECT ... FROM`.
///
/// Scans forward from `SELECT` tracking parenthesis depth; the clause ends
/// at the first standalone `FROM` at depth 0. Fails when no such `FROM`
/// exists.
fn try_select_from(sql: &str) -> Option<Vec<FieldDescriptor>> {
    let select = SELECT_RE.find(sql)?;
    let bytes = sql.as_bytes();

    let mut depth: i32 = 0;
    let mut from_pos = None;
    for i in select.end()..bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => depth -= 1,
            _ if depth == 0 && is_standalone_keyword_at(bytes, i, b"from") => {
                from_pos = Some(i);
                break;
            }
            _ => {}
        }
    }

    let from_pos = from_pos?;
    let clause = sql[select.end()..from_pos].trim();
    Some(parse_select_clause(clause))
}

/// Whether `keyword` occurs at byte offset `i`, bounded by whitespace or the
/// string ends. Keyword bytes are ASCII, so byte indexing is safe here.
fn is_standalone_keyword_at(bytes: &[u8], i: usize, keyword: &[u8]) -> bool {
    let end = i + keyword.len();
    if end > bytes.len() || !bytes[i..end].eq_ignore_ascii_case(keyword) {
        return false;
    }
    let before_ok = i == 0 || bytes[i - 1].is_ascii_whitespace();
    let after_ok = end == bytes.len() || bytes[end].is_ascii_whitespace();
    before_ok && after_ok
}

/// Strategy 2: `SELECT` field list with no `FROM`.
///
/// Takes everything after `SELECT`, truncated at the first stop keyword
/// found (keyword-priority order). Fails when `SELECT` is absent.
fn try_select_without_from(sql: &str) -> Option<Vec<FieldDescriptor>> {
    let select = SELECT_RE.find(sql)?;
    let mut clause = sql[select.end()..].trim();

    for stop in STOP_KEYWORD_RES.iter() {
        if let Some(found) = stop.find(clause) {
            clause = clause[..found.start()].trim_end();
            break;
        }
    }

    Some(parse_select_clause(clause))
}

/// Strategy 3: the whole input is a bare comma-separated field list.
///
/// Fails only when nothing remains after comment stripping.
fn try_bare_field_list(sql: &str) -> Option<Vec<FieldDescriptor>> {
    let cleaned = strip_comments(sql);
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }

    let comments = HashMap::new();
    let fields = split_top_level_commas(cleaned)
        .iter()
        .filter_map(|expr| parse_field_expression(expr, &comments))
        .collect();
    Some(fields)
}

/// Parse the text between `SELECT` and the clause end into descriptors.
fn parse_select_clause(clause: &str) -> Vec<FieldDescriptor> {
    let comments = collect_line_comments(clause);
    let cleaned = strip_comments(clause);

    split_top_level_commas(&cleaned)
        .iter()
        .filter_map(|expr| parse_field_expression(expr, &comments))
        .collect()
}

/// Record `field text -> comment` for every line carrying a trailing `--`
/// comment, keyed by the trimmed field text with any leading comma removed.
fn collect_line_comments(clause: &str) -> HashMap<String, String> {
    let mut comments = HashMap::new();

    for line in clause.lines() {
        let captures = match TRAILING_COMMENT_RE.captures(line) {
            Some(captures) => captures,
            None => continue,
        };
        let (matched, comment) = match (captures.get(0), captures.get(1)) {
            (Some(m), Some(c)) => (m, c.as_str().trim()),
            _ => continue,
        };
        let field_part = line[..matched.start()].trim();
        if !field_part.is_empty() {
            let key = field_part.trim_start_matches(',').trim();
            comments.insert(key.to_string(), comment.to_string());
        }
    }

    comments
}

/// Remove `--` line comments and `/* */` block comments.
fn strip_comments(text: &str) -> String {
    let no_line = LINE_COMMENT_STRIP_RE.replace_all(text, "");
    BLOCK_COMMENT_STRIP_RE.replace_all(&no_line, "").into_owned()
}

/// Split on commas at parenthesis depth 0, trimming each fragment.
fn split_top_level_commas(clause: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;

    for ch in clause.chars() {
        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth -= 1;
                current.push(ch);
            }
            ',' if depth == 0 => {
                fragments.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    if !current.trim().is_empty() {
        fragments.push(current.trim().to_string());
    }

    fragments
}
