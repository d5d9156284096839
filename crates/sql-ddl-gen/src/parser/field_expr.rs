//! Parsing of a single select-list expression fragment.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One parsed select-list entry.
///
/// `name` is the column identifier the renderer emits: the alias when the
/// source expression declared one, otherwise the raw expression text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Emitted column identifier. Never empty.
    pub name: String,

    /// Alias declared in the source expression, if any.
    pub alias: Option<String>,

    /// Column comment; defaults to `name` when no inline comment was found.
    pub comment: String,
}

static LEADING_DISTINCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^DISTINCT\s+").expect("valid regex"));

static AS_ALIAS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+AS\s+([^\s,]+)$").expect("valid regex"));

/// Characters that disqualify the second-to-last token from the implicit
/// alias heuristic: a token containing one of these is an expression part,
/// not a column reference followed by an alias.
const OPERATOR_CHARS: &[char] = &['(', '+', '-', '*', '/', '='];

/// Parse one comma-separated expression fragment into a descriptor.
///
/// Returns `None` for empty fragments and for nested subqueries, which are
/// unsupported and dropped.
pub(crate) fn parse_field_expression(
    expr: &str,
    comments: &HashMap<String, String>,
) -> Option<FieldDescriptor> {
    let expr = expr.trim();
    if expr.is_empty() {
        return None;
    }

    let upper = expr.to_uppercase();
    if upper.contains("SELECT") || upper.contains(" FROM ") {
        tracing::debug!(fragment = expr, "dropping nested subquery fragment");
        return None;
    }

    let expr = LEADING_DISTINCT_RE.replace(expr, "");
    let (name, alias) = split_alias(expr.trim());

    let emitted = alias.clone().unwrap_or_else(|| name.clone());
    if emitted.trim().is_empty() {
        return None;
    }

    // The comment map is keyed by the pre-alias expression text; a miss
    // (including whitespace drift between the comment line and the field
    // text) falls back to the emitted name.
    let comment = comments
        .get(name.trim())
        .cloned()
        .unwrap_or_else(|| emitted.clone());

    Some(FieldDescriptor {
        name: emitted,
        alias,
        comment,
    })
}

/// Split an expression into its pre-alias text and an optional alias.
fn split_alias(expr: &str) -> (String, Option<String>) {
    // Explicit `... AS alias` suffix.
    if let Some(captures) = AS_ALIAS_RE.captures(expr) {
        if let (Some(matched), Some(group)) = (captures.get(0), captures.get(1)) {
            let alias = strip_quotes(group.as_str());
            let name = expr[..matched.start()].trim().to_string();
            return (name, Some(alias));
        }
    }

    // Implicit alias: `expr alias`, where the token before the alias looks
    // like a plain column reference rather than part of an expression.
    let parts: Vec<&str> = expr.split_whitespace().collect();
    if parts.len() > 1 {
        let penultimate = parts[parts.len() - 2];
        if !penultimate.contains(OPERATOR_CHARS) {
            let alias = strip_quotes(parts[parts.len() - 1]);
            let name = parts[..parts.len() - 1].join(" ");
            return (name, Some(alias));
        }
    }

    (expr.to_string(), None)
}

fn strip_quotes(token: &str) -> String {
    token
        .trim_matches(|c| c == '\'' || c == '"')
        .to_string()
}
