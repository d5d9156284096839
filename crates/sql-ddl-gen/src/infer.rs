//! Heuristic type inference from column names.
//!
//! Maps a field name to a generic, dialect-neutral type label. Caller-supplied
//! [`TypeRule`]s are consulted first; if none match, a fixed ladder of naming
//! conventions decides. The ladder is ordered from narrow to broad, so the
//! position of each check matters.

use serde::{Deserialize, Serialize};

/// Generic string type, later rewritten per dialect.
pub const GENERIC_STRING: &str = "STRING";
/// Generic date type.
pub const GENERIC_DATE: &str = "DATE";
/// Generic timestamp type.
pub const GENERIC_TIMESTAMP: &str = "TIMESTAMP";
/// Generic decimal type used for amounts, quantities, and day counts.
pub const GENERIC_DECIMAL: &str = "DECIMAL(24,6)";

/// Caller-supplied override rule, evaluated before the built-in ladder.
///
/// Rules are matched in ascending `priority` order; a rule matches when the
/// lowercased field name equals or contains any of its lowercased keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRule {
    /// Rule identifier, used in diagnostics only.
    pub id: String,

    /// Keywords to match against the field name.
    pub keywords: Vec<String>,

    /// Type string emitted when the rule matches.
    pub data_type: String,

    /// Evaluation order; lower values are tried first.
    #[serde(default)]
    pub priority: i32,
}

/// Infer a generic type for a field name.
///
/// `rules` take precedence over the built-in conventions; pass an empty slice
/// to use the defaults only. Always returns a type, falling back to
/// [`GENERIC_STRING`].
pub fn infer_type(field_name: &str, rules: &[TypeRule]) -> String {
    let name = field_name.to_lowercase();

    if let Some(data_type) = match_custom_rules(&name, rules) {
        return data_type;
    }

    // Currency codes (exact token match, unlike the broader checks below).
    const CURRENCY_TOKENS: &[&str] = &["fcytp", "scytp", "cytp", "currency_type"];
    if CURRENCY_TOKENS.contains(&name.as_str()) || name.contains("币种代码") {
        return GENERIC_STRING.to_string();
    }

    // Modes and codes.
    if name.contains("mode") || name.contains("code") || name.contains("icode") {
        return GENERIC_STRING.to_string();
    }

    // Dates, unless the name is about day counts.
    if (name.contains("date") || name.contains("日期")) && !name.contains("day") {
        return GENERIC_DATE.to_string();
    }

    // Times.
    if name.contains("time") || name.contains("timestamp") || name.contains("时间") {
        return GENERIC_TIMESTAMP.to_string();
    }

    // Organizations, counterparties, customers, staff.
    if contains_any(&name, &["org", "trcl", "cust", "stff", "user", "dept"]) {
        return GENERIC_STRING.to_string();
    }

    // Names, descriptions, remarks.
    if contains_any(&name, &["_name", "_dscr", "_rmrk", "name", "描述", "备注"]) {
        return GENERIC_STRING.to_string();
    }

    // Flags.
    if name.contains("flag") || name.starts_with("is_") || name.contains("标记") {
        return GENERIC_STRING.to_string();
    }

    // Day counts. "weekday" is a label, not a count.
    if name.contains("days") || (name.contains("day") && name != "weekday") {
        return GENERIC_DECIMAL.to_string();
    }

    // Amounts.
    if contains_any(
        &name,
        &[
            "amt", "amount", "price", "ocy", "rcy", "scy", "elmn", "crdt", "totl", "ocpt", "金额",
        ],
    ) {
        return GENERIC_DECIMAL.to_string();
    }

    // Quantities.
    if contains_any(&name, &["qty", "quantity", "cnt", "count", "数量"]) {
        return GENERIC_DECIMAL.to_string();
    }

    GENERIC_STRING.to_string()
}

/// Try the caller-supplied rules in ascending priority order.
fn match_custom_rules(name: &str, rules: &[TypeRule]) -> Option<String> {
    let mut ordered: Vec<&TypeRule> = rules.iter().collect();
    ordered.sort_by_key(|rule| rule.priority);

    for rule in ordered {
        for keyword in &rule.keywords {
            let keyword = keyword.to_lowercase();
            if name == keyword || name.contains(&keyword) {
                tracing::debug!(rule = %rule.id, field = name, "custom type rule matched");
                return Some(rule.data_type.clone());
            }
        }
    }
    None
}

fn contains_any(name: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| name.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str, keywords: &[&str], data_type: &str, priority: i32) -> TypeRule {
        TypeRule {
            id: id.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            data_type: data_type.to_string(),
            priority,
        }
    }

    #[test]
    fn test_codes_are_strings() {
        assert_eq!(infer_type("user_code", &[]), "STRING");
        assert_eq!(infer_type("pay_mode", &[]), "STRING");
        assert_eq!(infer_type("ficode", &[]), "STRING");
    }

    #[test]
    fn test_currency_tokens_exact() {
        assert_eq!(infer_type("fcytp", &[]), "STRING");
        assert_eq!(infer_type("CYTP", &[]), "STRING");
        assert_eq!(infer_type("currency_type", &[]), "STRING");
    }

    #[test]
    fn test_dates() {
        assert_eq!(infer_type("trade_date", &[]), "DATE");
        assert_eq!(infer_type("DATE_FROM", &[]), "DATE");
        // "day" in the name demotes the date rule to the day-count rule.
        assert_eq!(infer_type("date_of_day", &[]), "DECIMAL(24,6)");
    }

    #[test]
    fn test_times() {
        assert_eq!(infer_type("create_time", &[]), "TIMESTAMP");
        assert_eq!(infer_type("event_timestamp", &[]), "TIMESTAMP");
    }

    #[test]
    fn test_parties_are_strings() {
        assert_eq!(infer_type("cust_no", &[]), "STRING");
        assert_eq!(infer_type("org_unit", &[]), "STRING");
        assert_eq!(infer_type("dept", &[]), "STRING");
    }

    #[test]
    fn test_names_and_remarks() {
        assert_eq!(infer_type("prod_name", &[]), "STRING");
        assert_eq!(infer_type("memo_rmrk", &[]), "STRING");
    }

    #[test]
    fn test_flags() {
        assert_eq!(infer_type("active_flag", &[]), "STRING");
        assert_eq!(infer_type("is_valid", &[]), "STRING");
    }

    #[test]
    fn test_day_counts() {
        assert_eq!(infer_type("overdue_days", &[]), "DECIMAL(24,6)");
        assert_eq!(infer_type("intr_day", &[]), "DECIMAL(24,6)");
        // "weekday" is excluded from the day-count rule and defaults.
        assert_eq!(infer_type("weekday", &[]), "STRING");
    }

    #[test]
    fn test_amounts_and_quantities() {
        assert_eq!(infer_type("total_amt", &[]), "DECIMAL(24,6)");
        assert_eq!(infer_type("unit_price", &[]), "DECIMAL(24,6)");
        assert_eq!(infer_type("item_qty", &[]), "DECIMAL(24,6)");
        assert_eq!(infer_type("row_cnt", &[]), "DECIMAL(24,6)");
    }

    #[test]
    fn test_default_is_string() {
        assert_eq!(infer_type("whatever", &[]), "STRING");
        assert_eq!(infer_type("", &[]), "STRING");
    }

    #[test]
    fn test_determinism() {
        for _ in 0..3 {
            assert_eq!(infer_type("user_code", &[]), "STRING");
            assert_eq!(infer_type("total_amt", &[]), "DECIMAL(24,6)");
        }
    }

    #[test]
    fn test_custom_rule_overrides_default() {
        let rules = vec![rule("amt-as-bigint", &["amt"], "BIGINT", 0)];
        assert_eq!(infer_type("total_amt", &rules), "BIGINT");
        // Non-matching names still use the defaults.
        assert_eq!(infer_type("trade_date", &rules), "DATE");
    }

    #[test]
    fn test_custom_rule_priority_order() {
        let rules = vec![
            rule("broad", &["amt"], "DOUBLE", 10),
            rule("narrow", &["total_amt"], "BIGINT", 0),
        ];
        assert_eq!(infer_type("total_amt", &rules), "BIGINT");
        assert_eq!(infer_type("fee_amt", &rules), "DOUBLE");
    }

    #[test]
    fn test_custom_rule_keyword_case_insensitive() {
        let rules = vec![rule("upper", &["AMT"], "BIGINT", 0)];
        assert_eq!(infer_type("Total_Amt", &rules), "BIGINT");
    }

    #[test]
    fn test_type_rule_wire_names() {
        let json = r#"{"id":"r1","keywords":["amt"],"dataType":"BIGINT","priority":0}"#;
        let rule: TypeRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.data_type, "BIGINT");
    }
}
