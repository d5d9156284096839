//! Rule-file loading and validation.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dialect::DialectId;
use crate::error::{DdlError, Result};
use crate::infer::TypeRule;

/// Custom inference rules, keyed by dialect id, plus an optional default
/// dialect list. Mirrors the request shape accepted by the CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RulesConfig {
    /// Override type rules per dialect id.
    #[serde(default)]
    pub rules_by_database: HashMap<String, Vec<TypeRule>>,

    /// Dialects to render when the caller does not name any.
    #[serde(default)]
    pub database_types: Vec<String>,
}

impl RulesConfig {
    /// Load from a YAML or JSON file, dispatching on the file extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Parse from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: RulesConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RulesConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate rule contents. Unknown dialect keys are tolerated (they are
    /// filtered at render time) but logged.
    pub fn validate(&self) -> Result<()> {
        for (dialect, rules) in &self.rules_by_database {
            if DialectId::parse(dialect).is_none() {
                tracing::warn!(dialect = %dialect, "rules reference an unknown dialect id");
            }
            for rule in rules {
                if rule.keywords.is_empty() {
                    return Err(DdlError::config(format!(
                        "rule '{}' for dialect '{}' has no keywords",
                        rule.id, dialect
                    )));
                }
                if rule.data_type.trim().is_empty() {
                    return Err(DdlError::config(format!(
                        "rule '{}' for dialect '{}' has an empty data type",
                        rule.id, dialect
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
rulesByDatabase:
  mysql:
    - id: amt-bigint
      keywords: [amt, amount]
      dataType: BIGINT
      priority: 0
databaseTypes: [mysql, spark]
"#;
        let config = RulesConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.database_types, vec!["mysql", "spark"]);
        let rules = &config.rules_by_database["mysql"];
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].data_type, "BIGINT");
        assert_eq!(rules[0].keywords, vec!["amt", "amount"]);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "rulesByDatabase": {
                "spark": [
                    {"id": "r1", "keywords": ["uuid"], "dataType": "STRING", "priority": 5}
                ]
            }
        }"#;
        let config = RulesConfig::from_json(json).unwrap();
        assert_eq!(config.rules_by_database["spark"][0].priority, 5);
        assert!(config.database_types.is_empty());
    }

    #[test]
    fn test_empty_document_is_valid() {
        let config = RulesConfig::from_json("{}").unwrap();
        assert!(config.rules_by_database.is_empty());
    }

    #[test]
    fn test_rule_without_keywords_rejected() {
        let yaml = r#"
rulesByDatabase:
  mysql:
    - id: broken
      keywords: []
      dataType: BIGINT
"#;
        let err = RulesConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("no keywords"));
    }

    #[test]
    fn test_rule_with_blank_type_rejected() {
        let yaml = r#"
rulesByDatabase:
  mysql:
    - id: broken
      keywords: [amt]
      dataType: "  "
"#;
        let err = RulesConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("empty data type"));
    }

    #[test]
    fn test_unknown_dialect_key_tolerated() {
        let yaml = r#"
rulesByDatabase:
  oracle:
    - id: r1
      keywords: [amt]
      dataType: NUMBER
"#;
        assert!(RulesConfig::from_yaml(yaml).is_ok());
    }

    #[test]
    fn test_load_dispatches_on_extension() {
        let dir = std::env::temp_dir();
        let json_path = dir.join("sql_ddl_gen_rules_test.json");
        std::fs::write(&json_path, r#"{"databaseTypes": ["hive"]}"#).unwrap();
        let config = RulesConfig::load(&json_path).unwrap();
        assert_eq!(config.database_types, vec!["hive"]);
        std::fs::remove_file(&json_path).ok();
    }
}
