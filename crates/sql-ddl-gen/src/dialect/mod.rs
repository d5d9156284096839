//! Supported SQL dialects and their DDL formatting rules.
//!
//! Each dialect carries a static [`DialectConfig`] describing how its
//! `CREATE TABLE` statement is shaped: the create prefix, whether column
//! comments are inline or separate statements, and whether primary-key and
//! engine clauses are emitted. Unknown dialect identifiers fall back to the
//! Spark configuration.

pub mod typemap;

pub use typemap::map_generic_type;

use std::fmt;

/// Identifier for a supported target database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialectId {
    Spark,
    Mysql,
    Postgresql,
    Starrocks,
    Clickhouse,
    Hive,
    Doris,
}

impl DialectId {
    /// All supported dialects, in display order.
    pub const ALL: [DialectId; 7] = [
        DialectId::Spark,
        DialectId::Mysql,
        DialectId::Postgresql,
        DialectId::Starrocks,
        DialectId::Clickhouse,
        DialectId::Hive,
        DialectId::Doris,
    ];

    /// Parse a dialect identifier. Returns `None` for unknown identifiers.
    pub fn parse(ident: &str) -> Option<Self> {
        match ident.trim().to_lowercase().as_str() {
            "spark" => Some(DialectId::Spark),
            "mysql" => Some(DialectId::Mysql),
            "postgresql" => Some(DialectId::Postgresql),
            "starrocks" => Some(DialectId::Starrocks),
            "clickhouse" => Some(DialectId::Clickhouse),
            "hive" => Some(DialectId::Hive),
            "doris" => Some(DialectId::Doris),
            _ => None,
        }
    }

    /// Canonical identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            DialectId::Spark => "spark",
            DialectId::Mysql => "mysql",
            DialectId::Postgresql => "postgresql",
            DialectId::Starrocks => "starrocks",
            DialectId::Clickhouse => "clickhouse",
            DialectId::Hive => "hive",
            DialectId::Doris => "doris",
        }
    }

    /// Human-readable display label.
    pub fn label(&self) -> &'static str {
        match self {
            DialectId::Spark => "Spark SQL",
            DialectId::Mysql => "MySQL",
            DialectId::Postgresql => "PostgreSQL",
            DialectId::Starrocks => "StarRocks",
            DialectId::Clickhouse => "ClickHouse",
            DialectId::Hive => "Hive",
            DialectId::Doris => "Doris",
        }
    }

    /// DDL formatting configuration for this dialect.
    pub fn config(&self) -> &'static DialectConfig {
        match self {
            DialectId::Mysql => &MYSQL_CONFIG,
            DialectId::Postgresql => &POSTGRESQL_CONFIG,
            _ => &DEFAULT_CONFIG,
        }
    }
}

impl fmt::Display for DialectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How column comments are attached to the rendered DDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `COMMENT '...'` on each column line.
    Inline,
    /// Trailing `COMMENT ON TABLE` / `COMMENT ON COLUMN` statements.
    Separate,
}

/// Static DDL formatting rules for one dialect.
#[derive(Debug, Clone)]
pub struct DialectConfig {
    /// Statement opener, e.g. `CREATE TABLE IF NOT EXISTS`.
    pub create_prefix: &'static str,

    /// Comment placement.
    pub comment_style: CommentStyle,

    /// Emit a `PRIMARY KEY (...)` line.
    pub emit_primary_key: bool,

    /// Emit ` ENGINE=InnoDB` after the column list.
    pub emit_engine_clause: bool,
}

impl DialectConfig {
    /// Look up the configuration for a dialect identifier, falling back to
    /// the Spark configuration for unknown identifiers.
    pub fn for_ident(ident: &str) -> &'static DialectConfig {
        DialectId::parse(ident)
            .map(|dialect| dialect.config())
            .unwrap_or(&DEFAULT_CONFIG)
    }
}

/// Spark, StarRocks, ClickHouse, Hive, and Doris share this shape.
static DEFAULT_CONFIG: DialectConfig = DialectConfig {
    create_prefix: "CREATE TABLE IF NOT EXISTS",
    comment_style: CommentStyle::Inline,
    emit_primary_key: false,
    emit_engine_clause: false,
};

static MYSQL_CONFIG: DialectConfig = DialectConfig {
    create_prefix: "CREATE TABLE IF NOT EXISTS",
    comment_style: CommentStyle::Inline,
    emit_primary_key: true,
    emit_engine_clause: true,
};

static POSTGRESQL_CONFIG: DialectConfig = DialectConfig {
    create_prefix: "CREATE TABLE",
    comment_style: CommentStyle::Separate,
    emit_primary_key: false,
    emit_engine_clause: false,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_idents() {
        assert_eq!(DialectId::parse("mysql"), Some(DialectId::Mysql));
        assert_eq!(DialectId::parse("ClickHouse"), Some(DialectId::Clickhouse));
        assert_eq!(DialectId::parse(" spark "), Some(DialectId::Spark));
    }

    #[test]
    fn test_parse_unknown_ident() {
        assert_eq!(DialectId::parse("oracle"), None);
        assert_eq!(DialectId::parse(""), None);
    }

    #[test]
    fn test_round_trip_idents() {
        for dialect in DialectId::ALL {
            assert_eq!(DialectId::parse(dialect.as_str()), Some(dialect));
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(DialectId::Spark.label(), "Spark SQL");
        assert_eq!(DialectId::Postgresql.label(), "PostgreSQL");
        assert_eq!(DialectId::Starrocks.label(), "StarRocks");
    }

    #[test]
    fn test_mysql_config_flags() {
        let config = DialectId::Mysql.config();
        assert!(config.emit_primary_key);
        assert!(config.emit_engine_clause);
        assert_eq!(config.comment_style, CommentStyle::Inline);
    }

    #[test]
    fn test_postgresql_config_flags() {
        let config = DialectId::Postgresql.config();
        assert_eq!(config.create_prefix, "CREATE TABLE");
        assert_eq!(config.comment_style, CommentStyle::Separate);
        assert!(!config.emit_primary_key);
    }

    #[test]
    fn test_unknown_ident_falls_back_to_spark() {
        let config = DialectConfig::for_ident("oracle");
        assert_eq!(config.create_prefix, "CREATE TABLE IF NOT EXISTS");
        assert_eq!(config.comment_style, CommentStyle::Inline);
        assert!(!config.emit_primary_key);
    }
}
