//! Generic-type to dialect-type rewriting.
//!
//! The inference engine emits generic labels (`STRING`, `DATE`, `TIMESTAMP`,
//! `DECIMAL(p,s)`); this module rewrites them into each dialect's spelling.
//! The mapping is total: unrecognized types pass through unchanged, so
//! caller-supplied rule types like `BIGINT` survive untouched.

use super::DialectId;

/// Rewrite a generic data type into the spelling a dialect expects.
pub fn map_generic_type(data_type: &str, dialect: DialectId) -> String {
    match dialect {
        DialectId::Clickhouse => match data_type {
            "STRING" => "String".to_string(),
            "DATE" => "Date".to_string(),
            "TIMESTAMP" => "DateTime".to_string(),
            t if t.starts_with("DECIMAL") => t.replacen("DECIMAL", "Decimal", 1),
            t => t.to_string(),
        },
        DialectId::Postgresql => match data_type {
            "STRING" => "TEXT".to_string(),
            t => t.to_string(),
        },
        _ => data_type.to_string(),
    }
}
