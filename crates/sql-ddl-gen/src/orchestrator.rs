//! Fan-out of one parsed field list across requested dialects.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dialect::DialectId;
use crate::error::{DdlError, Result};
use crate::infer::TypeRule;
use crate::parser::FieldDescriptor;
use crate::render::{render_ddl, RenderOptions};

/// One dialect's rendered statement plus its display label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDdl {
    #[serde(rename = "databaseType")]
    pub dialect: String,
    pub label: String,
    pub ddl: String,
}

/// Result shape: a single dialect collapses to just its text, multiple
/// dialects keep the full labelled list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DdlOutput {
    Single { ddl: String },
    Multiple { ddls: Vec<RenderedDdl> },
}

/// Generate DDL for every recognized dialect in `dialect_ids`, with the
/// default table-name placeholder.
pub fn generate_ddl(
    fields: &[FieldDescriptor],
    rules_by_dialect: &HashMap<String, Vec<TypeRule>>,
    dialect_ids: &[String],
) -> Result<DdlOutput> {
    generate_ddl_with_options(fields, rules_by_dialect, dialect_ids, &RenderOptions::default())
}

/// As [`generate_ddl`], with explicit render options.
pub fn generate_ddl_with_options(
    fields: &[FieldDescriptor],
    rules_by_dialect: &HashMap<String, Vec<TypeRule>>,
    dialect_ids: &[String],
    options: &RenderOptions,
) -> Result<DdlOutput> {
    if fields.is_empty() {
        return Err(DdlError::NoFieldsExtracted);
    }

    let dialects = resolve_dialects(dialect_ids)?;

    let mut rendered = Vec::with_capacity(dialects.len());
    for dialect in &dialects {
        let rules = rules_by_dialect
            .get(dialect.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        tracing::debug!(dialect = %dialect, rules = rules.len(), "rendering DDL");
        rendered.push(RenderedDdl {
            dialect: dialect.as_str().to_string(),
            label: dialect.label().to_string(),
            ddl: render_ddl(fields, rules, *dialect, options),
        });
    }

    if rendered.len() == 1 {
        let only = rendered.remove(0);
        Ok(DdlOutput::Single { ddl: only.ddl })
    } else {
        Ok(DdlOutput::Multiple { ddls: rendered })
    }
}

/// Map requested id strings to known dialects, keeping request order and
/// dropping unknowns and repeats.
pub fn resolve_dialects(dialect_ids: &[String]) -> Result<Vec<DialectId>> {
    let mut dialects = Vec::new();
    for id in dialect_ids {
        if let Some(dialect) = DialectId::parse(id) {
            if !dialects.contains(&dialect) {
                dialects.push(dialect);
            }
        } else {
            tracing::warn!(id = %id, "ignoring unknown dialect id");
        }
    }

    if dialects.is_empty() {
        return Err(DdlError::NoValidDialects);
    }
    Ok(dialects)
}
