//! Dialect-aware `CREATE TABLE` rendering.

use crate::dialect::{typemap::map_generic_type, CommentStyle, DialectId};
use crate::infer::{infer_type, TypeRule};
use crate::parser::FieldDescriptor;

/// Emitted in place of the real table name, which the input never carries.
pub const TABLE_NAME_PLACEHOLDER: &str = "table_name";

/// Minimum width of the column-name column.
const NAME_WIDTH_FLOOR: usize = 30;

/// Fixed width of the type column.
const TYPE_WIDTH: usize = 18;

/// Knobs for a single rendering pass.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Table name emitted in the statement.
    pub table_name: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            table_name: TABLE_NAME_PLACEHOLDER.to_string(),
        }
    }
}

/// Render one complete DDL statement for `dialect`.
///
/// `rules` are the caller's override type rules for this dialect; they take
/// precedence over the built-in inference ladder.
pub fn render_ddl(
    fields: &[FieldDescriptor],
    rules: &[TypeRule],
    dialect: DialectId,
    options: &RenderOptions,
) -> String {
    let config = dialect.config();
    let table = options.table_name.as_str();

    let name_width = fields
        .iter()
        .map(|f| f.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(NAME_WIDTH_FLOOR);

    struct Column {
        name: String,
        data_type: String,
        comment: String,
    }

    let columns: Vec<Column> = fields
        .iter()
        .map(|f| {
            let generic = infer_type(&f.name, rules);
            Column {
                data_type: map_generic_type(&generic, dialect),
                name: f.name.clone(),
                comment: f.comment.clone(),
            }
        })
        .collect();

    let mut lines = vec![format!("{} {} (", config.create_prefix, table)];

    for (idx, column) in columns.iter().enumerate() {
        let prefix = if idx == 0 { "    " } else { "   ," };
        lines.push(format!(
            "{}{} {} COMMENT '{}'",
            prefix,
            pad(&column.name, name_width),
            pad(&column.data_type, TYPE_WIDTH),
            escape_quotes(&column.comment),
        ));
    }

    if config.emit_primary_key {
        if let Some(key) = select_primary_key(fields) {
            lines.push(format!("   ,PRIMARY KEY ({})", key));
        }
    }

    lines.push(")".to_string());

    match config.comment_style {
        CommentStyle::Inline => {
            if config.emit_engine_clause {
                lines.push(" ENGINE=InnoDB".to_string());
            }
            lines.push(" COMMENT ''".to_string());
        }
        CommentStyle::Separate => {
            lines.push(";".to_string());
            lines.push(String::new());
            lines.push(format!("COMMENT ON TABLE {} IS '';", table));
            for column in &columns {
                lines.push(format!(
                    "COMMENT ON COLUMN {}.{} IS '{}';",
                    table,
                    column.name,
                    escape_quotes(&column.comment),
                ));
            }
        }
    }

    lines.join("\n")
}

/// Pick the primary-key column: first name ending in `icode`, else first
/// name ending in `id` (excluding `icode`), else the first field.
pub fn select_primary_key(fields: &[FieldDescriptor]) -> Option<&str> {
    if fields.is_empty() {
        return None;
    }

    if let Some(field) = fields
        .iter()
        .find(|f| f.name.to_lowercase().ends_with("icode"))
    {
        return Some(&field.name);
    }

    if let Some(field) = fields.iter().find(|f| {
        let lower = f.name.to_lowercase();
        lower.ends_with("id") && !lower.ends_with("icode")
    }) {
        return Some(&field.name);
    }

    fields.first().map(|f| f.name.as_str())
}

/// Left-align to `width` characters, padding with spaces. Longer values are
/// kept whole.
fn pad(value: &str, width: usize) -> String {
    format!("{:<width$}", value, width = width)
}

fn escape_quotes(text: &str) -> String {
    text.replace('\'', "''")
}
