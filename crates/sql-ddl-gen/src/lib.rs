//! # sql-ddl-gen
//!
//! Generate dialect-aware `CREATE TABLE` statements from SQL queries.
//!
//! This library extracts field lists from a `SELECT` query (or a bare
//! comma-separated field list), infers a column type for each field from
//! naming conventions, and renders DDL for:
//!
//! - **Spark SQL**, **Hive**, **StarRocks**, **Doris** (inline comments)
//! - **MySQL** (inline comments, primary key, `ENGINE=InnoDB`)
//! - **PostgreSQL** (separate `COMMENT ON` statements)
//! - **ClickHouse** (native type names)
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use sql_ddl_gen::{generate_ddl, parse_fields, DdlOutput};
//!
//! fn main() -> sql_ddl_gen::Result<()> {
//!     let fields = parse_fields("SELECT user_code, total_amt FROM orders")?;
//!     let output = generate_ddl(&fields, &HashMap::new(), &["spark".to_string()])?;
//!     if let DdlOutput::Single { ddl } = output {
//!         println!("{}", ddl);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dialect;
pub mod error;
pub mod infer;
pub mod orchestrator;
pub mod parser;
pub mod render;

// Re-exports for convenient access
pub use config::RulesConfig;
pub use dialect::typemap::map_generic_type;
pub use dialect::{CommentStyle, DialectConfig, DialectId};
pub use error::{DdlError, Result};
pub use infer::{infer_type, TypeRule};
pub use orchestrator::{generate_ddl, generate_ddl_with_options, DdlOutput, RenderedDdl};
pub use parser::{parse_fields, FieldDescriptor};
pub use render::{render_ddl, select_primary_key, RenderOptions, TABLE_NAME_PLACEHOLDER};
