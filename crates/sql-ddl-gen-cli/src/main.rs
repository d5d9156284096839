//! sql-ddl-gen CLI - generate dialect-aware CREATE TABLE statements from SQL.

use clap::{Parser, Subcommand};
use sql_ddl_gen::{
    generate_ddl_with_options, parse_fields, DdlError, DdlOutput, DialectId, RenderOptions,
    RulesConfig, TABLE_NAME_PLACEHOLDER,
};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser)]
#[command(name = "sql-ddl-gen")]
#[command(about = "Generate dialect-aware CREATE TABLE statements from SQL")]
#[command(version)]
struct Cli {
    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate DDL from a SQL query or field list
    Generate {
        /// SQL text; omit to read from --file or stdin
        sql: Option<String>,

        /// Read the SQL text from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Target dialects (comma-separated): spark, mysql, postgresql,
        /// starrocks, clickhouse, hive, doris
        #[arg(short, long, value_delimiter = ',')]
        databases: Vec<String>,

        /// Path to a YAML or JSON rules file with custom type mappings
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Table name to emit in the statements
        #[arg(long, default_value = TABLE_NAME_PLACEHOLDER)]
        table_name: String,

        /// Output the result as JSON instead of plain DDL text
        #[arg(long)]
        output_json: bool,
    },

    /// List supported dialects
    Dialects,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), DdlError> {
    let cli = Cli::parse();

    // Handle dialects command separately (doesn't need logging)
    if let Commands::Dialects = cli.command {
        for dialect in DialectId::ALL {
            println!("{:<12} {}", dialect.as_str(), dialect.label());
        }
        return Ok(());
    }

    setup_logging(&cli.verbosity, &cli.log_format)
        .map_err(DdlError::Config)?;

    match cli.command {
        Commands::Dialects => unreachable!(), // Handled above
        Commands::Generate {
            sql,
            file,
            databases,
            rules,
            table_name,
            output_json,
        } => {
            let sql_text = read_sql(sql, file)?;
            if sql_text.trim().is_empty() {
                return Err(DdlError::EmptyInput);
            }

            let rules_config = match rules {
                Some(path) => {
                    let config = RulesConfig::load(&path)?;
                    info!("Loaded rules from {:?}", path);
                    config
                }
                None => RulesConfig::default(),
            };

            // Dialect precedence: --databases, then the rules file, then spark
            let dialect_ids = if !databases.is_empty() {
                databases
            } else if !rules_config.database_types.is_empty() {
                rules_config.database_types.clone()
            } else {
                vec!["spark".to_string()]
            };

            let fields = parse_fields(&sql_text)?;
            info!("Extracted {} fields", fields.len());

            let options = RenderOptions { table_name };
            let output = generate_ddl_with_options(
                &fields,
                &rules_config.rules_by_database,
                &dialect_ids,
                &options,
            )?;

            if output_json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_plain(&output);
            }
        }
    }

    Ok(())
}

/// SQL text precedence: positional argument, then --file, then stdin.
fn read_sql(sql: Option<String>, file: Option<PathBuf>) -> Result<String, DdlError> {
    if let Some(sql) = sql {
        return Ok(sql);
    }
    if let Some(path) = file {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn print_plain(output: &DdlOutput) {
    match output {
        DdlOutput::Single { ddl } => println!("{}", ddl),
        DdlOutput::Multiple { ddls } => {
            for rendered in ddls {
                println!("-- {}", rendered.label);
                println!("{}", rendered.ddl);
                println!();
            }
        }
    }
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}
