mod error_presentation;

use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use ddlgram_core::{BlueprintSpec, Column, Flavor, Grammar, GrammarConfig, Index, TableBlueprint};
use ddlgram_dialect_mysql::{MysqlGrammar, ServerVersion};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error_presentation::{CliError, CliResult, render_runtime_error};

#[derive(Parser)]
#[command(name = "ddlgram")]
#[command(about = "Compile table blueprints into MySQL and MariaDB DDL")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    grammar: GrammarArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GrammarArgs {
    /// Database that catalogue queries default to
    #[arg(long, env = "DDLGRAM_DATABASE", default_value = "", global = true)]
    database: String,

    /// Prefix applied to every table name
    #[arg(long, env = "DDLGRAM_PREFIX", default_value = "", global = true)]
    prefix: String,

    /// Server version as reported by `SELECT VERSION()`
    #[arg(long, env = "DDLGRAM_SERVER_VERSION", default_value = "", global = true)]
    server_version: String,

    /// Server flavor; detected from the version string when omitted
    #[arg(long, value_enum, global = true)]
    flavor: Option<FlavorArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FlavorArg {
    Mysql,
    Mariadb,
}

impl From<FlavorArg> for Flavor {
    fn from(value: FlavorArg) -> Self {
        match value {
            FlavorArg::Mysql => Self::Mysql,
            FlavorArg::Mariadb => Self::MariaDb,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a YAML blueprint into SQL statements
    Compile {
        /// Blueprint file
        file: PathBuf,

        /// YAML file with the table's current columns and indexes
        #[arg(long)]
        introspected: Option<PathBuf>,
    },

    /// Print the catalogue queries for a table
    Catalogue {
        /// Table name without prefix
        table: String,

        /// Schema to inspect instead of the configured database
        #[arg(long, default_value = "")]
        schema: String,
    },
}

/// Current catalogue state of the table a blueprint alters.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Introspected {
    columns: Vec<Column>,
    indexes: Vec<Index>,
}

fn main() -> ExitCode {
    setup_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{}", render_runtime_error(error));
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .init();
}

fn run(cli: Cli) -> CliResult<String> {
    let config = grammar_config(&cli.grammar);
    debug!(
        database = %config.database,
        prefix = %config.prefix,
        server_version = %config.server_version,
        flavor = %config.flavor,
        "resolved grammar config"
    );
    let grammar = MysqlGrammar::from_config(&config);

    match cli.command {
        Commands::Compile { file, introspected } => compile(&grammar, &file, introspected.as_deref()),
        Commands::Catalogue { table, schema } => Ok(catalogue_queries(&grammar, &schema, &table)),
    }
}

fn grammar_config(args: &GrammarArgs) -> GrammarConfig {
    let detected = ServerVersion::detect(&args.server_version);
    let flavor = args.flavor.map_or(detected.flavor, Flavor::from);

    GrammarConfig::new(args.database.clone(), args.prefix.clone())
        .with_server_version(detected.version, flavor)
}

fn compile(grammar: &MysqlGrammar, file: &Path, introspected: Option<&Path>) -> CliResult<String> {
    let spec: BlueprintSpec = read_yaml(file)?;
    let introspected = match introspected {
        Some(path) => read_yaml(path)?,
        None => Introspected::default(),
    };

    let mut blueprint = TableBlueprint::from(spec);
    let statements = blueprint.to_sql(grammar, &introspected.columns, &introspected.indexes)?;

    Ok(statements
        .iter()
        .map(|statement| format!("{statement};\n"))
        .collect())
}

fn catalogue_queries(grammar: &MysqlGrammar, schema: &str, table: &str) -> String {
    let database = if schema.is_empty() {
        grammar.database()
    } else {
        schema
    };
    let queries = [
        grammar.compile_version(),
        grammar.compile_tables(database),
        grammar.compile_views(database),
        grammar.compile_columns(schema, table),
        grammar.compile_indexes(schema, table),
        grammar.compile_foreign_keys(schema, table),
    ];

    queries
        .iter()
        .map(|query| format!("{}\n", query.trim_end()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let contents = fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    serde_yaml::from_str(&contents).map_err(|source| CliError::ParseFile {
        path: path.to_path_buf(),
        source,
    })
}
