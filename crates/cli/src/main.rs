use crate::{
    commands::{Commands, QueryArgs},
    error::CliError,
};
use clap::Parser;
use connectors::postgres::PgExecutor;
use futures_util::TryStreamExt;
use model::schema::ModelSchema;
use planner::query::dialect::DialectKind;
use smart_filter::{SmartQuery, smart_query};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;
mod request;

#[derive(Parser)]
#[command(name = "smartq", version = "0.1.0", about = "Compile filter requests into SQL")]
struct Cli {
    #[arg(long, short, global = true, help = "Log at debug level")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Compile { query, inline } => {
            let schema = request::load_schema(&query.schema).await?;
            let query = compile(&query, &schema).await?;
            output::print_compiled(&query, inline)?;
        }
        Commands::Run {
            conn_str,
            query,
            count,
            stream,
        } => {
            if query.dialect != DialectKind::Postgres {
                return Err(CliError::UnsupportedDialect(query.dialect));
            }
            let schema = request::load_schema(&query.schema).await?;
            let compiled = compile(&query, &schema).await?;
            let executor = PgExecutor::connect(&conn_str)
                .await?
                .for_entity(&schema.table);

            info!(sql = %compiled.to_debug_sql(), "Executing query");
            if count {
                println!("{}", compiled.count(&executor).await?);
            } else if stream {
                let mut rows = compiled.cursor(&executor).await?;
                while let Some(row) = rows.try_next().await? {
                    output::print_row(&row)?;
                }
            } else {
                let rows = compiled.get(&executor).await?;
                info!(rows = rows.len(), "Query finished");
                for row in &rows {
                    output::print_row(row)?;
                }
            }
        }
    }

    Ok(())
}

async fn compile(args: &QueryArgs, schema: &ModelSchema) -> Result<SmartQuery, CliError> {
    let config = request::load_config(args.config.as_deref()).await?;
    let request = request::build_request(args);
    Ok(smart_query(schema, &request, &config, args.dialect)?)
}
