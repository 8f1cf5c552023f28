use clap::{Args, Subcommand};
use planner::query::dialect::DialectKind;
use smart_filter::SortSpec;

#[derive(Subcommand)]
pub enum Commands {
    /// Print the SQL and parameters a request compiles to
    Compile {
        #[command(flatten)]
        query: QueryArgs,

        #[arg(long, help = "Print SQL with parameters written inline")]
        inline: bool,
    },
    /// Execute a request against PostgreSQL and print rows as JSON lines
    Run {
        #[arg(long, help = "PostgreSQL connection string")]
        conn_str: String,

        #[command(flatten)]
        query: QueryArgs,

        #[arg(long, help = "Print the matching row count instead of rows")]
        count: bool,

        #[arg(long, help = "Stream rows instead of collecting them first")]
        stream: bool,
    },
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    #[arg(long, help = "Model schema JSON file")]
    pub schema: String,

    #[arg(long, help = "Optional engine config JSON file")]
    pub config: Option<String>,

    #[arg(long, default_value = "postgres", help = "postgres or mysql")]
    pub dialect: DialectKind,

    /// Filter as key=value; split at the first '=' so values may start with
    /// an operator (`age=>=18`). Repeat a key to OR its values.
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    #[arg(long, allow_hyphen_values = true, help = "Sort as column, column:desc or -column")]
    pub sort: Vec<SortSpec>,

    #[arg(long)]
    pub page: Option<u64>,

    #[arg(long)]
    pub limit: Option<u64>,

    #[arg(long, value_delimiter = ',', help = "Columns to select")]
    pub fields: Option<Vec<String>>,

    #[arg(long, value_delimiter = ',', help = "Fields that may be filtered on")]
    pub filterable: Option<Vec<String>>,
}

pub fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{raw}'")),
    }
}
