use crate::{commands::QueryArgs, error::CliError};
use model::schema::ModelSchema;
use smart_filter::{QueryRequest, SmartFilterConfig};

pub async fn load_schema(path: &str) -> Result<ModelSchema, CliError> {
    let source = tokio::fs::read_to_string(path).await?;
    Ok(ModelSchema::from_json(&source)?)
}

pub async fn load_config(path: Option<&str>) -> Result<SmartFilterConfig, CliError> {
    match path {
        Some(path) => {
            let source = tokio::fs::read_to_string(path).await?;
            SmartFilterConfig::from_json(&source).map_err(CliError::Config)
        }
        None => Ok(SmartFilterConfig::default()),
    }
}

pub fn build_request(args: &QueryArgs) -> QueryRequest {
    let mut request = args
        .filters
        .iter()
        .fold(QueryRequest::new(), |request, (key, value)| {
            request.filter(key, value)
        });

    request.sort = args.sort.clone();
    request.fields = args.fields.clone();
    request.filterable = args.filterable.clone();
    if args.page.is_some() || args.limit.is_some() {
        request = request.paginate(args.page.unwrap_or(1), args.limit.unwrap_or(0));
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use smart_filter::{FilterValue, SortOrder, SortSpec};

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        query: QueryArgs,
    }

    fn args(argv: &[&str]) -> QueryArgs {
        TestCli::parse_from(std::iter::once("smartq").chain(argv.iter().copied())).query
    }

    #[test]
    fn test_repeated_filters_become_many() {
        let request = build_request(&args(&[
            "--schema", "users.json",
            "--filter", "status=open",
            "--filter", "status=draft",
            "--filter", "age=>=18",
        ]));
        assert_eq!(
            request.filters["status"],
            FilterValue::Many(vec!["open".into(), "draft".into()])
        );
        assert_eq!(request.filters["age"], FilterValue::Single(">=18".into()));
        assert!(request.pagination.is_none());
    }

    #[test]
    fn test_sort_fields_and_paging() {
        let request = build_request(&args(&[
            "--schema", "users.json",
            "--sort", "-created_at",
            "--sort", "name",
            "--fields", "name,email",
            "--limit", "20",
        ]));
        assert_eq!(
            request.sort,
            vec![
                SortSpec::new("created_at", SortOrder::Desc),
                SortSpec::new("name", SortOrder::Asc),
            ]
        );
        assert_eq!(request.fields, Some(vec!["name".into(), "email".into()]));
        let pagination = request.pagination.unwrap();
        assert_eq!((pagination.page, pagination.limit), (1, 20));
    }
}
