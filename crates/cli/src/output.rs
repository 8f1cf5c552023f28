use crate::error::CliError;
use model::{core::value::Value, records::row::RowData};
use smart_filter::SmartQuery;

pub fn print_compiled(query: &SmartQuery, inline: bool) -> Result<(), CliError> {
    if inline {
        println!("{};", query.to_debug_sql());
        return Ok(());
    }

    let (sql, params) = query.to_sql();
    println!("{sql};");
    println!("-- params: {}", params_json(&params)?);

    let (count_sql, count_params) = query.count_sql();
    println!("{count_sql};");
    println!("-- params: {}", params_json(&count_params)?);
    Ok(())
}

pub fn print_row(row: &RowData) -> Result<(), CliError> {
    let line = serde_json::to_string(&row.to_json()).map_err(CliError::JsonSerialize)?;
    println!("{line}");
    Ok(())
}

fn params_json(params: &[Value]) -> Result<String, CliError> {
    let values = params.iter().map(Value::to_json).collect::<Vec<_>>();
    serde_json::to_string(&values).map_err(CliError::JsonSerialize)
}
