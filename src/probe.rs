//! Schema listing for a CSV file.

use anyhow::{Context, Result};
use log::info;

use crate::{cli::ProbeArgs, table};

pub fn execute(args: &ProbeArgs) -> Result<()> {
    let session = crate::open_session(&args.input)?;
    let schema = session
        .schema()
        .context("Session has no schema after loading")?;
    let rows = session.dataset().map(|dataset| dataset.len()).unwrap_or(0);

    let table_rows = schema
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            vec![
                (idx + 1).to_string(),
                column.key.clone(),
                column.semantic_type.to_string(),
            ]
        })
        .collect::<Vec<_>>();
    let headers = vec!["#".to_string(), "column".to_string(), "type".to_string()];
    print!("{}", table::render_table(&headers, &table_rows));
    info!(
        "Inferred {} column(s) from {} row(s) in {:?}",
        schema.len(),
        rows,
        args.input
    );
    Ok(())
}
