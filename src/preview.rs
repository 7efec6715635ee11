use anyhow::{Context, Result};
use log::info;

use crate::{cli::PreviewArgs, table};

pub fn execute(args: &PreviewArgs) -> Result<()> {
    let mut session = crate::open_session(&args.input)?;
    for key in args.sort.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        session
            .request_sort(key)
            .with_context(|| format!("Sorting by '{key}'"))?;
    }

    let view = session.table_view()?;
    if view.is_empty() {
        print!("{}", view.render());
        info!("{:?} has no rows to display", args.input);
        return Ok(());
    }

    let mut body = view.body_cells();
    if args.rows > 0 {
        body.truncate(args.rows);
    }
    print!("{}", table::render_table(&view.header_cells(), &body));
    info!(
        "Displayed {} of {} row(s) from {:?}",
        body.len(),
        view.rows.len(),
        args.input
    );
    Ok(())
}
