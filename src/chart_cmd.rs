use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::{
    cli::{ChartArgs, RecommendArgs},
    config::ChartConfig,
    session::{ChartView, Session},
};

pub fn execute_recommend(args: &RecommendArgs) -> Result<()> {
    let session = crate::open_session(&args.input)?;
    let (Some(config), Some(rule)) = (session.config(), session.recommendation()) else {
        anyhow::bail!("No chart config was produced for {:?}", args.input);
    };

    println!("kind: {} ({})", config.kind(), config.kind().label());
    println!("rule: {}", rule.name);
    println!("x axis: {}", config.x_axis_key().unwrap_or("-"));
    let y_axis = if config.y_axis_keys().is_empty() {
        "-".to_string()
    } else {
        config.y_axis_keys().join(", ")
    };
    println!("y axis: {y_axis}");

    if let Some(path) = &args.output {
        config
            .save(path)
            .with_context(|| format!("Writing chart config to {path:?}"))?;
        info!("Saved {} chart config to {path:?}", config.kind());
    }
    Ok(())
}

pub fn execute_chart(args: &ChartArgs) -> Result<()> {
    let mut session = crate::open_session(&args.input)?;
    apply_edits(&mut session, args)?;

    if let Some(path) = &args.save_config
        && let Some(config) = session.config()
    {
        config
            .save(path)
            .with_context(|| format!("Writing chart config to {path:?}"))?;
        info!("Saved chart config to {path:?}");
    }

    let view = session.chart_view()?;
    if view.is_empty() {
        warn!("No data to chart in {:?}", args.input);
    } else if !view.ready {
        warn!(
            "Chart is not ready to render: select an x axis and at least one y axis series"
        );
    }
    write_payload(&view, args.output.as_deref(), args.pretty)?;
    info!(
        "Wrote {} {} chart row(s) to {}",
        view.data.len(),
        view.config.kind(),
        args.output
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "stdout".into())
    );
    Ok(())
}

fn apply_edits(session: &mut Session, args: &ChartArgs) -> Result<()> {
    if let Some(path) = &args.config {
        let schema = session.schema().unwrap_or_default().to_vec();
        let config = ChartConfig::load(path, &schema)
            .with_context(|| format!("Loading chart config from {path:?}"))?;
        session.replace_config(config)?;
    } else if let Some(kind) = args.kind {
        session.set_kind(kind)?;
    }

    if let Some(title) = &args.title {
        session.set_title(title)?;
    }
    if args.clear_x {
        session.set_x_axis(None)?;
    } else if let Some(key) = &args.x_axis {
        session
            .set_x_axis(Some(key))
            .with_context(|| format!("Setting x axis to '{key}'"))?;
    }
    for key in &args.y_axis {
        session
            .toggle_y_axis(key, true)
            .with_context(|| format!("Adding y axis series '{key}'"))?;
    }
    for key in &args.drop_y {
        session
            .toggle_y_axis(key, false)
            .with_context(|| format!("Removing y axis series '{key}'"))?;
    }
    Ok(())
}

fn write_payload(view: &ChartView<'_>, output: Option<&Path>, pretty: bool) -> Result<()> {
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Creating output file {path:?}"))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(sink);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, view)?;
    } else {
        serde_json::to_writer(&mut writer, view)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
