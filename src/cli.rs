use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::ChartKind;

#[derive(Debug, Parser)]
#[command(author, version, about = "Turn CSV files into chart-ready data", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Infer the column schema of a CSV file
    Probe(ProbeArgs),
    /// Recommend a chart kind and default axes for a CSV file
    Recommend(RecommendArgs),
    /// Build the chart configuration and chart data consumed by a renderer
    Chart(ChartArgs),
    /// Preview rows of a CSV file as a sortable table
    Preview(PreviewArgs),
}

#[derive(Debug, Args)]
pub struct ProbeArgs {
    /// Input CSV file to inspect
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
}

#[derive(Debug, Args)]
pub struct RecommendArgs {
    /// Input CSV file to inspect
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Save the recommended config (.json, .yaml or .yml)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ChartArgs {
    /// Input CSV file to chart
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Chart kind; resets axes to that kind's defaults
    #[arg(short = 'k', long = "kind", value_enum, conflicts_with = "config")]
    pub kind: Option<ChartKind>,
    /// Previously saved chart config to start from
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
    /// Chart title
    #[arg(long)]
    pub title: Option<String>,
    /// Column to plot on the x axis
    #[arg(short = 'x', long = "x")]
    pub x_axis: Option<String>,
    /// Remove the x-axis binding
    #[arg(long = "clear-x", conflicts_with = "x_axis")]
    pub clear_x: bool,
    /// Add a y-axis series (repeatable)
    #[arg(short = 'y', long = "y", action = clap::ArgAction::Append)]
    pub y_axis: Vec<String>,
    /// Remove a y-axis series (repeatable)
    #[arg(long = "drop-y", action = clap::ArgAction::Append)]
    pub drop_y: Vec<String>,
    /// Write the chart payload here instead of stdout
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Save the final config (.json, .yaml or .yml)
    #[arg(long = "save-config")]
    pub save_config: Option<PathBuf>,
    /// Pretty-print the JSON payload
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Input CSV file to preview
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Number of rows to display (0 = all)
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
    /// Sort requests applied in order; repeating a column flips its direction
    #[arg(long = "sort", action = clap::ArgAction::Append)]
    pub sort: Vec<String>,
}
