pub mod chart_cmd;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod io_utils;
pub mod palette;
pub mod parser;
pub mod preview;
pub mod probe;
pub mod recommend;
pub mod reshape;
pub mod schema;
pub mod session;
pub mod sort;
pub mod table;
pub mod upload;

use std::{env, path::Path, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use crate::{
    cli::{Cli, Commands},
    session::Session,
    upload::UploadedFile,
};

pub use crate::{
    config::{ChartConfig, ChartKind},
    data::{Dataset, Row, Value},
    error::ChartError,
    reshape::{ChartData, PieSlice},
    schema::{ColumnSchema, SemanticType},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_charts", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Probe(args) => probe::execute(&args),
        Commands::Recommend(args) => chart_cmd::execute_recommend(&args),
        Commands::Chart(args) => chart_cmd::execute_chart(&args),
        Commands::Preview(args) => preview::execute(&args),
    }
}

/// Reads `path` through the upload gate into a fresh session.
pub(crate) fn open_session(path: &Path) -> Result<Session> {
    let file = UploadedFile::from_path(path).with_context(|| format!("Reading {path:?}"))?;
    let mut session = Session::new();
    session
        .upload(vec![file])
        .with_context(|| format!("Loading {path:?}"))?;
    Ok(session)
}
