//! Application state for one interactive session.
//!
//! A [`Session`] owns the loaded dataset, its schema, the chart config and
//! the table sort. An upload replaces all of them together or none of them:
//! the new state is fully built before the old one is swapped out, and a
//! failed parse leaves the previous state in place.
//!
//! Uploads are two-step. [`Session::begin_upload`] validates the file and
//! hands out a ticket; [`Session::complete_upload`] parses and applies it.
//! Only the most recently started upload may apply; completions for older
//! tickets are discarded.

use log::{debug, info};
use serde::Serialize;

use crate::{
    config::{ChartConfig, ChartKind, change_kind},
    data::Dataset,
    error::{ChartError, Result},
    palette, parser,
    recommend::{self, RecommendationRule},
    reshape::{ChartData, reshape},
    schema::{ColumnSchema, column_position, infer_schema},
    sort::SortState,
    table::TableView,
    upload::{UploadedFile, select_upload},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UploadTicket(u64);

/// A validated upload waiting for its content to be parsed.
#[derive(Debug)]
pub struct PendingUpload {
    ticket: UploadTicket,
    file: UploadedFile,
}

impl PendingUpload {
    pub fn ticket(&self) -> UploadTicket {
        self.ticket
    }

    pub fn file_name(&self) -> &str {
        &self.file.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Applied { rows: usize, kind: ChartKind },
    Superseded,
}

#[derive(Debug, Clone)]
struct LoadedData {
    source: String,
    dataset: Dataset,
    schema: Vec<ColumnSchema>,
    config: ChartConfig,
    recommendation: &'static RecommendationRule,
    sort: Option<SortState>,
}

impl LoadedData {
    fn build(source: String, dataset: Dataset) -> Self {
        let schema = infer_schema(&dataset);
        let recommendation = recommend::explain(&schema);
        let config = recommend::default_config(recommendation.kind, &schema);
        LoadedData {
            source,
            dataset,
            schema,
            config,
            recommendation,
            sort: None,
        }
    }
}

/// Everything the rendering collaborator needs for one frame.
#[derive(Debug, Serialize)]
pub struct ChartView<'a> {
    pub config: &'a ChartConfig,
    pub data: ChartData<'a>,
    pub colors: Vec<String>,
    pub ready: bool,
}

impl ChartView<'_> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

pub fn chart_view<'a>(dataset: &'a Dataset, config: &'a ChartConfig) -> ChartView<'a> {
    let data = reshape(dataset, config);
    let color_count = match &data {
        ChartData::Slices(slices) => slices.len(),
        ChartData::Rows { .. } => config.y_axis_keys().len(),
    };
    let ready = config.is_renderable() && !data.is_empty();
    ChartView {
        config,
        colors: palette::chart_colors(color_count),
        data,
        ready,
    }
}

#[derive(Debug, Default)]
pub struct Session {
    loaded: Option<LoadedData>,
    issued: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates an upload action and reserves a ticket for it. Rejected
    /// uploads do not touch the session or invalidate earlier tickets.
    pub fn begin_upload(&mut self, files: Vec<UploadedFile>) -> Result<PendingUpload> {
        let file = select_upload(files)?;
        self.issued += 1;
        let ticket = UploadTicket(self.issued);
        debug!("Upload {:?} started for '{}'", ticket, file.name);
        Ok(PendingUpload { ticket, file })
    }

    pub fn complete_upload(&mut self, pending: PendingUpload) -> Result<UploadOutcome> {
        if pending.ticket != UploadTicket(self.issued) {
            debug!(
                "Discarding upload {:?} for '{}'; a newer upload was started",
                pending.ticket, pending.file.name
            );
            return Ok(UploadOutcome::Superseded);
        }
        let dataset = parser::parse(pending.file.content.as_slice())?;
        let loaded = LoadedData::build(pending.file.name, dataset);
        let outcome = UploadOutcome::Applied {
            rows: loaded.dataset.len(),
            kind: loaded.config.kind(),
        };
        info!(
            "Loaded '{}' with {} row(s) and {} column(s); recommended {} ({})",
            loaded.source,
            loaded.dataset.len(),
            loaded.schema.len(),
            loaded.recommendation.kind,
            loaded.recommendation.name
        );
        self.loaded = Some(loaded);
        Ok(outcome)
    }

    /// Starts and completes an upload in one step.
    pub fn upload(&mut self, files: Vec<UploadedFile>) -> Result<UploadOutcome> {
        let pending = self.begin_upload(files)?;
        self.complete_upload(pending)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn source(&self) -> Option<&str> {
        self.loaded.as_ref().map(|loaded| loaded.source.as_str())
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.loaded.as_ref().map(|loaded| &loaded.dataset)
    }

    pub fn schema(&self) -> Option<&[ColumnSchema]> {
        self.loaded.as_ref().map(|loaded| loaded.schema.as_slice())
    }

    pub fn config(&self) -> Option<&ChartConfig> {
        self.loaded.as_ref().map(|loaded| &loaded.config)
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.loaded.as_ref().and_then(|loaded| loaded.sort.as_ref())
    }

    pub fn recommendation(&self) -> Option<&'static RecommendationRule> {
        self.loaded.as_ref().map(|loaded| loaded.recommendation)
    }

    /// Switching kinds resets the config to that kind's defaults.
    pub fn set_kind(&mut self, kind: ChartKind) -> Result<&ChartConfig> {
        let loaded = self.loaded_mut()?;
        loaded.config = change_kind(kind, &loaded.schema);
        Ok(&loaded.config)
    }

    pub fn set_title(&mut self, title: &str) -> Result<&ChartConfig> {
        self.update_config(|config| Ok(config.set_title(title)))
    }

    pub fn set_x_axis(&mut self, key: Option<&str>) -> Result<&ChartConfig> {
        self.update_config(|config| config.set_x_axis(key))
    }

    pub fn toggle_y_axis(&mut self, key: &str, include: bool) -> Result<&ChartConfig> {
        self.update_config(|config| config.toggle_y_axis(key, include))
    }

    /// Replaces the config wholesale, e.g. with one loaded from disk.
    pub fn replace_config(&mut self, config: ChartConfig) -> Result<&ChartConfig> {
        let loaded = self.loaded_mut()?;
        if config.schema() != loaded.schema {
            return Err(ChartError::Config(
                "config columns do not match the loaded dataset".to_string(),
            ));
        }
        loaded.config = config;
        Ok(&loaded.config)
    }

    /// Applies a header click from the table.
    pub fn request_sort(&mut self, key: &str) -> Result<&SortState> {
        let loaded = self.loaded_mut()?;
        if column_position(&loaded.schema, key).is_none() {
            return Err(ChartError::unknown_column(key));
        }
        let next = SortState::request(loaded.sort.as_ref(), key);
        debug!("Sorting table by '{}' ({})", next.key, next.direction);
        Ok(loaded.sort.insert(next))
    }

    pub fn chart_view(&self) -> Result<ChartView<'_>> {
        let loaded = self.loaded()?;
        Ok(chart_view(&loaded.dataset, &loaded.config))
    }

    pub fn table_view(&self) -> Result<TableView<'_>> {
        let loaded = self.loaded()?;
        Ok(TableView::new(
            &loaded.dataset,
            &loaded.schema,
            loaded.sort.as_ref(),
        ))
    }

    /// Image export belongs to the renderer and is not available here.
    pub fn request_export(&self) -> Result<()> {
        self.loaded()?;
        Err(ChartError::ExportUnsupported)
    }

    fn update_config<F>(&mut self, edit: F) -> Result<&ChartConfig>
    where
        F: FnOnce(&ChartConfig) -> Result<ChartConfig>,
    {
        let loaded = self.loaded_mut()?;
        loaded.config = edit(&loaded.config)?;
        Ok(&loaded.config)
    }

    fn loaded(&self) -> Result<&LoadedData> {
        self.loaded.as_ref().ok_or(ChartError::NoDataset)
    }

    fn loaded_mut(&mut self) -> Result<&mut LoadedData> {
        self.loaded.as_mut().ok_or(ChartError::NoDataset)
    }
}
