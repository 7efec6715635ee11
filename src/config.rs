//! Chart configuration model.
//!
//! A [`ChartConfig`] carries the chart kind, title, axis bindings and the
//! schema annotated with role flags. The flags are a projection of the axis
//! fields: they are recomputed by every operation here and cannot be set on
//! their own. Operations never mutate in place; each returns a new config.

use std::{fmt, path::Path, str::FromStr};

use clap::ValueEnum;
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ChartError, Result},
    io_utils, recommend,
    schema::{ColumnSchema, column_position},
};

pub const DEFAULT_TITLE: &str = "Chart Title";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Scatter,
    Area,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Pie,
        ChartKind::Scatter,
        ChartKind::Area,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Scatter => "scatter",
            ChartKind::Area => "area",
        }
    }

    /// Human-readable name shown in kind pickers.
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Chart",
            ChartKind::Line => "Line Chart",
            ChartKind::Pie => "Pie Chart",
            ChartKind::Scatter => "Scatter Plot",
            ChartKind::Area => "Area Chart",
        }
    }

    /// Proportional kinds plot name/value pairs instead of raw rows.
    pub fn is_proportional(self) -> bool {
        matches!(self, ChartKind::Pie)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self> {
        let lowered = value.trim().to_ascii_lowercase();
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| ChartError::Config(format!("Unknown chart kind '{value}'")))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ColumnRole {
    #[serde(flatten)]
    column: ColumnSchema,
    is_x_axis: bool,
    is_y_axis: bool,
    is_pie_value: bool,
}

impl ColumnRole {
    pub fn column(&self) -> &ColumnSchema {
        &self.column
    }

    pub fn key(&self) -> &str {
        &self.column.key
    }

    pub fn is_x_axis(&self) -> bool {
        self.is_x_axis
    }

    pub fn is_y_axis(&self) -> bool {
        self.is_y_axis
    }

    pub fn is_pie_value(&self) -> bool {
        self.is_pie_value
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartConfig {
    kind: ChartKind,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    x_axis_key: Option<String>,
    y_axis_keys: Vec<String>,
    columns: Vec<ColumnRole>,
}

/// The user-editable part of a config as stored on disk. Role flags are not
/// persisted; they are rebuilt against the schema on load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredChartConfig {
    pub kind: ChartKind,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis_key: Option<String>,
    #[serde(default)]
    pub y_axis_keys: Vec<String>,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl ChartConfig {
    /// Assembles a config from axis fields, validating every key against
    /// `schema`. Duplicate y keys keep their first occurrence.
    pub fn new(
        kind: ChartKind,
        title: impl Into<String>,
        x_axis_key: Option<String>,
        y_axis_keys: Vec<String>,
        schema: &[ColumnSchema],
    ) -> Result<Self> {
        if let Some(key) = &x_axis_key {
            ensure_known(schema, key)?;
        }
        for key in &y_axis_keys {
            ensure_known(schema, key)?;
        }
        Ok(ChartConfig::from_parts(
            kind,
            title,
            x_axis_key,
            y_axis_keys,
            schema,
        ))
    }

    /// Builds a config from keys already known to belong to `schema`.
    pub(crate) fn from_parts(
        kind: ChartKind,
        title: impl Into<String>,
        x_axis_key: Option<String>,
        y_axis_keys: Vec<String>,
        schema: &[ColumnSchema],
    ) -> Self {
        let mut config = ChartConfig {
            kind,
            title: title.into(),
            x_axis_key,
            y_axis_keys: y_axis_keys.into_iter().unique().collect(),
            columns: schema
                .iter()
                .cloned()
                .map(|column| ColumnRole {
                    column,
                    is_x_axis: false,
                    is_y_axis: false,
                    is_pie_value: false,
                })
                .collect(),
        };
        config.refresh_roles();
        config
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn x_axis_key(&self) -> Option<&str> {
        self.x_axis_key.as_deref()
    }

    pub fn y_axis_keys(&self) -> &[String] {
        &self.y_axis_keys
    }

    pub fn columns(&self) -> &[ColumnRole] {
        &self.columns
    }

    /// The schema this config was built against, without role flags.
    pub fn schema(&self) -> Vec<ColumnSchema> {
        self.columns.iter().map(|role| role.column.clone()).collect()
    }

    /// Columns offered as y-axis series: the numeric ones.
    pub fn y_axis_candidates(&self) -> impl Iterator<Item = &ColumnSchema> {
        self.columns
            .iter()
            .map(ColumnRole::column)
            .filter(|column| column.is_numeric())
    }

    /// A chart needs an x key and at least one y key before it can be drawn.
    pub fn is_renderable(&self) -> bool {
        self.x_axis_key.is_some() && !self.y_axis_keys.is_empty()
    }

    pub fn set_title(&self, title: impl Into<String>) -> ChartConfig {
        ChartConfig {
            title: title.into(),
            ..self.clone()
        }
    }

    /// Selects (or clears, with `None`) the x-axis column.
    pub fn set_x_axis(&self, key: Option<&str>) -> Result<ChartConfig> {
        if let Some(key) = key {
            self.ensure_column(key)?;
        }
        let mut next = self.clone();
        next.x_axis_key = key.map(str::to_string);
        next.refresh_roles();
        Ok(next)
    }

    /// Adds `key` to the y-axis series (appended, never duplicated) or
    /// removes it, keeping the order of the remaining keys.
    pub fn toggle_y_axis(&self, key: &str, include: bool) -> Result<ChartConfig> {
        self.ensure_column(key)?;
        let mut next = self.clone();
        let present = next.y_axis_keys.iter().any(|existing| existing == key);
        match (include, present) {
            (true, false) => next.y_axis_keys.push(key.to_string()),
            (false, true) => next.y_axis_keys.retain(|existing| existing != key),
            _ => {}
        }
        next.refresh_roles();
        Ok(next)
    }

    /// Resets to the recommended defaults for `kind` over this config's own
    /// schema. Axis choices are not carried over.
    pub fn with_kind(&self, kind: ChartKind) -> ChartConfig {
        change_kind(kind, &self.schema())
    }

    pub fn to_stored(&self) -> StoredChartConfig {
        StoredChartConfig {
            kind: self.kind,
            title: self.title.clone(),
            x_axis_key: self.x_axis_key.clone(),
            y_axis_keys: self.y_axis_keys.clone(),
        }
    }

    pub fn from_stored(stored: StoredChartConfig, schema: &[ColumnSchema]) -> Result<Self> {
        ChartConfig::new(
            stored.kind,
            stored.title,
            stored.x_axis_key,
            stored.y_axis_keys,
            schema,
        )
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        io_utils::write_config_file(path, &self.to_stored())
    }

    pub fn load(path: &Path, schema: &[ColumnSchema]) -> Result<Self> {
        let stored: StoredChartConfig = io_utils::read_config_file(path)?;
        debug!("Loaded {} chart config from {path:?}", stored.kind);
        ChartConfig::from_stored(stored, schema)
    }

    fn ensure_column(&self, key: &str) -> Result<()> {
        if self.columns.iter().any(|role| role.key() == key) {
            Ok(())
        } else {
            Err(ChartError::unknown_column(key))
        }
    }

    /// Single place where role flags are derived from the axis fields.
    fn refresh_roles(&mut self) {
        let pie_value = self
            .kind
            .is_proportional()
            .then(|| self.y_axis_keys.first())
            .flatten();
        for role in &mut self.columns {
            let key = role.column.key.as_str();
            role.is_x_axis = self.x_axis_key.as_deref() == Some(key);
            role.is_y_axis = self.y_axis_keys.iter().any(|y| y == key);
            role.is_pie_value = pie_value.is_some_and(|y| y == key);
        }
    }
}

/// Discards any current config and returns the defaults for `kind`.
pub fn change_kind(kind: ChartKind, schema: &[ColumnSchema]) -> ChartConfig {
    recommend::default_config(kind, schema)
}

fn ensure_known(schema: &[ColumnSchema], key: &str) -> Result<()> {
    column_position(schema, key)
        .map(|_| ())
        .ok_or_else(|| ChartError::unknown_column(key))
}
