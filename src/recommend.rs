//! Chart kind recommendation and default axis bindings.
//!
//! Recommendation walks [`RECOMMENDATION_RULES`] in order and takes the first
//! rule whose condition holds, falling back to [`FALLBACK_RULE`]. The table
//! is public so callers (and tests) can see the tie-break order directly.

use log::debug;

use crate::{
    config::{ChartConfig, ChartKind, DEFAULT_TITLE},
    schema::ColumnSchema,
};

/// Default y-axis bindings never exceed this many series.
pub const MAX_DEFAULT_Y_KEYS: usize = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnCounts {
    pub numeric: usize,
    pub categorical: usize,
}

impl ColumnCounts {
    pub fn of(schema: &[ColumnSchema]) -> Self {
        let numeric = schema.iter().filter(|column| column.is_numeric()).count();
        ColumnCounts {
            numeric,
            categorical: schema.len() - numeric,
        }
    }
}

#[derive(Debug)]
pub struct RecommendationRule {
    pub name: &'static str,
    pub condition: fn(ColumnCounts) -> bool,
    pub kind: ChartKind,
}

impl RecommendationRule {
    pub fn matches(&self, counts: ColumnCounts) -> bool {
        (self.condition)(counts)
    }
}

fn several_measures_by_category(counts: ColumnCounts) -> bool {
    counts.numeric >= 2 && counts.categorical >= 1
}

fn several_measures(counts: ColumnCounts) -> bool {
    counts.numeric >= 2
}

fn one_measure_one_category(counts: ColumnCounts) -> bool {
    counts.numeric == 1 && counts.categorical == 1
}

fn always(_: ColumnCounts) -> bool {
    true
}

pub const RECOMMENDATION_RULES: &[RecommendationRule] = &[
    RecommendationRule {
        name: "two or more numeric columns with a categorical column",
        condition: several_measures_by_category,
        kind: ChartKind::Bar,
    },
    RecommendationRule {
        name: "two or more numeric columns",
        condition: several_measures,
        kind: ChartKind::Line,
    },
    RecommendationRule {
        name: "one numeric and one categorical column",
        condition: one_measure_one_category,
        kind: ChartKind::Pie,
    },
];

pub static FALLBACK_RULE: RecommendationRule = RecommendationRule {
    name: "fallback",
    condition: always,
    kind: ChartKind::Bar,
};

/// Returns the first rule matching `schema`.
pub fn explain(schema: &[ColumnSchema]) -> &'static RecommendationRule {
    let counts = ColumnCounts::of(schema);
    let rule = RECOMMENDATION_RULES
        .iter()
        .find(|rule| rule.matches(counts))
        .unwrap_or(&FALLBACK_RULE);
    debug!(
        "Recommending {} for {} numeric / {} categorical column(s) ({})",
        rule.kind, counts.numeric, counts.categorical, rule.name
    );
    rule
}

pub fn recommend(schema: &[ColumnSchema]) -> ChartKind {
    explain(schema).kind
}

/// x: first categorical column, else first numeric column. y: the first
/// [`MAX_DEFAULT_Y_KEYS`] numeric columns.
pub fn default_axes(schema: &[ColumnSchema]) -> (Option<String>, Vec<String>) {
    let x_axis_key = schema
        .iter()
        .find(|column| column.is_categorical())
        .or_else(|| schema.iter().find(|column| column.is_numeric()))
        .map(|column| column.key.clone());
    let y_axis_keys = schema
        .iter()
        .filter(|column| column.is_numeric())
        .take(MAX_DEFAULT_Y_KEYS)
        .map(|column| column.key.clone())
        .collect();
    (x_axis_key, y_axis_keys)
}

pub fn default_config(kind: ChartKind, schema: &[ColumnSchema]) -> ChartConfig {
    let (x_axis_key, y_axis_keys) = default_axes(schema);
    ChartConfig::from_parts(kind, DEFAULT_TITLE, x_axis_key, y_axis_keys, schema)
}
