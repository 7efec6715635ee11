//! Column schema model and whole-column semantic type inference.
//!
//! Inference runs as its own pass over every row of a [`Dataset`], separate
//! from the parser's per-cell number/string split: a column is numeric only
//! when no cell anywhere in it holds non-numeric text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::{Dataset, Value};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    Numeric,
    Categorical,
}

impl SemanticType {
    pub fn as_str(self) -> &'static str {
        match self {
            SemanticType::Numeric => "numeric",
            SemanticType::Categorical => "categorical",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnSchema {
    pub key: String,
    pub label: String,
    pub semantic_type: SemanticType,
}

impl ColumnSchema {
    pub fn new(key: impl Into<String>, semantic_type: SemanticType) -> Self {
        let key = key.into();
        Self {
            label: key.clone(),
            key,
            semantic_type,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.semantic_type == SemanticType::Numeric
    }

    pub fn is_categorical(&self) -> bool {
        self.semantic_type == SemanticType::Categorical
    }
}

/// Infers one [`ColumnSchema`] per header key, in header order.
pub fn infer_schema(dataset: &Dataset) -> Vec<ColumnSchema> {
    dataset
        .headers()
        .iter()
        .enumerate()
        .map(|(idx, key)| ColumnSchema::new(key.clone(), infer_column_type(dataset, idx)))
        .collect()
}

fn infer_column_type(dataset: &Dataset, index: usize) -> SemanticType {
    if dataset.is_empty() {
        return SemanticType::Categorical;
    }
    if dataset.column(index).all(cell_is_numeric_compatible) {
        SemanticType::Numeric
    } else {
        SemanticType::Categorical
    }
}

fn cell_is_numeric_compatible(cell: Option<&Value>) -> bool {
    match cell {
        None => true,
        Some(value) if value.is_empty_text() => true,
        Some(value) => value.as_number().is_some(),
    }
}

pub fn column_position(schema: &[ColumnSchema], key: &str) -> Option<usize> {
    schema.iter().position(|column| column.key == key)
}
