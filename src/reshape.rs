//! Row data → the shape each chart kind consumes.
//!
//! Cartesian kinds read the dataset rows directly, so they get the row slice
//! back untouched. Proportional kinds get one name/value slice per row.

use serde::{
    Serialize, Serializer,
    ser::{SerializeMap, SerializeSeq},
};

use crate::{
    config::ChartConfig,
    data::{Dataset, Row, Value},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub name: String,
    /// `NaN` when the source cell is missing or has no numeric reading (a
    /// null is treated like non-numeric text); renderers omit such slices.
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartData<'a> {
    Rows {
        headers: &'a [String],
        rows: &'a [Row],
    },
    Slices(Vec<PieSlice>),
}

impl ChartData<'_> {
    pub fn len(&self) -> usize {
        match self {
            ChartData::Rows { rows, .. } => rows.len(),
            ChartData::Slices(slices) => slices.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rows(&self) -> Option<&[Row]> {
        match self {
            ChartData::Rows { rows, .. } => Some(rows),
            ChartData::Slices(_) => None,
        }
    }

    pub fn slices(&self) -> Option<&[PieSlice]> {
        match self {
            ChartData::Rows { .. } => None,
            ChartData::Slices(slices) => Some(slices),
        }
    }
}

pub fn reshape<'a>(dataset: &'a Dataset, config: &ChartConfig) -> ChartData<'a> {
    if config.kind().is_proportional() {
        ChartData::Slices(pie_slices(dataset, config))
    } else {
        ChartData::Rows {
            headers: dataset.headers(),
            rows: dataset.rows(),
        }
    }
}

fn pie_slices(dataset: &Dataset, config: &ChartConfig) -> Vec<PieSlice> {
    let label_index = config.x_axis_key().and_then(|key| dataset.column_index(key));
    let value_index = config
        .y_axis_keys()
        .first()
        .and_then(|key| dataset.column_index(key));
    let (Some(label_index), Some(value_index)) = (label_index, value_index) else {
        return Vec::new();
    };
    dataset
        .rows()
        .iter()
        .map(|row| PieSlice {
            name: row.get(label_index).map(Value::as_display).unwrap_or_default(),
            value: row
                .get(value_index)
                .and_then(Value::as_number)
                .unwrap_or(f64::NAN),
        })
        .collect()
}

struct RowObject<'a> {
    headers: &'a [String],
    row: &'a Row,
}

impl Serialize for RowObject<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.headers.len()))?;
        for (header, cell) in self.headers.iter().zip(self.row.cells()) {
            map.serialize_entry(header, cell)?;
        }
        map.end()
    }
}

impl Serialize for ChartData<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ChartData::Rows { headers, rows } => {
                let mut seq = serializer.serialize_seq(Some(rows.len()))?;
                for row in rows.iter() {
                    seq.serialize_element(&RowObject { headers, row })?;
                }
                seq.end()
            }
            ChartData::Slices(slices) => slices.serialize(serializer),
        }
    }
}
