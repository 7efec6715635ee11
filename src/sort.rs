//! Table sorting: direction toggling and null-last row ordering.

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

use crate::data::{Dataset, Row, Value};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn is_ascending(self) -> bool {
        matches!(self, SortDirection::Ascending)
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

impl SortState {
    /// Applies a header click on `key`: a new column sorts ascending, the
    /// current column flips direction.
    pub fn request(current: Option<&SortState>, key: &str) -> SortState {
        let direction = match current {
            Some(state) if state.key == key => state.direction.flipped(),
            _ => SortDirection::Ascending,
        };
        SortState {
            key: key.to_string(),
            direction,
        }
    }
}

/// Orders two optional cells. Missing values go last in either direction.
pub fn compare_cells(
    left: Option<&Value>,
    right: Option<&Value>,
    direction: SortDirection,
) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ordering = a.compare(b);
            if direction.is_ascending() {
                ordering
            } else {
                ordering.reverse()
            }
        }
    }
}

/// Returns the dataset rows in display order without touching the dataset.
/// Unknown keys leave the original order; ties keep file order.
pub fn sorted_rows<'a>(dataset: &'a Dataset, sort: Option<&SortState>) -> Vec<&'a Row> {
    let mut rows: Vec<&Row> = dataset.rows().iter().collect();
    let Some(state) = sort else {
        return rows;
    };
    let Some(index) = dataset.column_index(&state.key) else {
        return rows;
    };
    rows.sort_by(|a, b| compare_cells(a.get(index), b.get(index), state.direction));
    rows
}
