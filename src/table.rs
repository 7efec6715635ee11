use std::borrow::Cow;
use std::fmt::Write as _;

use crate::{
    data::{Dataset, Row},
    schema::ColumnSchema,
    sort::{SortDirection, SortState, sorted_rows},
};

const NO_DATA: &str = "No data available";

/// What the table collaborator displays: column labels, rows in display
/// order, and the active sort.
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    pub columns: &'a [ColumnSchema],
    pub rows: Vec<&'a Row>,
    pub sort: Option<&'a SortState>,
}

impl<'a> TableView<'a> {
    pub fn new(
        dataset: &'a Dataset,
        columns: &'a [ColumnSchema],
        sort: Option<&'a SortState>,
    ) -> Self {
        Self {
            columns,
            rows: sorted_rows(dataset, sort),
            sort,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column labels, with an arrow on the sorted column.
    pub fn header_cells(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| match self.sort {
                Some(sort) if sort.key == column.key => {
                    let arrow = match sort.direction {
                        SortDirection::Ascending => '▲',
                        SortDirection::Descending => '▼',
                    };
                    format!("{} {arrow}", column.label)
                }
                _ => column.label.clone(),
            })
            .collect()
    }

    /// Display text per cell; missing values render empty.
    pub fn body_cells(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                row.cells()
                    .iter()
                    .map(|cell| cell.as_ref().map(|v| v.as_display()).unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    pub fn render(&self) -> String {
        if self.is_empty() {
            return format!("{NO_DATA}\n");
        }
        render_table(&self.header_cells(), &self.body_cells())
    }
}

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let column_count = headers.len();
    let mut widths = headers.iter().map(|h| display_width(h)).collect::<Vec<_>>();

    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(display_width(cell));
        }
    }

    for width in &mut widths {
        *width = (*width).max(1);
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_row(headers, &widths));

    let separator_widths = widths.iter().map(|w| (*w).max(3)).collect::<Vec<usize>>();
    let separator_cells = separator_widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&separator_cells, &separator_widths));

    for row in rows {
        let _ = writeln!(output, "{}", format_row(row, &widths));
    }

    output
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    let mut cells = Vec::with_capacity(values.len());
    for (value, width) in values.iter().zip(widths) {
        let sanitized = sanitize_cell(value);
        let padding = width.saturating_sub(display_width(sanitized.as_ref()));
        let mut cell = sanitized.into_owned();
        cell.push_str(&" ".repeat(padding));
        cells.push(cell);
    }
    let mut line = cells.join("  ");
    while line.ends_with(' ') {
        line.pop();
    }
    line
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

// Embedded newlines and tabs would break row alignment.
fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}
