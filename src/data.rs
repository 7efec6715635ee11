use std::{cmp::Ordering, fmt, sync::OnceLock};

use regex::Regex;
use serde::Serialize;

/// Optional sign, digits with an optional fraction (or a bare leading-dot
/// fraction), optional exponent.
const NUMERAL_PATTERN: &str = r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$";

static NUMERAL: OnceLock<Regex> = OnceLock::new();

fn numeral() -> &'static Regex {
    NUMERAL.get_or_init(|| Regex::new(NUMERAL_PATTERN).expect("numeral pattern is valid"))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    pub fn as_display(&self) -> String {
        match self {
            Value::Number(n) => n.to_string(),
            Value::Text(s) => s.clone(),
        }
    }

    /// Best-effort numeric reading: numbers as-is, numeric text parsed.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => parse_number(s),
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Empty text counts as "no value" for blank-row and inference checks.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Value::Text(s) if s.is_empty())
    }

    /// Numbers compare numerically; anything involving text compares the
    /// display strings with [`compare_text`].
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::Text(a), Value::Text(b)) => compare_text(a, b),
            (left, right) => compare_text(&left.as_display(), &right.as_display()),
        }
    }
}

/// Case-insensitive ordering, so `apple` lands before `Banana`. Strings that
/// differ only in case fall back to byte order to keep the result total.
pub fn compare_text(left: &str, right: &str) -> Ordering {
    left.chars()
        .flat_map(char::to_lowercase)
        .cmp(right.chars().flat_map(char::to_lowercase))
        .then_with(|| left.cmp(right))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

/// Parses `text` as a decimal numeral after trimming surrounding whitespace.
/// Words such as `inf` or `NaN` are not numerals.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if !numeral().is_match(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Types a single raw cell: blank → `None`, numeral → number, else the
/// original text.
pub fn parse_cell(raw: &str) -> Option<Value> {
    if raw.trim().is_empty() {
        return None;
    }
    match parse_number(raw) {
        Some(number) => Some(Value::Number(number)),
        None => Some(Value::Text(raw.to_string())),
    }
}

/// One record, with exactly one cell per dataset header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: Vec<Option<Value>>,
}

impl Row {
    pub fn new(cells: Vec<Option<Value>>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Option<Value>] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.cells.get(index).and_then(|cell| cell.as_ref())
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|cell| match cell {
            None => true,
            Some(value) => value.is_empty_text(),
        })
    }

    fn fit_to(mut self, width: usize) -> Self {
        self.cells.resize(width, None);
        self
    }
}

/// Header keys plus the non-blank rows of one upload, in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Builds a dataset, padding or truncating every row to the header width
    /// and dropping blank rows.
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|row| row.fit_to(width))
            .filter(|row| !row.is_blank())
            .collect();
        Self { headers, rows }
    }

    /// Builds a dataset from raw text cells without the parser's numeric
    /// typing. Blank or whitespace-only cells become `None`, as in the parser;
    /// everything else stays text.
    pub fn from_text_records<H, R, S>(headers: &[H], records: R) -> Self
    where
        H: AsRef<str>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let headers = headers.iter().map(|h| h.as_ref().to_string()).collect();
        let rows = records
            .into_iter()
            .map(|record| {
                Row::new(
                    record
                        .into_iter()
                        .map(|cell| {
                            let cell = cell.as_ref();
                            (!cell.trim().is_empty()).then(|| Value::Text(cell.to_string()))
                        })
                        .collect(),
                )
            })
            .collect();
        Self::new(headers, rows)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == key)
    }

    pub fn value<'a>(&'a self, row: &'a Row, key: &str) -> Option<&'a Value> {
        self.column_index(key).and_then(|idx| row.get(idx))
    }

    /// Iterates one column's cells in row order.
    pub fn column(&self, index: usize) -> impl Iterator<Item = Option<&Value>> + '_ {
        self.rows.iter().map(move |row| row.get(index))
    }
}
