use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::utils::error::CleanerError;

/// Rows shown by the diagnostic dump before it truncates.
const DISPLAY_MAX_ROWS: usize = 10;

/// In-memory tabular dataset parsed from CSV bytes. Column order follows the
/// header row; each row maps column name to a tagged cell value
/// (null | number | string).
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<HashMap<String, Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self.rows.len().min(DISPLAY_MAX_ROWS);

        // Column widths over the header and the shown rows.
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.len()).collect();
        let rendered: Vec<Vec<String>> = self.rows[..shown]
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|col| cell_to_string(row.get(col).unwrap_or(&Value::Null)))
                    .collect()
            })
            .collect();
        for row in &rendered {
            for (i, cell) in row.iter().enumerate() {
                if cell.len() > widths[i] {
                    widths[i] = cell.len();
                }
            }
        }

        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, "  ")?;
            }
            write!(f, "{:<width$}", col, width = widths[i])?;
        }
        for row in &rendered {
            writeln!(f)?;
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{:<width$}", cell, width = widths[i])?;
            }
        }
        if self.rows.len() > shown {
            writeln!(f)?;
            write!(f, "… ({} more rows)", self.rows.len() - shown)?;
        }
        Ok(())
    }
}

/// Per-value type inference for a raw CSV cell: empty cells become null,
/// numeric-looking text becomes a number, everything else stays text.
/// `NaN`/`inf` spellings stay text because serde_json numbers cannot hold
/// non-finite values.
pub fn infer_cell(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        if let Some(number) = serde_json::Number::from_f64(float) {
            return Value::Number(number);
        }
    }
    Value::String(raw.to_string())
}

/// Serialization inverse of [`infer_cell`]: null renders as an empty field,
/// numbers via serde_json display (integral floats keep their `.0`).
pub fn cell_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// What to do when the configured age column is absent from the input.
/// The source shipped both behaviors in two near-identical handlers; here it
/// is a configuration choice, defaulting to skip-with-warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum MissingColumnPolicy {
    Skip,
    Fail,
}

impl Default for MissingColumnPolicy {
    fn default() -> Self {
        MissingColumnPolicy::Skip
    }
}

impl FromStr for MissingColumnPolicy {
    type Err = CleanerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skip" | "warn" => Ok(MissingColumnPolicy::Skip),
            "fail" | "strict" => Ok(MissingColumnPolicy::Fail),
            _ => Err(CleanerError::InvalidConfigValueError {
                field: "missing_column_policy".to_string(),
                value: s.to_string(),
                reason: "expected one of: skip, fail".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub table: Table,
    pub csv_output: String,
    pub rows_updated: usize,
    pub column_found: bool,
}

/// Fixed success status returned to the invoking platform. The written
/// object is the actual output artifact; this value never varies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl HandlerResponse {
    pub fn complete() -> Self {
        Self {
            status_code: 200,
            body: serde_json::json!("Processing complete.").to_string(),
        }
    }
}
