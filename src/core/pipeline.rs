use crate::core::{
    ConfigProvider, MissingColumnPolicy, ObjectStore, Pipeline, Table, TransformResult,
};
use crate::domain::model::{cell_to_string, infer_cell};
use crate::utils::error::{CleanerError, Result};
use serde_json::Value;
use std::collections::HashMap;
use tokio::time::timeout;

/// The single cleaning pipeline: fetch + parse, age increment + serialize,
/// store. Source and destination are separate stores because the buckets
/// differ; both I/O calls are bounded by the configured operation timeout.
pub struct CleanPipeline<S: ObjectStore, D: ObjectStore, C: ConfigProvider> {
    source: S,
    destination: D,
    config: C,
}

impl<S: ObjectStore, D: ObjectStore, C: ConfigProvider> CleanPipeline<S, D, C> {
    pub fn new(source: S, destination: D, config: C) -> Self {
        Self {
            source,
            destination,
            config,
        }
    }
}

#[async_trait::async_trait]
impl<S: ObjectStore, D: ObjectStore, C: ConfigProvider> Pipeline for CleanPipeline<S, D, C> {
    async fn extract(&self, key: &str) -> Result<Table> {
        tracing::debug!("Fetching object: {}", key);
        let bytes = timeout(
            self.config.operation_timeout(),
            self.source.get_object(key),
        )
        .await
        .map_err(|_| CleanerError::TimeoutError {
            operation: "fetch".to_string(),
            seconds: self.config.operation_timeout().as_secs(),
        })??;
        tracing::debug!("Fetched {} bytes", bytes.len());

        parse_table(&bytes)
    }

    async fn transform(&self, mut table: Table) -> Result<TransformResult> {
        let column = self.config.age_column();
        let column_found = table.has_column(column);
        let mut rows_updated = 0;

        if column_found {
            // 逐行遞增年齡欄位
            for (index, row) in table.rows.iter_mut().enumerate() {
                let cell = row.get(column).cloned().unwrap_or(Value::Null);
                let age =
                    coerce_to_integer(&cell).map_err(|reason| CleanerError::CoercionError {
                        column: column.to_string(),
                        row: index,
                        value: cell_to_string(&cell),
                        reason,
                    })?;
                let bumped =
                    age.checked_add(1)
                        .ok_or_else(|| CleanerError::CoercionError {
                            column: column.to_string(),
                            row: index,
                            value: cell_to_string(&cell),
                            reason: "incremented value exceeds the integer range".to_string(),
                        })?;
                row.insert(column.to_string(), Value::Number(bumped.into()));
                rows_updated += 1;
            }
            tracing::debug!("Incremented '{}' on {} rows", column, rows_updated);
        } else {
            match self.config.missing_column_policy() {
                MissingColumnPolicy::Skip => {
                    tracing::warn!("⚠️ '{}' column not found in dataset!", column);
                }
                MissingColumnPolicy::Fail => {
                    return Err(CleanerError::MissingColumnError {
                        column: column.to_string(),
                    });
                }
            }
        }

        let csv_output = serialize_table(&table)?;
        Ok(TransformResult {
            table,
            csv_output,
            rows_updated,
            column_found,
        })
    }

    async fn load(&self, key: &str, result: TransformResult) -> Result<String> {
        let output_key = format!("{}{}", self.config.output_prefix(), key);
        tracing::debug!(
            "Writing {} bytes to {}",
            result.csv_output.len(),
            output_key
        );
        timeout(
            self.config.operation_timeout(),
            self.destination
                .put_object(&output_key, result.csv_output.as_bytes()),
        )
        .await
        .map_err(|_| CleanerError::TimeoutError {
            operation: "store".to_string(),
            seconds: self.config.operation_timeout().as_secs(),
        })??;

        Ok(output_key)
    }
}

/// Decodes CSV bytes into a [`Table`], inferring each cell's type. The csv
/// reader enforces rectangular records, so every row carries every column.
fn parse_table(bytes: &[u8]) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new().from_reader(bytes);

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(CleanerError::EmptyDataError {
            message: "no columns to parse".to_string(),
        });
    }

    let columns: Vec<String> = headers.iter().map(str::to_string).collect();
    let mut table = Table::new(columns);
    for record in reader.records() {
        let record = record?;
        let mut row = HashMap::with_capacity(table.column_count());
        for (column, raw) in table.columns.iter().zip(record.iter()) {
            row.insert(column.clone(), infer_cell(raw));
        }
        table.rows.push(row);
    }

    Ok(table)
}

/// Re-encodes a [`Table`] as CSV text: header row, original column order,
/// `\n` terminators, minimal quoting, no synthetic index column.
fn serialize_table(table: &Table) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(&table.columns)?;
    for row in &table.rows {
        let fields: Vec<String> = table
            .columns
            .iter()
            .map(|column| cell_to_string(row.get(column).unwrap_or(&Value::Null)))
            .collect();
        writer.write_record(&fields)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CleanerError::ProcessingError {
            message: format!("failed to flush CSV writer: {}", e),
        })?;
    String::from_utf8(bytes).map_err(|e| CleanerError::ProcessingError {
        message: format!("serialized CSV is not valid UTF-8: {}", e),
    })
}

fn coerce_to_integer(value: &Value) -> std::result::Result<i64, String> {
    match value {
        Value::Number(n) => {
            if let Some(int) = n.as_i64() {
                return Ok(int);
            }
            if let Some(float) = n.as_f64() {
                if float.fract() != 0.0 {
                    return Err("value is not an integer".to_string());
                }
                if float >= i64::MIN as f64 && float <= i64::MAX as f64 {
                    return Ok(float as i64);
                }
            }
            Err("value is out of integer range".to_string())
        }
        Value::Null => Err("value is empty".to_string()),
        _ => Err("value is not numeric".to_string()),
    }
}
