use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::utils::error::{CleanerError, Result};

/// Inbound storage-creation notification. Only the first record's object key
/// drives processing; the remaining fields are kept for the trigger log.
/// Unknown JSON fields are ignored, and everything except the key is
/// optional so that trimmed-down test fixtures deserialize cleanly.
#[derive(Debug, Clone, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3EventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3EventRecord {
    #[serde(rename = "eventName", default)]
    pub event_name: Option<String>,
    #[serde(rename = "eventTime", default)]
    pub event_time: Option<DateTime<Utc>>,
    #[serde(rename = "awsRegion", default)]
    pub aws_region: Option<String>,
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3ObjectRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Bucket {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3ObjectRef {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

impl S3Event {
    /// Object key of the first record, taken verbatim (no URL decoding).
    pub fn first_object_key(&self) -> Result<&str> {
        let record = self
            .records
            .first()
            .ok_or_else(|| CleanerError::MalformedEventError {
                message: "event contains no records".to_string(),
            })?;

        let key = record
            .s3
            .object
            .key
            .as_deref()
            .ok_or_else(|| CleanerError::MalformedEventError {
                message: "first record carries no object key".to_string(),
            })?;

        if key.is_empty() {
            return Err(CleanerError::MalformedEventError {
                message: "first record's object key is empty".to_string(),
            });
        }

        Ok(key)
    }
}
