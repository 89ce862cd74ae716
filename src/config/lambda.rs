#[cfg(feature = "lambda")]
use crate::core::{ConfigProvider, ObjectStore};
#[cfg(feature = "lambda")]
use crate::domain::model::MissingColumnPolicy;
#[cfg(feature = "lambda")]
use crate::utils::error::{CleanerError, Result};
#[cfg(feature = "lambda")]
use aws_sdk_s3::error::ProvideErrorMetadata;
#[cfg(feature = "lambda")]
use aws_sdk_s3::operation::get_object::GetObjectError;
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use std::env;
#[cfg(feature = "lambda")]
use std::time::Duration;

#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub source_bucket: String,
    pub cleaned_bucket: String,
    pub output_prefix: String,
    pub age_column: String,
    pub missing_column_policy: MissingColumnPolicy,
    pub operation_timeout_secs: u64,
    pub s3_region: Option<String>,
    pub s3_force_path_style: bool,
}

#[cfg(feature = "lambda")]
impl LambdaConfig {
    /// Reads the runtime configuration from environment variables. Bucket
    /// names and the column default to the deployment the function shipped
    /// with; policy and timeout reject malformed values instead of guessing.
    pub fn from_env() -> Result<Self> {
        let missing_column_policy = match env::var("MISSING_COLUMN_POLICY") {
            Ok(raw) => raw.parse()?,
            Err(_) => MissingColumnPolicy::default(),
        };
        let operation_timeout_secs = match env::var("OPERATION_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| CleanerError::InvalidConfigValueError {
                    field: "OPERATION_TIMEOUT_SECS".to_string(),
                    value: raw.clone(),
                    reason: "must be a whole number of seconds".to_string(),
                })?,
            Err(_) => 30,
        };

        Ok(Self {
            source_bucket: env::var("SOURCE_BUCKET")
                .unwrap_or_else(|_| "raw-data-ryan".to_string()),
            cleaned_bucket: env::var("CLEANED_BUCKET")
                .unwrap_or_else(|_| "cleaned-data-ryan".to_string()),
            output_prefix: env::var("OUTPUT_PREFIX").unwrap_or_else(|_| "cleaned/".to_string()),
            age_column: env::var("AGE_COLUMN").unwrap_or_else(|_| "Age".to_string()),
            missing_column_policy,
            operation_timeout_secs,
            s3_region: env::var("S3_REGION").ok(),
            s3_force_path_style: env::var("S3_FORCE_PATH_STYLE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }
}

#[cfg(feature = "lambda")]
impl ConfigProvider for LambdaConfig {
    fn age_column(&self) -> &str {
        &self.age_column
    }

    fn output_prefix(&self) -> &str {
        &self.output_prefix
    }

    fn missing_column_policy(&self) -> MissingColumnPolicy {
        self.missing_column_policy
    }

    fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout_secs)
    }
}

#[cfg(feature = "lambda")]
impl crate::utils::validation::Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        // 驗證S3 bucket名稱
        validate_s3_bucket_name("source_bucket", &self.source_bucket)?;
        validate_s3_bucket_name("cleaned_bucket", &self.cleaned_bucket)?;

        // 驗證欄位與逾時設定
        validate_non_empty_string("age_column", &self.age_column)?;
        validate_range("operation_timeout_secs", self.operation_timeout_secs, 1, 900)?;

        // 驗證區域
        if let Some(region) = &self.s3_region {
            validate_aws_region("s3_region", region)?;
        }

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(feature = "lambda")]
fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    if bucket_name.is_empty() {
        return Err(CleanerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name cannot be empty".to_string(),
        });
    }

    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(CleanerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name must be between 3 and 63 characters".to_string(),
        });
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(CleanerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots"
                .to_string(),
        });
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(CleanerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name cannot start or end with a hyphen".to_string(),
        });
    }

    Ok(())
}

#[cfg(feature = "lambda")]
fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    crate::utils::validation::validate_non_empty_string(field_name, region)?;

    // AWS region format validation
    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CleanerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

/// S3-backed object store bound to one bucket. The pipeline holds two of
/// these, one per bucket, sharing the same client.
#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
}

#[cfg(feature = "lambda")]
impl S3Storage {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[cfg(feature = "lambda")]
impl ObjectStore for S3Storage {
    async fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| match err.into_service_error() {
                GetObjectError::NoSuchKey(_) => CleanerError::ObjectNotFoundError {
                    key: key.to_string(),
                },
                err if err.code() == Some("AccessDenied") => CleanerError::AccessDeniedError {
                    key: key.to_string(),
                    message: err.message().unwrap_or("access denied").to_string(),
                },
                err => CleanerError::StorageReadError {
                    key: key.to_string(),
                    message: err.to_string(),
                },
            })?;

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| CleanerError::StorageReadError {
                key: key.to_string(),
                message: format!("failed to collect object body: {}", e),
            })?;

        Ok(data.into_bytes().to_vec())
    }

    async fn put_object(&self, key: &str, data: &[u8]) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(data.to_vec().into())
            .send()
            .await
            .map_err(|err| match err.into_service_error() {
                err if err.code() == Some("AccessDenied") => CleanerError::AccessDeniedError {
                    key: key.to_string(),
                    message: err.message().unwrap_or("access denied").to_string(),
                },
                err => CleanerError::StorageWriteError {
                    key: key.to_string(),
                    message: err.to_string(),
                },
            })?;

        Ok(())
    }
}
