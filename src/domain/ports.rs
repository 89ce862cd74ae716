use crate::domain::model::{MissingColumnPolicy, Table, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// One bucket- or directory-bound object storage capability. The pipeline
/// holds a read-only source store and a write-only destination store.
pub trait ObjectStore: Send + Sync {
    fn get_object(&self, key: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn put_object(
        &self,
        key: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn age_column(&self) -> &str;
    fn output_prefix(&self) -> &str;
    fn missing_column_policy(&self) -> MissingColumnPolicy;
    fn operation_timeout(&self) -> Duration;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self, key: &str) -> Result<Table>;
    async fn transform(&self, table: Table) -> Result<TransformResult>;
    async fn load(&self, key: &str, result: TransformResult) -> Result<String>;
}
