use crate::core::Pipeline;
use crate::domain::event::S3Event;
use crate::domain::model::HandlerResponse;
use crate::utils::error::Result;

/// Drives a [`Pipeline`] for one object at a time. The engine owns the
/// extract/transform/load sequencing and the invocation logging; everything
/// storage- or format-specific lives behind the pipeline.
pub struct CleanerEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> CleanerEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Entry point for bucket notifications. Validates the event, processes
    /// the first record's object and returns the fixed completion response.
    pub async fn handle(&self, event: S3Event) -> Result<HandlerResponse> {
        let key = event.first_object_key()?.to_string();
        // first_object_key already checked that a record exists
        let record = &event.records[0];

        tracing::info!(
            "✅ Cleaner triggered by {} for s3://{}/{}",
            record.event_name.as_deref().unwrap_or("bucket notification"),
            record.s3.bucket.name.as_deref().unwrap_or("<unknown>"),
            key
        );
        if let Some(event_time) = record.event_time {
            tracing::debug!("Object created at {}", event_time);
        }
        if let Some(size) = record.s3.object.size {
            tracing::debug!("Object size: {} bytes", size);
        }

        self.process_object(&key).await?;

        Ok(HandlerResponse::complete())
    }

    /// Runs fetch, transform and store for a single object key and returns
    /// the key the cleaned copy was written under.
    pub async fn process_object(&self, key: &str) -> Result<String> {
        tracing::info!("Extracting object: {}", key);
        let table = self.pipeline.extract(key).await?;
        tracing::info!(
            "Extracted {} rows, {} columns",
            table.row_count(),
            table.column_count()
        );
        tracing::info!("Original data:\n{}", table);

        tracing::info!("Transforming data...");
        let result = self.pipeline.transform(table).await?;
        if result.column_found {
            tracing::info!("Incremented ages on {} rows", result.rows_updated);
        }

        tracing::info!("Loading data...");
        let output_key = self.pipeline.load(key, result).await?;
        tracing::info!("✅ Successfully processed and uploaded: {}", key);

        Ok(output_key)
    }
}
