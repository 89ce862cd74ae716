use s3_csv_cleaner::{
    CleanPipeline, CleanerEngine, CleanerError, CliConfig, LocalStorage, MissingColumnPolicy,
    S3Event,
};
use tempfile::TempDir;

fn put_event(bucket: &str, key: &str) -> S3Event {
    serde_json::from_value(serde_json::json!({
        "Records": [{
            "eventVersion": "2.1",
            "eventSource": "aws:s3",
            "awsRegion": "us-east-1",
            "eventTime": "2024-03-01T12:00:00.000Z",
            "eventName": "ObjectCreated:Put",
            "s3": {
                "s3SchemaVersion": "1.0",
                "bucket": {
                    "name": bucket,
                    "arn": format!("arn:aws:s3:::{}", bucket)
                },
                "object": {
                    "key": key,
                    "size": 64,
                    "eTag": "d41d8cd98f00b204e9800998ecf8427e"
                }
            }
        }]
    }))
    .unwrap()
}

fn engine_over(
    source_dir: &TempDir,
    dest_dir: &TempDir,
) -> CleanerEngine<CleanPipeline<LocalStorage, LocalStorage, CliConfig>> {
    let config = CliConfig {
        input: "people.csv".to_string(),
        output_dir: dest_dir.path().to_str().unwrap().to_string(),
        output_prefix: "cleaned/".to_string(),
        age_column: "Age".to_string(),
        missing_column_policy: MissingColumnPolicy::Skip,
        timeout_secs: 30,
        verbose: false,
    };
    let source = LocalStorage::new(source_dir.path().to_str().unwrap().to_string());
    let destination = LocalStorage::new(dest_dir.path().to_str().unwrap().to_string());
    CleanerEngine::new(CleanPipeline::new(source, destination, config))
}

fn dest_entry_count(dest_dir: &TempDir) -> usize {
    std::fs::read_dir(dest_dir.path()).unwrap().count()
}

#[tokio::test]
async fn test_event_drives_the_full_clean() {
    let source_dir = TempDir::new().unwrap();
    let dest_dir = TempDir::new().unwrap();
    std::fs::write(
        source_dir.path().join("people.csv"),
        "Name,Age\nAlice,30\nBob,25\n",
    )
    .unwrap();

    let engine = engine_over(&source_dir, &dest_dir);
    let response = engine
        .handle(put_event("raw-data-ryan", "people.csv"))
        .await
        .unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "\"Processing complete.\"");
    let written = std::fs::read_to_string(dest_dir.path().join("cleaned/people.csv")).unwrap();
    assert_eq!(written, "Name,Age\nAlice,31\nBob,26\n");
}

#[tokio::test]
async fn test_only_the_first_record_is_processed() {
    let source_dir = TempDir::new().unwrap();
    let dest_dir = TempDir::new().unwrap();
    std::fs::write(source_dir.path().join("first.csv"), "Name,Age\nAlice,30\n").unwrap();
    std::fs::write(source_dir.path().join("second.csv"), "Name,Age\nBob,25\n").unwrap();

    let event: S3Event = serde_json::from_value(serde_json::json!({
        "Records": [
            {"s3": {"bucket": {"name": "raw-data-ryan"}, "object": {"key": "first.csv"}}},
            {"s3": {"bucket": {"name": "raw-data-ryan"}, "object": {"key": "second.csv"}}}
        ]
    }))
    .unwrap();

    let engine = engine_over(&source_dir, &dest_dir);
    engine.handle(event).await.unwrap();

    assert!(dest_dir.path().join("cleaned/first.csv").exists());
    assert!(!dest_dir.path().join("cleaned/second.csv").exists());
}

#[tokio::test]
async fn test_event_without_records_writes_nothing() {
    let source_dir = TempDir::new().unwrap();
    let dest_dir = TempDir::new().unwrap();

    let event: S3Event = serde_json::from_value(serde_json::json!({ "Records": [] })).unwrap();

    let engine = engine_over(&source_dir, &dest_dir);
    let err = engine.handle(event).await.unwrap_err();

    assert!(matches!(err, CleanerError::MalformedEventError { .. }));
    assert_eq!(dest_entry_count(&dest_dir), 0);
}

#[tokio::test]
async fn test_event_without_object_key_writes_nothing() {
    let source_dir = TempDir::new().unwrap();
    let dest_dir = TempDir::new().unwrap();

    let event: S3Event = serde_json::from_value(serde_json::json!({
        "Records": [{"s3": {"bucket": {"name": "raw-data-ryan"}, "object": {}}}]
    }))
    .unwrap();

    let engine = engine_over(&source_dir, &dest_dir);
    let err = engine.handle(event).await.unwrap_err();

    assert!(matches!(err, CleanerError::MalformedEventError { .. }));
    assert_eq!(dest_entry_count(&dest_dir), 0);
}

#[tokio::test]
async fn test_key_is_used_verbatim() {
    // Keys arrive as stored in the bucket; a literal `+` is part of the name,
    // not URL encoding.
    let source_dir = TempDir::new().unwrap();
    let dest_dir = TempDir::new().unwrap();
    std::fs::write(
        source_dir.path().join("my+file.csv"),
        "Name,Age\nAlice,30\n",
    )
    .unwrap();

    let engine = engine_over(&source_dir, &dest_dir);
    engine
        .handle(put_event("raw-data-ryan", "my+file.csv"))
        .await
        .unwrap();

    assert!(dest_dir.path().join("cleaned/my+file.csv").exists());
}

#[tokio::test]
async fn test_failed_clean_surfaces_the_error_not_a_success_response() {
    let source_dir = TempDir::new().unwrap();
    let dest_dir = TempDir::new().unwrap();
    std::fs::write(
        source_dir.path().join("people.csv"),
        "Name,Age\nAlice,thirty\n",
    )
    .unwrap();

    let engine = engine_over(&source_dir, &dest_dir);
    let err = engine
        .handle(put_event("raw-data-ryan", "people.csv"))
        .await
        .unwrap_err();

    assert!(matches!(err, CleanerError::CoercionError { .. }));
    assert_eq!(dest_entry_count(&dest_dir), 0);
}
