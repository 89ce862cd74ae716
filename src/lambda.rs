#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_s3::config::Region;
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use s3_csv_cleaner::config::lambda::{LambdaConfig, S3Storage};
#[cfg(feature = "lambda")]
use s3_csv_cleaner::core::{engine::CleanerEngine, pipeline::CleanPipeline};
#[cfg(feature = "lambda")]
use s3_csv_cleaner::domain::event::S3Event;
#[cfg(feature = "lambda")]
use s3_csv_cleaner::domain::model::HandlerResponse;
#[cfg(feature = "lambda")]
use s3_csv_cleaner::utils::{logger, validation::Validate};

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<S3Event>) -> Result<HandlerResponse, Error> {
    tracing::info!("✅ Lambda triggered successfully.");

    // 創建Lambda配置
    let lambda_config = LambdaConfig::from_env()?;
    lambda_config.validate()?;

    // 創建AWS配置和S3客戶端
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let mut builder = aws_sdk_s3::config::Builder::from(&config);
    if let Some(region) = lambda_config.s3_region.clone() {
        builder = builder.region(Region::new(region));
    }
    if lambda_config.s3_force_path_style {
        builder = builder.force_path_style(true);
    }
    let s3_client = S3Client::from_conf(builder.build());

    // 創建存儲和管道
    let source = S3Storage::new(s3_client.clone(), lambda_config.source_bucket.clone());
    let destination = S3Storage::new(s3_client, lambda_config.cleaned_bucket.clone());
    let pipeline = CleanPipeline::new(source, destination, lambda_config);

    // 運行清理
    let engine = CleanerEngine::new(pipeline);
    let response = engine.handle(event.payload).await?;

    Ok(response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
