use anyhow::Context;
use clap::Parser;
use s3_csv_cleaner::utils::{logger, validation::Validate};
use s3_csv_cleaner::{CleanPipeline, CleanerEngine, CliConfig, LocalStorage};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting s3-csv-cleaner CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    // Split the input path into the directory the source store is rooted at
    // and the object key inside it.
    let input = Path::new(&config.input);
    let source_dir = input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| ".".to_string());
    let key = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .context("input path has no file name")?;

    // 創建存儲和管道
    let output_dir = config.output_dir.clone();
    let source = LocalStorage::new(source_dir);
    let destination = LocalStorage::new(output_dir.clone());
    let pipeline = CleanPipeline::new(source, destination, config);

    let engine = CleanerEngine::new(pipeline);

    match engine.process_object(&key).await {
        Ok(output_key) => {
            let output_path = Path::new(&output_dir).join(&output_key);
            tracing::info!("✅ Cleaning completed successfully!");
            println!("✅ Cleaning completed successfully!");
            println!("📁 Output saved to: {}", output_path.display());
        }
        Err(e) => {
            tracing::error!("❌ Cleaning failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
