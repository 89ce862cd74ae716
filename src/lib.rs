pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

#[cfg(feature = "lambda")]
pub use config::lambda::{LambdaConfig, S3Storage};

pub use core::{engine::CleanerEngine, pipeline::CleanPipeline};
pub use domain::event::S3Event;
pub use domain::model::{HandlerResponse, MissingColumnPolicy, Table, TransformResult};
pub use utils::error::{CleanerError, Result};
