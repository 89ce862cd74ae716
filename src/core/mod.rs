pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{MissingColumnPolicy, Table, TransformResult};
pub use crate::domain::ports::{ConfigProvider, ObjectStore, Pipeline};
pub use crate::utils::error::Result;
