// Domain layer: core models and ports (interfaces). Serde-facing types only, no I/O.

pub mod event;
pub mod model;
pub mod ports;
