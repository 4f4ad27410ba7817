pub mod container_snapshot;
pub mod loggers;

pub use container_snapshot::*;
pub use loggers::*;
