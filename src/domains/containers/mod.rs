pub mod container;
pub mod ports;
pub mod snapshot;

pub use container::*;
pub use ports::*;
pub use snapshot::*;
