pub mod directions;
pub mod export;
pub mod metrics;
pub mod optimizer;
pub mod plan;

pub use directions::*;
pub use export::*;
pub use metrics::*;
pub use optimizer::*;
pub use plan::*;
