pub mod containers;
pub mod geo;
pub mod logger;
pub mod navigation;
pub mod priority;
pub mod routing;

pub use containers::*;
pub use geo::*;
pub use logger::*;
pub use navigation::*;
pub use priority::*;
pub use routing::*;
