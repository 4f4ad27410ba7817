pub mod actors;
pub mod events;
pub mod ports;
pub mod projections;
pub mod session;
pub mod types;

pub use actors::*;
pub use events::*;
pub use ports::*;
pub use projections::*;
pub use session::*;
pub use types::*;
