pub mod event_store;
pub mod replay_location;
pub mod simulated_track;

pub use event_store::*;
pub use replay_location::*;
pub use simulated_track::*;
