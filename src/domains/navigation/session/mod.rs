pub mod event_apply;
pub mod proximity;
pub mod session;

pub use event_apply::*;
pub use proximity::*;
pub use session::*;
