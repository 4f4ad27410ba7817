pub mod navigation_service;
pub mod route_planning_service;

pub use navigation_service::*;
pub use route_planning_service::*;
