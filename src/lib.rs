//! Fill-level driven collection routes for waste containers, and live GPS
//! navigation along them.

pub mod adapters;
pub mod application;
pub mod common;
pub mod config;
pub mod domains;

pub use application::{NavigationOutput, NavigationService, RoutePlanningService};
pub use common::*;
pub use crate::config::Config;
pub use domains::*;
