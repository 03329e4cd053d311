//! State Management
//!
//! Reactive dashboard state and the view-state controller.

pub mod dashboard;

pub use dashboard::{provide_dashboard_state, DashboardState, QuickStats, TrendPoint, UserQuery};
