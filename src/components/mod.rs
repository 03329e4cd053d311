//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod loading;
pub mod nav;
pub mod query_card;
pub mod stat_card;
pub mod toast;
pub mod trend_chart;

pub use loading::{InlineLoading, Loading};
pub use nav::Nav;
pub use query_card::QueryCard;
pub use stat_card::StatCard;
pub use toast::Toast;
pub use trend_chart::TrendChart;
