//! Store API
//!
//! HTTP client for the PostgREST-style table store.

pub mod client;

pub use client::{
    clear_user_query, fetch_quick_stats, fetch_registration_trend, fetch_user_queries, StoreClient,
};
