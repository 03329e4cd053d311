//! MentorDash
//!
//! Admin analytics dashboard for a mentorship program, built with Leptos
//! (WASM).
//!
//! # Features
//!
//! - Quick-stats cards (mentees, mentors, projects, PRs, referrals, queries)
//! - Daily mentee registration trend chart
//! - User query inbox with a "mark cleared" action
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks directly to a PostgREST-style table store over HTTP;
//! all aggregates are precomputed server-side, so the client is presentation
//! and fetch orchestration only.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
