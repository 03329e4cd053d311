//! Stat Card Component
//!
//! Displays a single precomputed aggregate with its label.

use leptos::*;

/// Stat card component
#[component]
pub fn StatCard(
    /// Label shown above the value
    #[prop(into)]
    title: String,
    /// The aggregate value (already computed by the store)
    value: u64,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl p-6 shadow-md border border-gray-700">
            <p class="text-sm text-gray-400">{title}</p>
            <p class="text-3xl font-bold mt-2 text-white">{value.to_string()}</p>
        </div>
    }
}
