//! Toast Notification Component
//!
//! Shows action failures (e.g. a mark-cleared update that did not apply).

use leptos::*;

use crate::state::dashboard::DashboardState;

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");

    view! {
        <div class="fixed bottom-4 right-4 z-50 space-y-2">
            {move || {
                state.error.get().map(|msg| view! {
                    <div class="flex items-center space-x-3 bg-red-600 text-white px-4 py-3 \
                         rounded-lg shadow-lg">
                        <span class="text-lg">"✕"</span>
                        <span class="text-sm font-medium">{msg}</span>
                        <button
                            class="text-sm text-red-200 hover:text-white"
                            on:click=move |_| state.clear_error()
                        >
                            "Dismiss"
                        </button>
                    </div>
                })
            }}
        </div>
    }
}
