//! Query Card Component
//!
//! One user-submitted support query: sender, subject, message, timestamp,
//! and the one-way "Mark Cleared" action. Cleared cards show a static label
//! instead of the button, mirroring the one-way data transition.

use leptos::*;

use crate::api::StoreClient;
use crate::state::dashboard::{DashboardState, UserQuery};

/// Query card component
#[component]
pub fn QueryCard(query: UserQuery) -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let store = use_context::<StoreClient>().expect("StoreClient not found");

    let UserQuery {
        id,
        email,
        subject,
        message,
        createdat,
        iscleared,
    } = query;

    let on_clear = move |_| {
        let store = store.clone();
        let id = id.clone();
        spawn_local(async move {
            state.mark_cleared(&store, &id).await;
        });
    };

    view! {
        <div class="p-4 rounded-xl bg-gray-800 border border-gray-700">
            <div class="flex justify-between gap-4">
                <div class="space-y-2">
                    <div>
                        <p class="text-sm text-gray-400">{email}</p>
                        <p class="font-semibold text-white">{subject}</p>
                    </div>

                    <p class="text-sm text-gray-300 whitespace-pre-wrap">{message}</p>

                    <p class="text-xs text-gray-500">{format_created_at(&createdat)}</p>
                </div>

                <div class="flex items-start">
                    {if iscleared {
                        view! {
                            <span class="text-green-400 text-sm font-semibold">"Cleared"</span>
                        }.into_view()
                    } else {
                        view! {
                            <button
                                on:click=on_clear
                                class="px-3 py-1 text-sm rounded-lg bg-green-600 hover:bg-green-700 text-white"
                            >
                                "Mark Cleared"
                            </button>
                        }.into_view()
                    }}
                </div>
            </div>
        </div>
    }
}

/// Render a store timestamp in local time; unparseable values pass through
/// unchanged rather than hiding the card.
fn format_created_at(raw: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&chrono::Local).format("%b %d, %Y %H:%M").to_string();
    }
    // timestamps without a zone come back bare from some store columns
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format("%b %d, %Y %H:%M").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_created_at_parses_rfc3339() {
        let formatted = format_created_at("2024-05-01T12:34:56+00:00");
        assert!(formatted.contains("2024"));
        assert!(formatted.contains("May"));
    }

    #[test]
    fn test_format_created_at_parses_bare_timestamps() {
        assert_eq!(
            format_created_at("2024-05-01T12:34:56"),
            "May 01, 2024 12:34"
        );
    }

    #[test]
    fn test_format_created_at_passes_through_garbage() {
        assert_eq!(format_created_at("yesterday-ish"), "yesterday-ish");
    }
}
