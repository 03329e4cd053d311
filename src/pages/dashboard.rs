//! Dashboard Page
//!
//! The admin analytics view: quick-stat cards, the registration trend chart,
//! and the user query inbox.

use leptos::*;

use crate::api::StoreClient;
use crate::components::{InlineLoading, Loading, QueryCard, StatCard, TrendChart};
use crate::state::dashboard::DashboardState;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let store = use_context::<StoreClient>().expect("StoreClient not found");

    // Initial load on mount. The three reads are independent, so they run
    // concurrently and join; the page gate below waits on stats only.
    let store_for_effect = store.clone();
    create_effect(move |_| {
        let store = store_for_effect.clone();
        spawn_local(async move {
            futures::join!(
                state.load_stats(&store),
                state.load_trend(&store),
                state.load_queries(&store),
            );
        });
    });

    view! {
        {move || {
            if !state.stats_settled.get() {
                view! {
                    <div class="py-16 text-gray-300">
                        <Loading />
                        <p class="text-center">"Loading analytics…"</p>
                    </div>
                }.into_view()
            } else {
                view! {
                    <div class="space-y-8">
                        <h1 class="text-3xl font-bold">"Admin Analytics"</h1>

                        <StatsSection />
                        <TrendSection />
                        <QueriesSection />
                    </div>
                }.into_view()
            }
        }}
    }
}

/// Quick-stats card grid
#[component]
fn StatsSection() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");

    view! {
        <section>
            <SectionError error=state.stats_error />

            {move || {
                let stats = state.stats.get().unwrap_or_default();
                view! {
                    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-6">
                        <StatCard title="Total Mentees" value=stats.total_mentees />
                        <StatCard title="Registered Mentees" value=stats.mentees_registered />
                        <StatCard title="Total Mentors" value=stats.total_mentors />
                        <StatCard title="Selected Mentors" value=stats.mentors_selected />
                        <StatCard title="Projects" value=stats.total_projects />
                        <StatCard title="Total PRs" value=stats.total_prs />
                        <StatCard title="Approved Referrals" value=stats.referrals_approved />
                        <StatCard title="Open Queries" value=stats.open_queries />
                    </div>
                }
            }}
        </section>
    }
}

/// Registration trend section
#[component]
fn TrendSection() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");

    view! {
        <section class="bg-gray-800 rounded-xl p-6 shadow-md">
            <h2 class="text-xl font-semibold mb-4">"Daily Mentee Registration Trend"</h2>

            <SectionError error=state.trend_error />

            <TrendChart />
        </section>
    }
}

/// User query inbox with manual refresh
#[component]
fn QueriesSection() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let store = use_context::<StoreClient>().expect("StoreClient not found");

    let on_refresh = move |_| {
        let store = store.clone();
        spawn_local(async move {
            state.load_queries(&store).await;
        });
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6 shadow-md">
            <div class="flex items-center justify-between mb-4">
                <h2 class="text-xl font-semibold">"User Queries"</h2>
                <button
                    on:click=on_refresh
                    class="px-3 py-1 text-sm rounded-lg bg-gray-700 hover:bg-gray-600 text-white"
                >
                    "Refresh"
                </button>
            </div>

            <SectionError error=state.queries_error />

            {move || {
                if state.loading_queries.get() {
                    view! {
                        <p class="text-sm text-gray-400">
                            <InlineLoading />
                            " Loading queries…"
                        </p>
                    }.into_view()
                } else {
                    view! {}.into_view()
                }
            }}

            <div class="space-y-4 max-h-[520px] overflow-y-auto pr-2">
                {move || {
                    let queries = state.queries.get();

                    if queries.is_empty() && !state.loading_queries.get() {
                        view! {
                            <p class="text-sm text-gray-400">"No queries found."</p>
                        }.into_view()
                    } else {
                        queries
                            .into_iter()
                            .map(|query| view! { <QueryCard query=query /> })
                            .collect_view()
                    }
                }}
            </div>
        </section>
    }
}

/// Inline error line for a section whose last fetch failed. Stale data stays
/// on screen underneath it.
#[component]
fn SectionError(error: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        {move || {
            error.get().map(|msg| view! {
                <p class="text-sm text-red-400 mb-4">{msg}</p>
            })
        }}
    }
}
