//! Dashboard Page
//!
//! Main view: live status cards, set-point controls, and the history chart.

use leptos::*;

use crate::components::{HeatStatusCard, HistoryChart, Loading, SetPointControls, StatusCard};
use crate::state::global::GlobalState;
use crate::state::sync;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Fetch initial data on mount
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        sync::refresh_controller_state(state.clone());
        sync::refresh_temperature(state.clone());
        sync::refresh_history(state.clone(), state.window_hours.get_untracked());
    });

    let temp_text = {
        let state = state.clone();
        create_memo(move |_| state.display.get().temperature)
    };
    let set_point_text = {
        let state = state.clone();
        create_memo(move |_| state.display.get().set_point)
    };

    let state_for_window = state.clone();
    let state_for_loading = state;

    view! {
        <div class="space-y-8">
            // Page header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Dashboard"</h1>
                    <p class="text-gray-400 mt-1">"Your thermostat at a glance"</p>
                </div>

                <div class="text-sm text-gray-400">
                    {move || format!("Last {} hours", state_for_window.window_hours.get())}
                </div>
            </div>

            // Live status
            <section>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    <StatusCard label="Temperature" value=temp_text unit="°F" />
                    <StatusCard label="Set point" value=set_point_text unit="°F" />
                    <HeatStatusCard />
                </div>
            </section>

            // History chart
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"History"</h2>

                {move || {
                    let state = state_for_loading.clone();
                    if state.loading.get() && state.history.get().is_none() {
                        view! { <Loading /> }.into_view()
                    } else {
                        view! { <HistoryChart /> }.into_view()
                    }
                }}
            </section>

            // Set-point controls
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Set Point"</h2>
                <SetPointControls />
            </section>
        </div>
    }
}
