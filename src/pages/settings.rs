//! Settings Page
//!
//! Application configuration and preferences.

use leptos::*;

use crate::api;
use crate::state::global::GlobalState;

/// Settings page component
#[component]
pub fn Settings() -> impl IntoView {
    view! {
        <div class="space-y-8">
            // Header
            <div>
                <h1 class="text-3xl font-bold">"Settings"</h1>
                <p class="text-gray-400 mt-1">"Configure your thermostat dashboard"</p>
            </div>

            <ApiSettings />
            <ChartSettings />
            <AboutSection />
        </div>
    }
}

/// API connection settings
#[component]
fn ApiSettings() -> impl IntoView {
    let (api_url, set_api_url) = create_signal(api::get_api_base());
    let (testing, set_testing) = create_signal(false);
    let (test_result, set_test_result) = create_signal(None::<bool>);
    let (saved, set_saved) = create_signal(false);

    let test_connection = move |_| {
        set_testing.set(true);
        set_test_result.set(None);

        api::set_api_base(&api_url.get());

        spawn_local(async move {
            set_test_result.set(Some(api::fetch_controller_state().await.is_ok()));
            set_testing.set(false);
        });
    };

    let save_url = move |_| {
        api::set_api_base(&api_url.get());
        set_saved.set(true);
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"API Connection"</h2>

            <div class="space-y-4">
                // API URL
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Controller API URL"</label>
                    <div class="flex space-x-2">
                        <input
                            type="text"
                            prop:value=move || api_url.get()
                            on:input=move |ev| {
                                set_api_url.set(event_target_value(&ev));
                                set_saved.set(false);
                            }
                            class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                        <button
                            on:click=test_connection
                            disabled=move || testing.get()
                            class="px-4 py-3 bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700
                                   rounded-lg font-medium transition-colors"
                        >
                            {move || if testing.get() { "Testing..." } else { "Test" }}
                        </button>
                        <button
                            on:click=save_url
                            class="px-4 py-3 bg-primary-600 hover:bg-primary-700
                                   rounded-lg font-medium transition-colors"
                        >
                            {move || if saved.get() { "Saved" } else { "Save" }}
                        </button>
                    </div>
                </div>

                // Connection status
                <div class="flex items-center space-x-2">
                    <span class="text-sm text-gray-400">"Status:"</span>
                    {move || {
                        match test_result.get() {
                            Some(true) => view! {
                                <span class="text-green-400">"✓ Connected"</span>
                            }.into_view(),
                            Some(false) => view! {
                                <span class="text-red-400">"✕ Failed"</span>
                            }.into_view(),
                            None => view! {
                                <span class="text-gray-400">"Not tested"</span>
                            }.into_view(),
                        }
                    }}
                </div>
            </div>
        </section>
    }
}

/// Chart preferences
#[component]
fn ChartSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let state_for_change = state.clone();

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Chart"</h2>

            <div>
                <label class="block text-sm text-gray-400 mb-2">"Default Window"</label>
                <select
                    on:change=move |ev| {
                        if let Ok(hours) = event_target_value(&ev).parse::<f64>() {
                            api::set_window_hours(hours);
                            state_for_change.window_hours.set(hours);
                        }
                    }
                    prop:value=move || state.window_hours.get().to_string()
                    class="bg-gray-700 rounded-lg px-4 py-3 w-full max-w-xs
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                >
                    <option value="3">"Last 3 hours"</option>
                    <option value="12">"Last 12 hours"</option>
                    <option value="24">"Last 24 hours"</option>
                    <option value="48">"Last 2 days"</option>
                </select>
            </div>
        </section>
    }
}

/// About section
#[component]
fn AboutSection() -> impl IntoView {
    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"About Therm"</h2>

            <div class="space-y-4 text-gray-300">
                <p>
                    "Therm is a dashboard for a home thermostat controller. "
                    "Watch the current temperature, adjust the set point, and "
                    "review how the heating has tracked its target."
                </p>

                <p class="text-sm text-gray-400">
                    "Version 0.1.0 • Built with Leptos"
                </p>
            </div>
        </section>
    }
}
