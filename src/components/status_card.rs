//! Status Card Components
//!
//! Cards for the three live displays: temperature, set point, and
//! heating state.

use leptos::*;

use crate::state::global::GlobalState;

/// Card showing one of the live text displays
#[component]
pub fn StatusCard(
    /// Card label
    label: &'static str,
    /// The display text to show
    #[prop(into)]
    value: Signal<String>,
    /// Optional unit label
    #[prop(optional)]
    unit: Option<&'static str>,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700">
            <div class="flex items-center justify-between">
                <span class="text-gray-400 text-sm">{label}</span>
                {unit.map(|u| view! {
                    <span class="text-gray-500 text-xs">{u}</span>
                })}
            </div>

            <div class="text-3xl font-bold mt-2">
                {move || value.get()}
            </div>
        </div>
    }
}

/// Card showing the heating relay state with a color accent
#[component]
pub fn HeatStatusCard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let heat_text = {
        let state = state.clone();
        create_memo(move |_| state.display.get().heat)
    };
    let heat_on = create_memo(move |_| {
        state
            .controller
            .get()
            .map(|c| c.heat_on)
            .unwrap_or(false)
    });

    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700">
            <div class="flex items-center justify-between">
                <span class="text-gray-400 text-sm">"Heat"</span>
                <span
                    class=move || {
                        if heat_on.get() {
                            "w-2 h-2 bg-red-400 rounded-full"
                        } else {
                            "w-2 h-2 bg-gray-600 rounded-full"
                        }
                    }
                />
            </div>

            <div
                class=move || {
                    if heat_on.get() {
                        "text-3xl font-bold mt-2 text-red-400"
                    } else {
                        "text-3xl font-bold mt-2"
                    }
                }
            >
                {move || heat_text.get()}
            </div>
        </div>
    }
}
