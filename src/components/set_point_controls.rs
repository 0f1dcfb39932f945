//! Set-Point Controls
//!
//! The decrement, disable, and increment buttons plus the absolute
//! set-point form. Each control is bound once and fires its operation
//! without waiting on the outcome.

use leptos::*;

use crate::state::global::GlobalState;
use crate::state::sync;

/// Set-point control panel
#[component]
pub fn SetPointControls() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (value, set_value) = create_signal(72.0);

    let state_down = state.clone();
    let state_off = state.clone();
    let state_up = state.clone();
    let state_set = state;

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        sync::set_set_point(state_set.clone(), value.get());
    };

    view! {
        <div class="space-y-4">
            // Step controls
            <div class="grid grid-cols-3 gap-2">
                <ControlButton
                    label="−"
                    title="Lower set point"
                    on_click=move |_| sync::decrease_set_point(state_down.clone())
                />
                <ControlButton
                    label="Off"
                    title="Disable set point"
                    on_click=move |_| sync::disable_set_point(state_off.clone())
                />
                <ControlButton
                    label="+"
                    title="Raise set point"
                    on_click=move |_| sync::increase_set_point(state_up.clone())
                />
            </div>

            // Absolute set point
            <form on:submit=on_submit class="flex space-x-2">
                <input
                    type="number"
                    min="50"
                    max="90"
                    step="0.5"
                    prop:value=move || value.get().to_string()
                    on:input=move |ev| {
                        if let Ok(v) = event_target_value(&ev).parse() {
                            set_value.set(v);
                        }
                    }
                    class="flex-1 bg-gray-700 rounded-lg px-4 py-3 text-white
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
                <button
                    type="submit"
                    class="px-6 py-3 bg-primary-600 hover:bg-primary-700
                           rounded-lg font-semibold transition-colors"
                >
                    "Set"
                </button>
            </form>
        </div>
    }
}

#[component]
fn ControlButton(
    label: &'static str,
    title: &'static str,
    on_click: impl Fn(web_sys::MouseEvent) + 'static,
) -> impl IntoView {
    view! {
        <button
            type="button"
            title=title
            on:click=on_click
            class="py-3 bg-gray-700 hover:bg-gray-600 rounded-lg
                   text-xl font-semibold transition-colors"
        >
            {label}
        </button>
    }
}
