//! Delete Button Component
//!
//! Per-row delete control driven by the todo's deletion stage: neutral when
//! unselected, danger once armed, loading and disabled while the delete
//! request is in flight.

use leptos::prelude::*;

use crate::selection::DeleteStage;

#[component]
pub fn DeleteButton(
    #[prop(into)] stage: Signal<DeleteStage>,
    #[prop(into)] on_click: Callback<()>,
) -> impl IntoView {
    let button_class = move || match stage.get() {
        DeleteStage::Unselected => "delete-btn",
        DeleteStage::Armed => "delete-btn danger",
        DeleteStage::Confirmed => "delete-btn loading",
    };
    let tooltip = move || match stage.get() {
        DeleteStage::Unselected => "Delete",
        DeleteStage::Armed => "Click again to confirm",
        DeleteStage::Confirmed => "Deleting...",
    };

    view! {
        <button
            class=button_class
            title=tooltip
            // Disabled while in flight: the second click already happened.
            disabled=move || stage.get() == DeleteStage::Confirmed
            on:click=move |ev| {
                ev.stop_propagation();
                on_click.run(());
            }
        >
            {move || if stage.get() == DeleteStage::Confirmed { "…" } else { "×" }}
        </button>
    }
}
