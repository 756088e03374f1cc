//! Header Bar Component
//!
//! Search box, create button, the bulk-delete controls and the sign-in
//! avatar. The search commits on Enter and resets live when emptied.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::context::AppContext;
use crate::controller::TodoListController;

#[component]
pub fn HeaderBar() -> impl IntoView {
    let controller =
        use_context::<TodoListController>().expect("TodoListController should be provided");
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (entry, set_entry) = signal(controller.search());

    let has_selection = {
        let controller = controller.clone();
        Memo::new(move |_| {
            ctx.version.get();
            controller.has_selection()
        })
    };
    let deleting_many = {
        let controller = controller.clone();
        Memo::new(move |_| {
            ctx.version.get();
            controller.deleting_many()
        })
    };
    let current_user = {
        let controller = controller.clone();
        Memo::new(move |_| {
            ctx.version.get();
            controller.current_user()
        })
    };

    let search_input = {
        let controller = controller.clone();
        move |ev: web_sys::Event| {
            let target = ev.target().unwrap();
            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
            let value = input.value();
            if value.is_empty() {
                controller.set_search(String::new());
                ctx.refresh();
            }
            set_entry.set(value);
        }
    };
    let search_commit = {
        let controller = controller.clone();
        move |ev: web_sys::KeyboardEvent| {
            if ev.key() == "Enter" {
                controller.set_search(entry.get());
                ctx.refresh();
            }
        }
    };

    let delete_selected = {
        let controller = controller.clone();
        move |_| {
            if deleting_many.get() {
                return;
            }
            let controller = controller.clone();
            spawn_local(async move {
                let outcome = controller.request_delete_many().await;
                if !outcome.is_clean() {
                    log::error!("bulk delete left {} todos behind", outcome.failed.len());
                }
                ctx.refresh();
            });
            ctx.refresh();
        }
    };
    let deselect = {
        let controller = controller.clone();
        move |_| {
            controller.deselect_all();
            ctx.refresh();
        }
    };
    let sign_in = {
        let controller = controller.clone();
        move |_| {
            let controller = controller.clone();
            spawn_local(async move {
                // A failed popup leaves the identity unset; creating stays
                // unavailable until the user retries.
                let _ = controller.authenticate().await;
                ctx.refresh();
            });
        }
    };

    let selection_class = move |base: &str| {
        if has_selection.get() {
            base.to_string()
        } else {
            format!("{base} hidden")
        }
    };

    view! {
        <header class="header-bar">
            <input
                class="search-input"
                type="text"
                placeholder="input search text"
                prop:value=move || entry.get()
                on:input=search_input
                on:keydown=search_commit
            />
            <div class="header-actions">
                <button class="create-btn" on:click=move |_| ctx.open_create()>
                    "+ Create"
                </button>
                <button
                    class=move || selection_class("delete-many-btn danger")
                    disabled=move || deleting_many.get()
                    on:click=delete_selected
                >
                    {move || if deleting_many.get() { "Deleting…" } else { "Delete selected" }}
                </button>
                <button
                    class=move || selection_class("deselect-btn")
                    disabled=move || deleting_many.get()
                    on:click=deselect
                >
                    "Cancel selection"
                </button>
                <button
                    class="avatar-btn"
                    title=move || {
                        current_user
                            .get()
                            .map(|u| u.display_name)
                            .unwrap_or_else(|| "Sign in".to_string())
                    }
                    on:click=sign_in
                >
                    {move || match current_user.get() {
                        Some(user) => match user.photo_url {
                            Some(url) => {
                                view! { <img class="avatar" src=url alt="avatar" /> }.into_any()
                            }
                            None => {
                                let initial =
                                    user.display_name.chars().next().map(String::from).unwrap_or_default();
                                view! { <span class="avatar initial">{initial}</span> }.into_any()
                            }
                        },
                        None => view! { <span class="avatar placeholder">"👤"</span> }.into_any(),
                    }}
                </button>
            </div>
        </header>
    }
}
