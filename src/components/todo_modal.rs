//! Todo Modal Component
//!
//! The create/edit dialog. The dialog owns validation of title and
//! description; the controller receives only already-valid field values.
//! A failed submit keeps the dialog open with its input retained.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::context::{AppContext, ModalRequest};
use crate::controller::TodoListController;
use crate::form::{validate_description, validate_title, FormMode, TodoForm};

#[component]
pub fn TodoModal() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    // Re-created on every open so the field signals pick up the prefill.
    view! {
        {move || {
            ctx.modal
                .get()
                .map(|request| view! { <ModalForm request=request /> })
        }}
    }
}

#[component]
fn ModalForm(request: ModalRequest) -> impl IntoView {
    let controller =
        use_context::<TodoListController>().expect("TodoListController should be provided");
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let mode = request.mode;
    let hidden_id = request.form.id.clone();
    // First half of the date range; fixed by the dialog, today for create
    // and the original creation date for edit.
    let time_stamp = request.form.time_stamp.clone();

    let (title, set_title) = signal(request.form.title.clone());
    let (description, set_description) = signal(request.form.description.clone());
    let (status, set_status) = signal(request.form.status);
    let (tags_input, set_tags_input) = signal(request.form.tags_input.clone());
    let (due_date, set_due_date) = signal(request.form.due_date.clone());
    let (saving, set_saving) = signal(false);
    let (touched, set_touched) = signal(false);
    let (submit_error, set_submit_error) = signal(None::<String>);

    let title_error = move || validate_title(&title.get());
    let description_error = move || validate_description(&description.get());

    let tag_suggestions = controller.known_tags();

    let on_submit = {
        let controller = controller.clone();
        let hidden_id = hidden_id.clone();
        let time_stamp = time_stamp.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            set_touched.set(true);
            if title_error().is_some() || description_error().is_some() || saving.get() {
                return;
            }
            let form = TodoForm {
                id: hidden_id.clone(),
                title: title.get(),
                description: description.get(),
                status: status.get(),
                tags_input: tags_input.get(),
                time_stamp: time_stamp.clone(),
                due_date: due_date.get(),
            };
            set_saving.set(true);
            set_submit_error.set(None);
            let controller = controller.clone();
            spawn_local(async move {
                match controller.submit(mode, &form).await {
                    Ok(()) => {
                        ctx.refresh();
                        ctx.close_modal();
                    }
                    Err(err) => set_submit_error.set(Some(err.to_string())),
                }
                set_saving.set(false);
            });
        }
    };

    let text_value = |ev: web_sys::Event| {
        let target = ev.target().unwrap();
        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
        input.value()
    };

    view! {
        <div class="modal-backdrop">
            <div class="modal">
                <div class="modal-header">
                    <h2>
                        {match mode {
                            FormMode::Create => "Create new todo",
                            FormMode::Update => "Edit todo",
                        }}
                    </h2>
                    <button class="modal-close" type="button" on:click=move |_| ctx.close_modal()>
                        "×"
                    </button>
                </div>
                <form class="todo-form" on:submit=on_submit>
                    <label>
                        "Title"
                        <input
                            type="text"
                            prop:value=move || title.get()
                            prop:disabled=move || saving.get()
                            on:input=move |ev| set_title.set(text_value(ev))
                        />
                        <span class="field-error">
                            {move || touched.get().then(|| title_error()).flatten()}
                        </span>
                    </label>

                    <label>
                        "Description"
                        <input
                            type="text"
                            prop:value=move || description.get()
                            prop:disabled=move || saving.get()
                            on:input=move |ev| set_description.set(text_value(ev))
                        />
                        <span class="field-error">
                            {move || touched.get().then(|| description_error()).flatten()}
                        </span>
                    </label>

                    <label>
                        "Created"
                        <input type="date" prop:value=time_stamp.clone() disabled=true />
                    </label>

                    <label>
                        "Due Date"
                        <input
                            type="date"
                            prop:value=move || due_date.get()
                            prop:disabled=move || saving.get()
                            on:input=move |ev| set_due_date.set(text_value(ev))
                        />
                    </label>

                    <label>
                        "Tags"
                        <input
                            type="text"
                            placeholder="input # to mention tag"
                            list="tag-suggestions"
                            prop:value=move || tags_input.get()
                            prop:disabled=move || saving.get()
                            on:input=move |ev| set_tags_input.set(text_value(ev))
                        />
                        <datalist id="tag-suggestions">
                            {tag_suggestions
                                .iter()
                                .map(|tag| {
                                    let value = format!("#{tag}");
                                    view! { <option value=value>{tag.clone()}</option> }
                                })
                                .collect_view()}
                        </datalist>
                    </label>

                    <div class="status-row">
                        {mode
                            .status_choices()
                            .iter()
                            .map(|&choice| {
                                let is_selected = move || status.get() == choice;
                                view! {
                                    <button
                                        type="button"
                                        class=move || {
                                            if is_selected() { "status-btn active" } else { "status-btn" }
                                        }
                                        prop:disabled=move || saving.get()
                                        on:click=move |_| set_status.set(choice)
                                    >
                                        {choice.as_str()}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>

                    <span class="submit-error">{move || submit_error.get()}</span>

                    <div class="modal-actions">
                        <button type="button" class="cancel-btn" on:click=move |_| ctx.close_modal()>
                            "Cancel"
                        </button>
                        <button
                            type="submit"
                            class=move || if saving.get() { "submit-btn loading" } else { "submit-btn" }
                            prop:disabled=move || saving.get()
                        >
                            {mode.submit_label()}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
