//! Todo Table Component
//!
//! The main list view: search-filtered rows with sortable columns, author
//! avatars, tag chips, colored status chips and per-row actions for the
//! signed-in author.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::DeleteButton;
use crate::context::AppContext;
use crate::controller::TodoListController;
use crate::models::{Status, TodoItem};
use crate::search::{sort_todos, SortKey, SortOrder};

fn status_class(status: Status) -> &'static str {
    match status {
        Status::Open => "status-tag geekblue",
        Status::Working => "status-tag purple",
        Status::Done => "status-tag green",
        Status::Overdue => "status-tag red",
    }
}

#[component]
pub fn TodoTable() -> impl IntoView {
    let controller =
        use_context::<TodoListController>().expect("TodoListController should be provided");
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (sort, set_sort) = signal(None::<(SortKey, SortOrder)>);

    let rows = {
        let controller = controller.clone();
        Memo::new(move |_| {
            ctx.version.get();
            let mut todos = controller.visible_todos();
            if let Some((key, order)) = sort.get() {
                sort_todos(&mut todos, key, order);
            }
            todos
        })
    };
    let current_uid = {
        let controller = controller.clone();
        Memo::new(move |_| {
            ctx.version.get();
            controller.current_user().map(|u| u.uid)
        })
    };

    // Clicking a header sorts ascending, clicking it again flips direction.
    let sort_by = move |key: SortKey| {
        set_sort.update(|current| {
            *current = match *current {
                Some((k, order)) if k == key => Some((key, order.toggled())),
                _ => Some((key, SortOrder::Ascend)),
            }
        });
    };
    let sort_marker = move |key: SortKey| match sort.get() {
        Some((k, SortOrder::Ascend)) if k == key => " ▲",
        Some((k, SortOrder::Descend)) if k == key => " ▼",
        _ => "",
    };

    let total = {
        let controller = controller.clone();
        Memo::new(move |_| {
            ctx.version.get();
            controller.todos().len()
        })
    };

    view! {
        <table class="todo-table">
            <thead>
                <tr>
                    <th class="sortable" on:click=move |_| sort_by(SortKey::TimeStamp)>
                        "Timestamp created" {move || sort_marker(SortKey::TimeStamp)}
                    </th>
                    <th>"Author"</th>
                    <th class="sortable" on:click=move |_| sort_by(SortKey::Title)>
                        "Task" {move || sort_marker(SortKey::Title)}
                    </th>
                    <th class="sortable" on:click=move |_| sort_by(SortKey::Description)>
                        "Description" {move || sort_marker(SortKey::Description)}
                    </th>
                    <th class="sortable" on:click=move |_| sort_by(SortKey::DueDate)>
                        "Due Date" {move || sort_marker(SortKey::DueDate)}
                    </th>
                    <th>"Tags"</th>
                    <th>"Status"</th>
                    <th>"Actions"</th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || rows.get()
                    key=|todo| todo.clone()
                    children=move |todo: TodoItem| {
                        let id = todo.id.clone();
                        let author = todo.author.clone();

                        let author_name = {
                            let controller = controller.clone();
                            let author = author.clone();
                            move || {
                                ctx.version.get();
                                controller.author_name(&author)
                            }
                        };
                        let author_photo = {
                            let controller = controller.clone();
                            let author = author.clone();
                            move || {
                                ctx.version.get();
                                controller.author_photo(&author)
                            }
                        };
                        let stage = {
                            let controller = controller.clone();
                            let id = id.clone();
                            Signal::derive(move || {
                                ctx.version.get();
                                controller.stage_of(&id)
                            })
                        };
                        let actions_class = {
                            let author = author.clone();
                            move || {
                                if current_uid.get().as_deref() == Some(author.as_str()) {
                                    "actions"
                                } else {
                                    "actions hidden"
                                }
                            }
                        };
                        let edit = {
                            let controller = controller.clone();
                            let id = id.clone();
                            move |_| {
                                if let Some(form) = controller.edit_form(&id) {
                                    ctx.open_edit(form);
                                }
                            }
                        };
                        let delete = Callback::new({
                            let controller = controller.clone();
                            let id = id.clone();
                            move |()| {
                                let controller = controller.clone();
                                let id = id.clone();
                                spawn_local(async move {
                                    // A failed delete silently re-arms; the
                                    // refresh repaints the button either way.
                                    let _ = controller.request_delete(&id).await;
                                    ctx.refresh();
                                });
                            }
                        });

                        let due_date = if todo.due_date.is_empty() {
                            "—".to_string()
                        } else {
                            todo.due_date.clone()
                        };

                        view! {
                            <tr>
                                <td>{todo.time_stamp.clone()}</td>
                                <td class="author-cell">
                                    <span class="avatar small" title=author_name>
                                        {move || match author_photo() {
                                            Some(url) => view! { <img class="avatar small" src=url alt="avatar" /> }
                                                .into_any(),
                                            None => view! { <span class="avatar placeholder">"👤"</span> }
                                                .into_any(),
                                        }}
                                    </span>
                                </td>
                                <td class="title-cell">{todo.title.clone()}</td>
                                <td>{todo.description.clone()}</td>
                                <td>{due_date}</td>
                                <td>
                                    {todo
                                        .tags
                                        .iter()
                                        .map(|tag| {
                                            view! { <span class="tag-chip">{tag.to_uppercase()}</span> }
                                        })
                                        .collect_view()}
                                </td>
                                <td>
                                    <span class=status_class(todo.status)>{todo.status.as_str()}</span>
                                </td>
                                <td class=actions_class>
                                    <button class="edit-btn" title="Edit" on:click=edit>
                                        "✎"
                                    </button>
                                    <DeleteButton stage=stage on_click=delete />
                                </td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
        <p class="item-count">
            {move || format!("{} of {} todos", rows.get().len(), total.get())}
        </p>
    }
}
