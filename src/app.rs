//! Ant-Todo App
//!
//! Root component: builds the controller over the Firebase gateway,
//! provides it via context and triggers the startup load.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{HeaderBar, TodoModal, TodoTable};
use crate::context::AppContext;
use crate::controller::TodoListController;
use crate::gateway::{FirebaseGateway, FirebaseIdentity};

#[component]
pub fn App() -> impl IntoView {
    let controller = TodoListController::new(
        Rc::new(FirebaseGateway::new()),
        Rc::new(FirebaseIdentity::new()),
    );
    provide_context(controller.clone());

    let (version, set_version) = signal(0u32);
    let modal = RwSignal::new(None);
    let ctx = AppContext::new((version, set_version), modal);
    provide_context(ctx);

    // Restore the session and pull both collections once on mount.
    Effect::new(move |_| {
        let controller = controller.clone();
        spawn_local(async move {
            controller.restore_session().await;
            if let Err(err) = controller.load().await {
                log::error!("initial load failed: {err}");
            }
            ctx.refresh();
        });
    });

    view! {
        <div class="app-layout">
            <HeaderBar />
            <main class="main-content">
                <TodoTable />
            </main>
            <TodoModal />
        </div>
    }
}
