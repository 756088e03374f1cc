//! Application Context
//!
//! Shared UI signals provided via the Leptos Context API. The controller
//! itself is provided separately; this context carries the render trigger
//! that components key their snapshots on, plus the dialog state.

use leptos::prelude::*;

use crate::form::{FormMode, TodoForm};

/// What the todo dialog is currently doing.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalRequest {
    pub mode: FormMode,
    pub form: TodoForm,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Bumped after every completed controller operation - read
    pub version: ReadSignal<u32>,
    /// Bumped after every completed controller operation - write
    set_version: WriteSignal<u32>,
    /// Dialog state, `None` while closed
    pub modal: RwSignal<Option<ModalRequest>>,
}

impl AppContext {
    pub fn new(
        version: (ReadSignal<u32>, WriteSignal<u32>),
        modal: RwSignal<Option<ModalRequest>>,
    ) -> Self {
        Self {
            version: version.0,
            set_version: version.1,
            modal,
        }
    }

    /// Re-render everything that reads controller snapshots.
    pub fn refresh(&self) {
        self.set_version.update(|v| *v += 1);
    }

    pub fn open_create(&self) {
        self.modal.set(Some(ModalRequest {
            mode: FormMode::Create,
            form: TodoForm::for_create(),
        }));
    }

    pub fn open_edit(&self, form: TodoForm) {
        self.modal.set(Some(ModalRequest {
            mode: FormMode::Update,
            form,
        }));
    }

    pub fn close_modal(&self) {
        self.modal.set(None);
    }
}
