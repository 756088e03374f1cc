//! Todo List Controller
//!
//! Owns the in-memory collections and drives every store interaction. The
//! controller is handed its collaborators at construction and keeps all
//! shared state behind one `RefCell`; borrows are never held across an
//! await, so gateway completion handlers read-modify-write atomically with
//! respect to each other on the single-threaded event loop.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::future::join_all;
use log::{error, info, warn};
use send_wrapper::SendWrapper;
use serde_json::Value;

use crate::error::{AppError, AppResult, GatewayError};
use crate::form::{FormMode, TodoDraft, TodoForm};
use crate::gateway::{Document, IdentityProvider, StoreGateway, TODO_COLLECTION, USERS_COLLECTION};
use crate::models::{TodoItem, UserIdentity, UserProfile};
use crate::search;
use crate::selection::{DeleteStage, Selection};

/// Result of one bulk delete: which ids were removed and which failed and
/// went back to Armed for retry.
#[derive(Debug, Default)]
pub struct BulkDeleteOutcome {
    pub deleted: Vec<String>,
    pub failed: Vec<(String, GatewayError)>,
}

impl BulkDeleteOutcome {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Default)]
struct AppData {
    todos: Vec<TodoItem>,
    users: HashMap<String, UserProfile>,
    search: String,
    selection: Selection,
    deleting_many: bool,
    current_user: Option<UserIdentity>,
}

/// The application controller. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct TodoListController {
    // `SendWrapper` satisfies the `Send + Sync` bounds Leptos puts on
    // context values and memo closures; the app is single-threaded CSR, so
    // the wrapper's same-thread requirement always holds.
    state: SendWrapper<Rc<RefCell<AppData>>>,
    gateway: SendWrapper<Rc<dyn StoreGateway>>,
    identity: SendWrapper<Rc<dyn IdentityProvider>>,
}

impl TodoListController {
    pub fn new(gateway: Rc<dyn StoreGateway>, identity: Rc<dyn IdentityProvider>) -> Self {
        Self {
            state: SendWrapper::new(Rc::new(RefCell::new(AppData::default()))),
            gateway: SendWrapper::new(gateway),
            identity: SendWrapper::new(identity),
        }
    }

    // ========================
    // Snapshots for the view
    // ========================

    pub fn todos(&self) -> Vec<TodoItem> {
        self.state.borrow().todos.clone()
    }

    /// The search-filtered subsequence of the collection, order preserved.
    pub fn visible_todos(&self) -> Vec<TodoItem> {
        let data = self.state.borrow();
        search::visible_todos(&data.todos, &data.search, &data.users)
    }

    pub fn search(&self) -> String {
        self.state.borrow().search.clone()
    }

    pub fn set_search(&self, text: String) {
        self.state.borrow_mut().search = text;
    }

    pub fn stage_of(&self, id: &str) -> DeleteStage {
        self.state.borrow().selection.stage_of(id)
    }

    pub fn has_selection(&self) -> bool {
        !self.state.borrow().selection.is_empty()
    }

    pub fn deleting_many(&self) -> bool {
        self.state.borrow().deleting_many
    }

    pub fn current_user(&self) -> Option<UserIdentity> {
        self.state.borrow().current_user.clone()
    }

    pub fn author_name(&self, uid: &str) -> String {
        search::author_name(&self.state.borrow().users, uid).to_string()
    }

    pub fn author_photo(&self, uid: &str) -> Option<String> {
        self.state
            .borrow()
            .users
            .get(uid)
            .and_then(|u| u.photo_url.clone())
    }

    /// Tags already in use, for the dialog's suggestion list.
    pub fn known_tags(&self) -> Vec<String> {
        search::unique_tags(&self.state.borrow().todos)
    }

    /// Prefilled edit form for a todo, `None` when the id is gone.
    pub fn edit_form(&self, id: &str) -> Option<TodoForm> {
        let data = self.state.borrow();
        data.todos
            .iter()
            .find(|t| t.id == id)
            .map(TodoForm::from_item)
    }

    // ========================
    // Startup
    // ========================

    /// Restore an already-active session, if the provider has one. Never
    /// opens a popup and never touches the profile collection.
    pub async fn restore_session(&self) {
        if let Some(user) = self.identity.current_user().await {
            info!("restored session for {}", user.uid);
            self.state.borrow_mut().current_user = Some(user);
        }
    }

    /// Bulk fetch of both collections. Malformed documents are skipped with
    /// a warning instead of failing the whole load.
    pub async fn load(&self) -> AppResult<()> {
        let todo_docs = self.gateway.list_all(TODO_COLLECTION).await?;
        let user_docs = self.gateway.list_all(USERS_COLLECTION).await?;

        let mut todos = Vec::with_capacity(todo_docs.len());
        for doc in todo_docs {
            match todo_from_document(doc) {
                Ok(todo) => todos.push(todo),
                Err((id, err)) => warn!("skipping malformed todo {id}: {err}"),
            }
        }

        let mut users = HashMap::with_capacity(user_docs.len());
        for doc in user_docs {
            match serde_json::from_value::<UserProfile>(doc.fields) {
                Ok(profile) => {
                    users.insert(doc.id, profile);
                }
                Err(err) => warn!("skipping malformed profile {}: {err}", doc.id),
            }
        }

        info!("loaded {} todos, {} profiles", todos.len(), users.len());
        let mut data = self.state.borrow_mut();
        data.todos = todos;
        data.users = users;
        Ok(())
    }

    // ========================
    // Authentication
    // ========================

    /// Popup sign-in. On success the identity is set and the user's profile
    /// is upserted into the users collection and the local map.
    pub async fn authenticate(&self) -> AppResult<UserIdentity> {
        let user = match self.identity.authenticate().await {
            Ok(user) => user,
            Err(cause) => {
                error!("authentication failed: {cause}");
                return Err(AppError::Auth(cause));
            }
        };
        info!("signed in as {}", user.uid);
        self.state.borrow_mut().current_user = Some(user.clone());

        let profile = user.profile();
        let fields = to_fields(&profile)?;
        self.gateway
            .update(USERS_COLLECTION, &user.uid, &fields)
            .await?;
        self.state
            .borrow_mut()
            .users
            .insert(user.uid.clone(), profile);
        Ok(user)
    }

    // ========================
    // Deletion
    // ========================

    /// Two-phase single delete. The first call for an id only arms it and
    /// returns `Ok(false)`; the second confirms, issues the store delete and
    /// returns `Ok(true)` once the item is gone. A failed delete re-arms the
    /// entry so the user can retry. Calls while the delete is in flight are
    /// no-ops (the control is disabled, this is just the backstop).
    pub async fn request_delete(&self, id: &str) -> AppResult<bool> {
        {
            let mut data = self.state.borrow_mut();
            match data.selection.stage_of(id) {
                DeleteStage::Unselected => {
                    // Selection must never precede the item.
                    if !data.todos.iter().any(|t| t.id == id) {
                        return Err(AppError::UnknownTodo(id.to_string()));
                    }
                    data.selection.arm(id);
                    return Ok(false);
                }
                DeleteStage::Confirmed => return Ok(false),
                DeleteStage::Armed => {
                    data.selection.confirm(id);
                }
            }
        }

        match self.gateway.delete(TODO_COLLECTION, id).await {
            Ok(()) => {
                let mut data = self.state.borrow_mut();
                data.selection.remove(id);
                data.todos.retain(|t| t.id != id);
                Ok(true)
            }
            Err(err) => {
                error!("delete of todo {id} failed: {err}");
                self.state.borrow_mut().selection.rearm(id);
                Err(err.into())
            }
        }
    }

    /// Bulk delete of every Armed entry. Entries already Confirmed are in
    /// flight from an earlier request and excluded. All targets flip to
    /// Confirmed before any network activity starts, then the deletes run
    /// concurrently and are joined; at the join point succeeded ids leave
    /// the collection and selection in one update while failed ids go back
    /// to Armed for retry.
    pub async fn request_delete_many(&self) -> BulkDeleteOutcome {
        let targets = {
            let mut data = self.state.borrow_mut();
            if data.deleting_many {
                return BulkDeleteOutcome::default();
            }
            let targets = data.selection.armed_ids();
            if targets.is_empty() {
                return BulkDeleteOutcome::default();
            }
            data.deleting_many = true;
            for id in &targets {
                data.selection.confirm(id);
            }
            targets
        };

        let results = join_all(
            targets
                .iter()
                .map(|id| self.gateway.delete(TODO_COLLECTION, id)),
        )
        .await;

        let mut outcome = BulkDeleteOutcome::default();
        let mut data = self.state.borrow_mut();
        for (id, result) in targets.into_iter().zip(results) {
            match result {
                Ok(()) => {
                    data.selection.remove(&id);
                    outcome.deleted.push(id);
                }
                Err(err) => {
                    error!("bulk delete of todo {id} failed: {err}");
                    data.selection.rearm(&id);
                    outcome.failed.push((id, err));
                }
            }
        }
        data.todos.retain(|t| !outcome.deleted.contains(&t.id));
        data.deleting_many = false;
        info!(
            "bulk delete finished: {} removed, {} failed",
            outcome.deleted.len(),
            outcome.failed.len()
        );
        outcome
    }

    /// Clear the selection. Ignored while a bulk delete is running so
    /// in-flight entries are not lost track of.
    pub fn deselect_all(&self) {
        let mut data = self.state.borrow_mut();
        if data.deleting_many {
            return;
        }
        data.selection.clear();
    }

    // ========================
    // Create / update
    // ========================

    /// Submit the dialog. The dialog validates title and description before
    /// calling; the controller assumes the fields are valid. Store failure
    /// leaves the collection untouched and is reported back so the dialog
    /// can stay open with its input retained.
    pub async fn submit(&self, mode: FormMode, form: &TodoForm) -> AppResult<()> {
        let draft = TodoDraft::from_form(form);
        match mode {
            FormMode::Create => self.create_todo(draft).await,
            FormMode::Update => {
                let id = form
                    .id
                    .clone()
                    .ok_or_else(|| AppError::UnknownTodo("<missing form id>".to_string()))?;
                self.update_todo(&id, draft).await
            }
        }
    }

    async fn create_todo(&self, draft: TodoDraft) -> AppResult<()> {
        let author = self
            .current_user()
            .ok_or(AppError::NotAuthenticated)?
            .uid;

        let mut fields = to_fields(&draft)?;
        if let Value::Object(map) = &mut fields {
            map.insert("author".to_string(), Value::String(author.clone()));
        }

        let id = self.gateway.create(TODO_COLLECTION, &fields).await?;
        let todo = TodoItem {
            id,
            title: draft.title,
            description: draft.description,
            status: draft.status,
            tags: draft.tags,
            time_stamp: draft.time_stamp,
            due_date: draft.due_date,
            author,
        };

        let mut data = self.state.borrow_mut();
        // The store assigns fresh ids; replacing on collision keeps the
        // uniqueness invariant regardless.
        if data.todos.iter().any(|t| t.id == todo.id) {
            data.todos = replace_by_id(&data.todos, &todo);
        } else {
            data.todos.push(todo);
        }
        Ok(())
    }

    async fn update_todo(&self, id: &str, draft: TodoDraft) -> AppResult<()> {
        let current = self
            .state
            .borrow()
            .todos
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| AppError::UnknownTodo(id.to_string()))?;

        let fields = to_fields(&draft)?;
        self.gateway.update(TODO_COLLECTION, id, &fields).await?;

        let updated = draft.applied_to(&current);
        let mut data = self.state.borrow_mut();
        data.todos = replace_by_id(&data.todos, &updated);
        Ok(())
    }

    #[cfg(test)]
    fn with_state<R>(&self, f: impl FnOnce(&mut AppData) -> R) -> R {
        f(&mut self.state.borrow_mut())
    }
}

/// Immutable replace-by-id: a fresh vector with the matching entry swapped
/// out, everything else untouched.
fn replace_by_id(todos: &[TodoItem], updated: &TodoItem) -> Vec<TodoItem> {
    todos
        .iter()
        .map(|t| {
            if t.id == updated.id {
                updated.clone()
            } else {
                t.clone()
            }
        })
        .collect()
}

fn todo_from_document(doc: Document) -> Result<TodoItem, (String, serde_json::Error)> {
    let Document { id, mut fields } = doc;
    if let Value::Object(map) = &mut fields {
        map.insert("id".to_string(), Value::String(id.clone()));
    }
    serde_json::from_value(fields).map_err(|err| (id, err))
}

fn to_fields<T: serde::Serialize>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value).map_err(|err| AppError::Internal(err.to_string()))
}
