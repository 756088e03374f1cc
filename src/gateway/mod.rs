//! Remote Store Gateway
//!
//! Abstract seams to the document store and the identity provider. The
//! production implementations bind the Firebase JS SDK through the interop
//! shim (see `firebase`); tests substitute in-memory fakes.

mod firebase;

pub use firebase::{FirebaseGateway, FirebaseIdentity};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GatewayResult;
use crate::models::UserIdentity;

/// Collection holding the todos.
pub const TODO_COLLECTION: &str = "todo";
/// Collection holding user profiles, keyed by uid.
pub const USERS_COLLECTION: &str = "users";

/// One stored document: its store-assigned id plus the field payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: Value,
}

/// CRUD surface of the remote document store.
///
/// `?Send` because browser futures are single-threaded.
#[async_trait(?Send)]
pub trait StoreGateway {
    /// Bulk fetch of a whole collection, used at startup.
    async fn list_all(&self, collection: &str) -> GatewayResult<Vec<Document>>;

    async fn get_one(&self, collection: &str, id: &str) -> GatewayResult<Option<Document>>;

    /// The store assigns and returns the new document's id.
    async fn create(&self, collection: &str, fields: &Value) -> GatewayResult<String>;

    /// Set semantics: also used to upsert keyed documents (user profiles).
    async fn update(&self, collection: &str, id: &str, fields: &Value) -> GatewayResult<()>;

    async fn delete(&self, collection: &str, id: &str) -> GatewayResult<()>;
}

/// Third-party sign-in.
#[async_trait(?Send)]
pub trait IdentityProvider {
    /// Popup sign-in flow. Only ever triggered by an explicit user action.
    async fn authenticate(&self) -> Result<UserIdentity, String>;

    /// An already-active session restored at load, if any. Never opens a
    /// popup.
    async fn current_user(&self) -> Option<UserIdentity>;
}
