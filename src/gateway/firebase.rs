//! Firebase Bindings
//!
//! Wires the gateway traits to the Firebase JS SDK through the interop shim
//! installed on `window.__FIREBASE__` by index.html. Rejected promises carry
//! the Firebase error message across the boundary.

use async_trait::async_trait;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::{Document, IdentityProvider, StoreGateway};
use crate::error::{GatewayError, GatewayResult, StoreOp};
use crate::models::UserIdentity;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__FIREBASE__"], js_name = listAll, catch)]
    async fn firestore_list_all(collection: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["window", "__FIREBASE__"], js_name = getOne, catch)]
    async fn firestore_get_one(collection: &str, id: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["window", "__FIREBASE__"], js_name = create, catch)]
    async fn firestore_create(collection: &str, fields: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["window", "__FIREBASE__"], js_name = update, catch)]
    async fn firestore_update(collection: &str, id: &str, fields: JsValue)
        -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["window", "__FIREBASE__"], js_name = remove, catch)]
    async fn firestore_delete(collection: &str, id: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["window", "__FIREBASE__"], js_name = signInWithPopup, catch)]
    async fn auth_sign_in() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["window", "__FIREBASE__"], js_name = currentUser, catch)]
    async fn auth_current_user() -> Result<JsValue, JsValue>;
}

/// The SDK rejects with `Error` objects, for which `as_string` is `None`;
/// pull the message out instead of debug-printing the handle.
fn js_cause(value: JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn gateway_error(op: StoreOp, value: JsValue) -> GatewayError {
    GatewayError::new(op, js_cause(value))
}

fn decode_error(op: StoreOp, err: serde_wasm_bindgen::Error) -> GatewayError {
    GatewayError::new(op, err.to_string())
}

/// Firestore-backed [`StoreGateway`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FirebaseGateway;

impl FirebaseGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl StoreGateway for FirebaseGateway {
    async fn list_all(&self, collection: &str) -> GatewayResult<Vec<Document>> {
        let result = firestore_list_all(collection)
            .await
            .map_err(|e| gateway_error(StoreOp::ListAll, e))?;
        serde_wasm_bindgen::from_value(result).map_err(|e| decode_error(StoreOp::ListAll, e))
    }

    async fn get_one(&self, collection: &str, id: &str) -> GatewayResult<Option<Document>> {
        let result = firestore_get_one(collection, id)
            .await
            .map_err(|e| gateway_error(StoreOp::GetOne, e))?;
        serde_wasm_bindgen::from_value(result).map_err(|e| decode_error(StoreOp::GetOne, e))
    }

    async fn create(&self, collection: &str, fields: &Value) -> GatewayResult<String> {
        let payload = serde_wasm_bindgen::to_value(fields)
            .map_err(|e| decode_error(StoreOp::Create, e))?;
        let result = firestore_create(collection, payload)
            .await
            .map_err(|e| gateway_error(StoreOp::Create, e))?;
        result
            .as_string()
            .ok_or_else(|| GatewayError::new(StoreOp::Create, "store returned a non-string id"))
    }

    async fn update(&self, collection: &str, id: &str, fields: &Value) -> GatewayResult<()> {
        let payload = serde_wasm_bindgen::to_value(fields)
            .map_err(|e| decode_error(StoreOp::Update, e))?;
        firestore_update(collection, id, payload)
            .await
            .map_err(|e| gateway_error(StoreOp::Update, e))?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> GatewayResult<()> {
        firestore_delete(collection, id)
            .await
            .map_err(|e| gateway_error(StoreOp::Delete, e))?;
        Ok(())
    }
}

/// Popup sign-in backed by the Firebase auth SDK.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirebaseIdentity;

impl FirebaseIdentity {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl IdentityProvider for FirebaseIdentity {
    async fn authenticate(&self) -> Result<UserIdentity, String> {
        let result = auth_sign_in().await.map_err(js_cause)?;
        serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
    }

    async fn current_user(&self) -> Option<UserIdentity> {
        // A missing session comes back as null and deserializes to None;
        // interop errors are treated the same way.
        let result = auth_current_user().await.ok()?;
        serde_wasm_bindgen::from_value::<Option<UserIdentity>>(result)
            .ok()
            .flatten()
    }
}
