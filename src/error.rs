//! Error Types
//!
//! Failures are tagged with the store operation that produced them so the
//! call site can log something actionable before reverting UI state.

use thiserror::Error;

/// The five document-store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    ListAll,
    GetOne,
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for StoreOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StoreOp::ListAll => "listAll",
            StoreOp::GetOne => "getOne",
            StoreOp::Create => "create",
            StoreOp::Update => "update",
            StoreOp::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// A rejected store call: which operation, and what the store said.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("store {op} failed: {cause}")]
pub struct GatewayError {
    pub op: StoreOp,
    pub cause: String,
}

impl GatewayError {
    pub fn new(op: StoreOp, cause: impl Into<String>) -> Self {
        Self {
            op,
            cause: cause.into(),
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Controller-level failures surfaced to the UI.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("not signed in")]
    NotAuthenticated,
    #[error("no todo with id {0}")]
    UnknownTodo(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;
