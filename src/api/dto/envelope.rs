//! The JSON envelope every endpoint responds with.

use serde::{Deserialize, Serialize};

/// `{success, message, data?, error?}`; absent fields are omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Successful result carrying `data`.
    pub fn success(action: UserAction, data: T) -> Self {
        Self {
            success: true,
            message: action.success_message().to_string(),
            data: Some(data),
            error: None,
        }
    }
}

impl Envelope<()> {
    /// Successful result without a payload.
    pub fn done(action: UserAction) -> Self {
        Self {
            success: true,
            message: action.success_message().to_string(),
            data: None,
            error: None,
        }
    }

    /// Failed result; `error` carries the underlying cause.
    pub fn failure(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: Some(error.into()),
        }
    }
}

/// The operation a response belongs to. Decides the envelope messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    List,
    Create,
    Update,
    Delete,
}

impl UserAction {
    pub fn success_message(self) -> &'static str {
        match self {
            UserAction::List => "Resources retrieved successfully.",
            UserAction::Create => "Resource created successfully.",
            UserAction::Update => "Resource updated successfully.",
            UserAction::Delete => "Resource deleted successfully.",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            UserAction::List => "Error retrieving resources.",
            UserAction::Create => "Error creating resource.",
            UserAction::Update => "Error updating resource.",
            UserAction::Delete => "Error deleting resource.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UserAction::List => "list",
            UserAction::Create => "create",
            UserAction::Update => "update",
            UserAction::Delete => "delete",
        }
    }
}
