//! Selection state and the events emitted when it changes.

use serde::Serialize;

/// The single selection of a viewer session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Unselected,
    /// A node, referenced purely by its id.
    Selected(String),
}

impl SelectionState {
    pub fn selected_id(&self) -> Option<&str> {
        match self {
            Self::Unselected => None,
            Self::Selected(id) => Some(id),
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_id() == Some(id)
    }
}

/// Payload sent to the details panel on every selection transition.
///
/// Both fields are `None` when the selection was cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionEvent {
    pub node_id: Option<String>,
    pub text: Option<String>,
}

impl SelectionEvent {
    pub fn selected(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            node_id: Some(id.into()),
            text: Some(text.into()),
        }
    }

    pub fn cleared() -> Self {
        Self {
            node_id: None,
            text: None,
        }
    }
}
