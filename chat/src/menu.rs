//! Menus attached to outbound messages.

use crate::ActionId;

/// One pressable button: a label plus either a core action or an external
/// link the transport opens directly (no core logic behind it).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub kind: ButtonKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ButtonKind {
    Action(ActionId),
    Url(String),
}

impl Button {
    pub fn action(label: impl Into<String>, action: ActionId) -> Self {
        Self {
            label: label.into(),
            kind: ButtonKind::Action(action),
        }
    }

    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: ButtonKind::Url(url.into()),
        }
    }
}

/// Rows of buttons, rendered under a message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Menu {
    pub rows: Vec<Vec<Button>>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(mut self, buttons: Vec<Button>) -> Self {
        self.rows.push(buttons);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
