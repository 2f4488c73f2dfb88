//! UI events and error modeling for the row list screen.

use shared::ListError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    ShuffleRequested,
    RowSelected { position: usize },
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::ShuffleRequested => "shuffle_requested",
            UiEvent::RowSelected { .. } => "row_selected",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    message: String,
}

impl UiError {
    pub fn from_list_error(err: &ListError) -> Self {
        let message = match err {
            ListError::InvalidIndex { position, len } => {
                format!("Row {position} is not on screen ({len} rows); selection ignored.")
            }
        };
        Self { message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
