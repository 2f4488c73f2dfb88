//! Applies UI events to the row list model.

use shared::{ChangeHint, ListUpdate, RowListModel};

use crate::controller::events::{UiError, UiEvent};

/// Runs `event` against `model` and returns the update to present, or
/// `None` when the event was rejected. `status` is rewritten either way.
pub fn dispatch_ui_event(
    model: &mut RowListModel,
    event: UiEvent,
    status: &mut String,
) -> Option<ListUpdate> {
    tracing::debug!(event = event.name(), "applying ui event");

    match event {
        UiEvent::ShuffleRequested => {
            let update = model.shuffle();
            *status = "Shuffled".to_string();
            Some(update)
        }
        UiEvent::RowSelected { position } => match model.toggle(position) {
            Ok(update) => {
                *status = toggle_status(&update);
                Some(update)
            }
            Err(err) => {
                let err = UiError::from_list_error(&err);
                tracing::warn!(position, "{}", err.message());
                *status = err.message().to_string();
                None
            }
        },
    }
}

fn toggle_status(update: &ListUpdate) -> String {
    let index = match update.hint {
        ChangeHint::MoveToFront { .. } => 0,
        ChangeHint::Refresh { index } => index,
        ChangeHint::FullReload => return "Reloaded".to_string(),
    };
    match update.rows.get(index) {
        Some(row) if row.checked => format!("Checked {}", row.title),
        Some(row) => format!("Unchecked {}", row.title),
        None => String::new(),
    }
}
