use serde::{Deserialize, Serialize};

use crate::domain::Row;

/// What kind of change produced a [`ListUpdate`], so a view can pick an
/// animation style without diffing to find out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeHint {
    /// Whole order may have changed (startup, shuffle).
    FullReload,
    /// The row previously at `from` is now at index 0.
    MoveToFront { from: usize },
    /// Only the appearance of the row at `index` changed.
    Refresh { index: usize },
}

impl ChangeHint {
    pub fn name(&self) -> &'static str {
        match self {
            ChangeHint::FullReload => "full_reload",
            ChangeHint::MoveToFront { .. } => "move_to_front",
            ChangeHint::Refresh { .. } => "refresh",
        }
    }

    pub fn moves_rows(&self) -> bool {
        !matches!(self, ChangeHint::Refresh { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUpdate {
    pub rows: Vec<Row>,
    pub hint: ChangeHint,
}

/// Anything that can show an ordered row list.
pub trait RowListView {
    fn apply(&mut self, update: &ListUpdate);
}
