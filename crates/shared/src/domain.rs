use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::error::ListError;

/// Display value of a row, also its identity within a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Title(pub i64);

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Row {
    pub title: Title,
    #[serde(default)]
    pub checked: bool,
}

impl Row {
    pub fn new(title: i64) -> Self {
        Self {
            title: Title(title),
            checked: false,
        }
    }
}

/// Ordered rows, unique by title.
///
/// The only mutations are whole-list permutations and single-row
/// flag flips with an optional move to the front, none of which can
/// introduce or drop a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RowList {
    rows: Vec<Row>,
}

impl RowList {
    /// `count` consecutive titles starting at `first_title`, all unchecked.
    ///
    /// A range that would run past `i64::MAX` is shifted down so it ends
    /// there; titles stay distinct and ascending.
    pub fn ascending(count: NonZeroUsize, first_title: i64) -> Self {
        let span = i64::try_from(count.get() - 1).unwrap_or(i64::MAX);
        let first_title = match first_title.checked_add(span) {
            Some(_) => first_title,
            None => i64::MAX - span,
        };
        let rows = (0..=span).map(|offset| Row::new(first_title + offset)).collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn position_of(&self, title: Title) -> Option<usize> {
        self.rows.iter().position(|row| row.title == title)
    }

    pub fn checked_count(&self) -> usize {
        self.rows.iter().filter(|row| row.checked).count()
    }

    pub(crate) fn check_position(&self, position: usize) -> Result<(), ListError> {
        if position < self.rows.len() {
            Ok(())
        } else {
            Err(ListError::InvalidIndex {
                position: position as i64,
                len: self.rows.len(),
            })
        }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    /// Moves the row at `position` to index 0, keeping the relative order
    /// of everything else.
    pub(crate) fn move_to_front(&mut self, position: usize) {
        self.rows[..=position].rotate_right(1);
    }
}
