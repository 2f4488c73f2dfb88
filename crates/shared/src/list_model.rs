//! The row list and the operations the screen performs on it.

use std::num::NonZeroUsize;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{
    domain::{Row, RowList, Title},
    error::ListError,
    protocol::{ChangeHint, ListUpdate, RowListView},
    settings::Settings,
};

pub struct RowListModel {
    list: RowList,
    rng: StdRng,
}

impl RowListModel {
    /// Ascending, all-unchecked list; the model's RNG is seeded from entropy.
    pub fn initialize(count: NonZeroUsize, first_title: i64) -> Self {
        Self::with_rng(count, first_title, StdRng::from_entropy())
    }

    /// Same as [`RowListModel::initialize`] but every shuffle is reproducible.
    pub fn with_seed(count: NonZeroUsize, first_title: i64, seed: u64) -> Self {
        Self::with_rng(count, first_title, StdRng::seed_from_u64(seed))
    }

    pub fn from_settings(settings: &Settings) -> Self {
        match settings.seed {
            Some(seed) => Self::with_seed(settings.row_count, settings.first_title, seed),
            None => Self::initialize(settings.row_count, settings.first_title),
        }
    }

    fn with_rng(count: NonZeroUsize, first_title: i64, rng: StdRng) -> Self {
        let list = RowList::ascending(count, first_title);
        tracing::debug!(rows = list.len(), first_title, "initialized row list");
        Self { list, rng }
    }

    pub fn rows(&self) -> &[Row] {
        self.list.rows()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn position_of(&self, title: Title) -> Option<usize> {
        self.list.position_of(title)
    }

    pub fn checked_count(&self) -> usize {
        self.list.checked_count()
    }

    /// Uniformly permutes the rows. Checked flags travel with their rows.
    pub fn shuffle(&mut self) -> ListUpdate {
        self.list.as_mut_slice().shuffle(&mut self.rng);
        tracing::debug!(rows = self.list.len(), "shuffled row list");
        self.snapshot(ChangeHint::FullReload)
    }

    /// Flips the checked flag of the row at `position`.
    ///
    /// A row that becomes checked moves to the front; a row that becomes
    /// unchecked stays where it is. On error the list is untouched.
    pub fn toggle(&mut self, position: usize) -> Result<ListUpdate, ListError> {
        self.list.check_position(position)?;

        let row = &mut self.list.as_mut_slice()[position];
        row.checked = !row.checked;
        let (title, checked) = (row.title, row.checked);

        let hint = if checked && position != 0 {
            self.list.move_to_front(position);
            ChangeHint::MoveToFront { from: position }
        } else {
            ChangeHint::Refresh { index: position }
        };

        tracing::debug!(%title, position, checked, hint = hint.name(), "toggled row");
        Ok(self.snapshot(hint))
    }

    /// [`RowListModel::toggle`] for positions that came in as signed text.
    pub fn toggle_signed(&mut self, position: i64) -> Result<ListUpdate, ListError> {
        let index = ListError::index_from_signed(position, self.list.len())?;
        self.toggle(index)
    }

    pub fn snapshot(&self, hint: ChangeHint) -> ListUpdate {
        ListUpdate {
            rows: self.list.rows().to_vec(),
            hint,
        }
    }

    pub fn present(&self, hint: ChangeHint, view: &mut impl RowListView) {
        view.apply(&self.snapshot(hint));
    }
}

#[cfg(test)]
#[path = "tests/list_model_tests.rs"]
mod tests;
