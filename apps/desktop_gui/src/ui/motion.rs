//! Row transition state: where each row is drawn while the list animates
//! from its previous order to the latest update.

use std::collections::{HashMap, HashSet};

use shared::{ChangeHint, ListUpdate, Title};

pub struct RowMotion {
    duration: f64,
    started_at: f64,
    previous: Vec<Title>,
    /// Slot (in row units) each title was drawn at when the transition began.
    from_slot: HashMap<Title, f32>,
    fading: HashSet<Title>,
}

impl RowMotion {
    pub fn new(duration_secs: f64) -> Self {
        Self {
            duration: duration_secs.max(0.0),
            started_at: f64::NEG_INFINITY,
            previous: Vec::new(),
            from_slot: HashMap::new(),
            fading: HashSet::new(),
        }
    }

    pub fn begin(&mut self, update: &ListUpdate, now: f64) {
        let mut from_slot = HashMap::new();
        let mut fading = HashSet::new();

        if self.previous.is_empty() {
            fading.extend(update.rows.iter().map(|row| row.title));
        } else if update.hint.moves_rows() {
            for (old_index, title) in self.previous.iter().enumerate() {
                let drawn_at = old_index as f32 + self.offset(*title, old_index, now);
                from_slot.insert(*title, drawn_at);
            }
        } else if let ChangeHint::Refresh { index } = update.hint {
            if let Some(row) = update.rows.get(index) {
                fading.insert(row.title);
            }
        }

        tracing::trace!(
            hint = update.hint.name(),
            moving = from_slot.len(),
            fading = fading.len(),
            "row transition started"
        );

        self.previous = update.rows.iter().map(|row| row.title).collect();
        self.from_slot = from_slot;
        self.fading = fading;
        self.started_at = now;
    }

    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration).clamp(0.0, 1.0) as f32
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.progress(now) < 1.0 && (!self.from_slot.is_empty() || !self.fading.is_empty())
    }

    /// Displacement from `index`, in row units, at which `title` is drawn.
    pub fn offset(&self, title: Title, index: usize, now: f64) -> f32 {
        let Some(from) = self.from_slot.get(&title) else {
            return 0.0;
        };
        (from - index as f32) * (1.0 - ease_out(self.progress(now)))
    }

    pub fn opacity(&self, title: Title, now: f64) -> f32 {
        if self.fading.contains(&title) {
            ease_out(self.progress(now))
        } else {
            1.0
        }
    }
}

fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use shared::Row;

    use super::*;

    fn update(titles: &[i64], hint: ChangeHint) -> ListUpdate {
        ListUpdate {
            rows: titles.iter().map(|t| Row::new(*t)).collect(),
            hint,
        }
    }

    fn started() -> RowMotion {
        let mut motion = RowMotion::new(0.5);
        motion.begin(&update(&[1, 2, 3, 4, 5], ChangeHint::FullReload), 0.0);
        motion
    }

    #[test]
    fn first_update_fades_every_row_in() {
        let motion = started();
        assert_eq!(motion.opacity(Title(3), 0.0), 0.0);
        assert!(motion.is_animating(0.25));
        assert_eq!(motion.opacity(Title(3), 0.5), 1.0);
        assert_eq!(motion.offset(Title(3), 2, 0.0), 0.0);
    }

    #[test]
    fn move_to_front_slides_rows_from_old_slots() {
        let mut motion = started();
        motion.begin(
            &update(&[4, 1, 2, 3, 5], ChangeHint::MoveToFront { from: 3 }),
            1.0,
        );

        assert_eq!(motion.offset(Title(4), 0, 1.0), 3.0);
        assert_eq!(motion.offset(Title(1), 1, 1.0), -1.0);
        assert_eq!(motion.offset(Title(5), 4, 1.0), 0.0);
        assert_eq!(motion.offset(Title(4), 0, 1.5), 0.0);
        assert!(!motion.is_animating(1.5));
        assert_eq!(motion.opacity(Title(4), 1.0), 1.0);
    }

    #[test]
    fn shuffle_slides_every_row_without_fading() {
        let mut motion = started();
        motion.begin(&update(&[3, 5, 1, 4, 2], ChangeHint::FullReload), 1.0);

        assert_eq!(motion.offset(Title(3), 0, 1.0), 2.0);
        assert_eq!(motion.offset(Title(2), 4, 1.0), -3.0);
        assert_eq!(motion.opacity(Title(3), 1.0), 1.0);
        assert!(motion.is_animating(1.25));
    }

    #[test]
    fn refresh_fades_only_the_changed_row() {
        let mut motion = started();
        motion.begin(&update(&[1, 2, 3, 4, 5], ChangeHint::Refresh { index: 2 }), 1.0);

        assert_eq!(motion.opacity(Title(3), 1.0), 0.0);
        assert_eq!(motion.opacity(Title(2), 1.0), 1.0);
        assert_eq!(motion.offset(Title(3), 2, 1.0), 0.0);
    }

    #[test]
    fn interrupted_transition_starts_from_drawn_position() {
        let mut motion = started();
        motion.begin(
            &update(&[4, 1, 2, 3, 5], ChangeHint::MoveToFront { from: 3 }),
            1.0,
        );
        let halfway = 1.25;
        let drawn = motion.offset(Title(4), 0, halfway);
        assert!(drawn > 0.0 && drawn < 3.0);

        motion.begin(&update(&[5, 4, 1, 2, 3], ChangeHint::MoveToFront { from: 4 }), halfway);

        let start = motion.offset(Title(4), 1, halfway);
        assert!((start - (drawn - 1.0)).abs() < 1e-5);
    }

    #[test]
    fn zero_duration_never_animates() {
        let mut motion = RowMotion::new(0.0);
        motion.begin(&update(&[1, 2], ChangeHint::FullReload), 0.0);
        motion.begin(&update(&[2, 1], ChangeHint::FullReload), 0.0);
        assert!(!motion.is_animating(0.0));
        assert_eq!(motion.offset(Title(2), 0, 0.0), 0.0);
    }
}
