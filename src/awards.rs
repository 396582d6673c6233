//! Award slot bookkeeping for a single run.

use crate::naming::Award;
use std::path::{Path, PathBuf};

/// Tracks which awards have been handed out. Slots fill once and stay filled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AwardSlots {
    filled: [bool; 3],
}

impl AwardSlots {
    /// Creates a state with every slot open.
    #[must_use]
    pub const fn new() -> Self {
        Self { filled: [false; 3] }
    }

    /// Returns true if `award` has already been assigned.
    #[must_use]
    pub const fn is_filled(&self, award: Award) -> bool {
        self.filled[award.index()]
    }

    /// Marks `award` as assigned. Returns false if it already was.
    pub fn fill(&mut self, award: Award) -> bool {
        let slot = &mut self.filled[award.index()];
        if *slot {
            return false;
        }
        *slot = true;
        true
    }

    /// Open awards in assignment order.
    pub fn unfilled(&self) -> impl Iterator<Item = Award> + '_ {
        Award::ALL.into_iter().filter(|award| !self.is_filled(*award))
    }

    /// Returns true once Gold, Silver and Bronze are all assigned.
    #[must_use]
    pub fn all_filled(&self) -> bool {
        self.filled.iter().all(|filled| *filled)
    }
}

/// Award copies awaiting the square pass, in assignment order.
#[derive(Debug, Default, Clone)]
pub struct SquareWorkList {
    entries: Vec<(Award, PathBuf)>,
}

impl SquareWorkList {
    /// Creates an empty work list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Fills the slot for `award` and records `path`.
    ///
    /// Returns false and leaves the list untouched if the slot was taken.
    pub fn assign(&mut self, slots: &mut AwardSlots, award: Award, path: PathBuf) -> bool {
        if !slots.fill(award) {
            return false;
        }
        self.entries.push((award, path));
        true
    }

    /// Recorded entries in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (Award, &Path)> {
        self.entries
            .iter()
            .map(|(award, path)| (*award, path.as_path()))
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_slots_are_open() {
        let slots = AwardSlots::new();
        assert!(!slots.all_filled());
        assert_eq!(slots.unfilled().collect::<Vec<_>>(), Award::ALL);
    }

    #[test]
    fn test_fill_once() {
        let mut slots = AwardSlots::new();
        assert!(slots.fill(Award::Silver));
        assert!(!slots.fill(Award::Silver));
        assert!(slots.is_filled(Award::Silver));
        assert_eq!(
            slots.unfilled().collect::<Vec<_>>(),
            [Award::Gold, Award::Bronze]
        );
    }

    #[test]
    fn test_filled_slot_ignores_later_assignment() {
        let mut slots = AwardSlots::new();
        let mut work = SquareWorkList::new();

        assert!(work.assign(&mut slots, Award::Gold, PathBuf::from("A-Gold.jpg")));
        assert!(!work.assign(&mut slots, Award::Gold, PathBuf::from("B-Gold.jpg")));

        assert_eq!(work.len(), 1);
        let (award, path) = work.iter().next().unwrap();
        assert_eq!(award, Award::Gold);
        assert_eq!(path, Path::new("A-Gold.jpg"));
    }

    #[test]
    fn test_all_filled() {
        let mut slots = AwardSlots::new();
        for award in Award::ALL {
            slots.fill(award);
        }
        assert!(slots.all_filled());
        assert_eq!(slots.unfilled().count(), 0);
    }
}
