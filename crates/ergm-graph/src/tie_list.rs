use ergm_core::{Dyad, RngHandle};
use indexmap::IndexSet;

/// Flat, randomly indexable list of existing ties.
///
/// Removal swaps the last element into the vacated slot, so both insertion and
/// removal are O(1) and a uniform pick is a single index draw.
#[derive(Debug, Clone, Default)]
pub struct TieList {
    ties: IndexSet<Dyad>,
}

impl TieList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ties held.
    pub fn len(&self) -> usize {
        self.ties.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.ties.is_empty()
    }

    /// Whether the dyad is held.
    pub fn contains(&self, dyad: Dyad) -> bool {
        self.ties.contains(&dyad)
    }

    pub(crate) fn insert(&mut self, dyad: Dyad) -> bool {
        self.ties.insert(dyad)
    }

    pub(crate) fn remove(&mut self, dyad: Dyad) -> bool {
        self.ties.swap_remove(&dyad)
    }

    /// Returns the tie stored at `index`.
    pub fn get(&self, index: usize) -> Option<Dyad> {
        self.ties.get_index(index).copied()
    }

    /// Uniformly picks a tie, `None` when empty.
    pub fn random(&self, rng: &mut RngHandle) -> Option<Dyad> {
        if self.ties.is_empty() {
            return None;
        }
        self.get(rng.uniform_int(self.ties.len()))
    }

    /// Iterates over ties in storage order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Dyad> + '_ {
        self.ties.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_removal_keeps_remaining_ties_indexable() {
        let mut list = TieList::new();
        for dyad in [Dyad::new(0, 1), Dyad::new(1, 2), Dyad::new(2, 3)] {
            assert!(list.insert(dyad));
        }
        assert!(!list.insert(Dyad::new(0, 1)));
        assert!(list.remove(Dyad::new(0, 1)));
        assert_eq!(list.len(), 2);
        let held: Vec<_> = (0..list.len()).filter_map(|idx| list.get(idx)).collect();
        assert!(held.contains(&Dyad::new(1, 2)));
        assert!(held.contains(&Dyad::new(2, 3)));
        assert!(!list.remove(Dyad::new(0, 1)));
    }

    #[test]
    fn random_pick_on_empty_list_is_none() {
        let list = TieList::new();
        let mut rng = RngHandle::from_seed(1);
        assert!(list.random(&mut rng).is_none());
    }
}
