use std::collections::VecDeque;

use crate::outcome::Outcome;

/// Historique borné, ordre chronologique (le plus ancien d'abord).
/// Au-delà de la capacité, l'entrée la plus ancienne est évincée.
#[derive(Debug, Clone)]
pub struct OutcomeHistory {
    entries: VecDeque<Outcome>,
    capacity: usize,
}

impl OutcomeHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Ajoute le résultat le plus récent. Retourne l'entrée évincée, s'il y en a une.
    pub fn append(&mut self, outcome: Outcome) -> Option<Outcome> {
        let evicted = if self.entries.len() == self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(outcome);
        evicted
    }

    pub fn undo_last(&mut self) -> Option<Outcome> {
        self.entries.pop_back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn last(&self) -> Option<Outcome> {
        self.entries.back().copied()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Outcome> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Copie contiguë, du plus ancien au plus récent.
    pub fn to_vec(&self) -> Vec<Outcome> {
        self.entries.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Outcome::*;

    #[test]
    fn test_append_keeps_order() {
        let mut h = OutcomeHistory::new(10);
        h.append(Home);
        h.append(Away);
        h.append(Tie);
        assert_eq!(h.to_vec(), vec![Home, Away, Tie]);
        assert_eq!(h.last(), Some(Tie));
    }

    #[test]
    fn test_eviction_beyond_capacity() {
        let mut h = OutcomeHistory::new(3);
        assert_eq!(h.append(Home), None);
        h.append(Away);
        h.append(Away);
        assert_eq!(h.append(Tie), Some(Home));
        assert_eq!(h.len(), 3);
        assert_eq!(h.to_vec(), vec![Away, Away, Tie]);
    }

    #[test]
    fn test_undo_on_empty_is_noop() {
        let mut h = OutcomeHistory::new(5);
        assert_eq!(h.undo_last(), None);
        assert!(h.is_empty());
    }

    #[test]
    fn test_undo_removes_newest() {
        let mut h = OutcomeHistory::new(5);
        h.append(Home);
        h.append(Tie);
        assert_eq!(h.undo_last(), Some(Tie));
        assert_eq!(h.to_vec(), vec![Home]);
    }

    #[test]
    fn test_clear() {
        let mut h = OutcomeHistory::new(5);
        h.append(Home);
        h.append(Away);
        h.clear();
        assert!(h.is_empty());
        assert_eq!(h.capacity(), 5);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut h = OutcomeHistory::new(0);
        h.append(Home);
        h.append(Away);
        assert_eq!(h.to_vec(), vec![Away]);
    }
}
