use serde::Serialize;

use crate::outcome::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Run {
    pub outcome: Outcome,
    pub len: usize,
}

/// Série en cours et série qui la précède, lues depuis l'extrémité récente.
/// Les égalités forment des séries comme les autres résultats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StreakInfo {
    pub current: Option<Run>,
    pub previous: Option<Run>,
}

impl StreakInfo {
    pub fn current_len(&self) -> usize {
        self.current.map(|r| r.len).unwrap_or(0)
    }

    pub fn previous_len(&self) -> usize {
        self.previous.map(|r| r.len).unwrap_or(0)
    }

    /// Série en cours si elle porte sur un côté (pas une égalité).
    pub fn current_side_run(&self) -> Option<Run> {
        self.current.filter(|r| !r.outcome.is_tie())
    }
}

fn run_ending_at(seq: &[Outcome], end: usize) -> Run {
    let outcome = seq[end - 1];
    let len = seq[..end]
        .iter()
        .rev()
        .take_while(|&&o| o == outcome)
        .count();
    Run { outcome, len }
}

pub fn analyze(seq: &[Outcome]) -> StreakInfo {
    if seq.is_empty() {
        return StreakInfo::default();
    }
    let current = run_ending_at(seq, seq.len());
    let rest = seq.len() - current.len;
    let previous = (rest > 0).then(|| run_ending_at(seq, rest));
    StreakInfo {
        current: Some(current),
        previous,
    }
}
