use serde::Serialize;

use crate::outcome::Outcome;
use crate::signals::{Distribution, weighted_frequency};
use crate::streak;
use crate::window::{select, tie_count};

const STREAK_MIN: usize = 4;
const STREAK_OPPOSITE_BOOST: f64 = 0.30;
const STREAK_TIE_BOOST: f64 = 0.10;
const STREAK_SHRINK: f64 = 0.25;
const STREAK_SHRINK_FLOOR: f64 = 0.2;
const RECENT_TIE_SPAN: usize = 10;
const RECENT_TIE_MIN: usize = 2;
const RECENT_TIE_BOOST: f64 = 0.25;
const RECENT_TIE_SIDE_FACTOR: f64 = 0.8;
const REVERSAL_TIE_BOOST: f64 = 0.08;
const MIN_CONFIDENCE: f64 = 30.0;
const MAX_CONFIDENCE: f64 = 95.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub probabilities: Distribution,
    /// Pourcentages arrondis pour l'affichage, même ordre que `Outcome::ALL`.
    pub percentages: [u8; 3],
    pub top: Outcome,
    pub confidence: u8,
}

impl Prediction {
    pub fn top_percentage(&self) -> u8 {
        self.percentages[self.top.index()]
    }
}

/// Fréquences pondérées corrigées par la série en cours, les égalités récentes
/// et le nombre d'inversions détectées.
pub fn predict(window: &[Outcome], level: u8, reversals: usize, decay: f64) -> Prediction {
    if window.is_empty() {
        let probabilities = Distribution::uniform();
        return Prediction {
            percentages: probabilities.percentages(),
            top: probabilities.top(),
            probabilities,
            confidence: 0,
        };
    }

    let mut p = weighted_frequency(window, decay).to_array();

    if let Some(run) = streak::analyze(window).current_side_run() {
        if run.len >= STREAK_MIN {
            let excess = (run.len - 3) as f64;
            if let Some(opp) = run.outcome.opposite() {
                p[opp.index()] += STREAK_OPPOSITE_BOOST * excess;
            }
            p[Outcome::Tie.index()] += STREAK_TIE_BOOST * excess;
            p[run.outcome.index()] *= (1.0 - STREAK_SHRINK * excess).max(STREAK_SHRINK_FLOOR);
        }
    }

    if tie_count(select(window, RECENT_TIE_SPAN)) >= RECENT_TIE_MIN {
        p[Outcome::Tie.index()] += RECENT_TIE_BOOST;
        p[Outcome::Home.index()] *= RECENT_TIE_SIDE_FACTOR;
        p[Outcome::Away.index()] *= RECENT_TIE_SIDE_FACTOR;
    }

    if reversals >= 1 {
        p[Outcome::Tie.index()] += REVERSAL_TIE_BOOST * reversals as f64;
    }

    let probabilities = Distribution::from_array(p).normalized();
    let top = probabilities.top();
    let top_p = probabilities.get(top);
    let raw = 100.0 * top_p + 50.0 * (top_p - probabilities.second_best()) - 3.0 * level as f64;
    let confidence = raw.round().clamp(MIN_CONFIDENCE, MAX_CONFIDENCE) as u8;

    Prediction {
        percentages: probabilities.percentages(),
        top,
        probabilities,
        confidence,
    }
}
