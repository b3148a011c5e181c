use serde::Serialize;

use crate::manipulation::Signal;
use crate::prediction::Prediction;

const BREACH_LEVEL: u8 = 7;
const BREACH_ENTROPY: f64 = 0.7;
const STRONG_TOP: f64 = 0.60;
const FAIR_TOP: f64 = 0.50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Recommendation {
    Bet,
    Wait,
    /// Jamais produit par `recommend` : réservé à la catégorie « bruit élevé ».
    Avoid,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recommendation::Bet => write!(f, "MISER"),
            Recommendation::Wait => write!(f, "ATTENDRE"),
            Recommendation::Avoid => write!(f, "ÉVITER"),
        }
    }
}

/// Conditions qui interdisent toute mise.
pub fn detect_breach(
    level: u8,
    evidence: &[Signal],
    entropy: f64,
    camouflage_matches: usize,
) -> bool {
    level >= BREACH_LEVEL
        || evidence.iter().any(|s| s.kind.involves_ties())
        || (entropy < BREACH_ENTROPY && camouflage_matches >= 1)
}

pub fn recommend(prediction: &Prediction, level: u8, breach: bool) -> Recommendation {
    if breach {
        return Recommendation::Wait;
    }
    // probabilité brute : les pourcentages arrondis ne servent qu'à l'affichage
    let top = prediction.probabilities.get(prediction.top);
    if (top >= STRONG_TOP && level <= 5) || (top >= FAIR_TOP && level <= 4) {
        Recommendation::Bet
    } else {
        Recommendation::Wait
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manipulation::SignalKind;
    use crate::outcome::Outcome;
    use crate::signals::Distribution;

    fn prediction(top_share: f64) -> Prediction {
        let rest = (1.0 - top_share) / 2.0;
        let probabilities = Distribution::from_array([top_share, rest, rest]);
        Prediction {
            percentages: probabilities.percentages(),
            top: Outcome::Home,
            probabilities,
            confidence: 50,
        }
    }

    fn signal(kind: SignalKind) -> Signal {
        Signal { kind, weight: 10.0, description: String::new() }
    }

    #[test]
    fn test_breach_on_level() {
        assert!(detect_breach(7, &[], 1.0, 0));
        assert!(!detect_breach(6, &[], 1.0, 0));
    }

    #[test]
    fn test_breach_on_tie_signals() {
        assert!(detect_breach(2, &[signal(SignalKind::ElevatedTies)], 1.0, 0));
        assert!(detect_breach(2, &[signal(SignalKind::Anchor)], 1.0, 0));
        assert!(!detect_breach(2, &[signal(SignalKind::LongStreak)], 1.0, 0));
    }

    #[test]
    fn test_breach_on_ordered_camouflage() {
        assert!(detect_breach(2, &[], 0.5, 1));
        assert!(!detect_breach(2, &[], 0.5, 0));
        assert!(!detect_breach(2, &[], 0.9, 3));
    }

    #[test]
    fn test_bet_thresholds() {
        assert_eq!(recommend(&prediction(0.62), 5, false), Recommendation::Bet);
        assert_eq!(recommend(&prediction(0.62), 6, false), Recommendation::Wait);
        assert_eq!(recommend(&prediction(0.52), 4, false), Recommendation::Bet);
        assert_eq!(recommend(&prediction(0.52), 5, false), Recommendation::Wait);
        assert_eq!(recommend(&prediction(0.45), 1, false), Recommendation::Wait);
    }

    #[test]
    fn test_bet_thresholds_use_unrounded_probability() {
        // 0.596 s'affiche 60% mais reste sous le seuil
        let p = prediction(0.596);
        assert_eq!(p.top_percentage(), 60);
        assert_eq!(recommend(&p, 5, false), Recommendation::Wait);
        assert_eq!(recommend(&prediction(0.60), 5, false), Recommendation::Bet);

        let p = prediction(0.496);
        assert_eq!(p.top_percentage(), 50);
        assert_eq!(recommend(&p, 4, false), Recommendation::Wait);
        assert_eq!(recommend(&prediction(0.50), 4, false), Recommendation::Bet);
    }

    #[test]
    fn test_breach_forces_wait() {
        assert_eq!(recommend(&prediction(0.9), 1, true), Recommendation::Wait);
    }
}
