use serde::Serialize;
use tracing::debug;

use crate::outcome::Outcome;
use crate::patterns::{PatternKind, PatternReport};
use crate::signals::Distribution;
use crate::streak::StreakInfo;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 9;
/// Niveau maximal tant que moins de deux familles fortes ont été observées.
pub const UNCORROBORATED_CAP: u8 = 7;
const MIN_STRONG_FAMILIES: usize = 2;

const TIE_SHARE_THRESHOLD: f64 = 0.20;
const TIE_SHARE_CAP: f64 = 35.0;
const DOMINANCE_THRESHOLD: f64 = 0.65;
const DOMINANCE_POINTS: f64 = 25.0;
const STREAK_MIN: usize = 4;
const STREAK_STEP: f64 = 10.0;
const STREAK_CAP: f64 = 30.0;
const REVERSAL_STEP: f64 = 6.0;
const REVERSAL_CAP: f64 = 30.0;
const ANCHOR_POINTS: f64 = 15.0;
const LOW_ENTROPY: f64 = 0.8;
const LOW_ENTROPY_POINTS: f64 = 15.0;
const HIGH_ENTROPY: f64 = 1.4;
const HIGH_ENTROPY_POINTS: f64 = 10.0;
const CAMOUFLAGE_STEP: f64 = 5.0;
const CAMOUFLAGE_CAP: f64 = 20.0;
const ALTERNATION_THRESHOLD: f64 = 0.85;
const ALTERNATION_MIN_SAMPLES: usize = 8;
const ALTERNATION_POINTS: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SignalKind {
    ElevatedTies,
    Dominance(Outcome),
    LongStreak,
    Reversals,
    Anchor,
    LowEntropy,
    HighEntropy,
    Camouflage,
    HighAlternation,
}

/// Familles fortes : séries, domination, inversions, égalités, basse entropie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum StrongFamily {
    Streak,
    Dominance,
    Reversals,
    Ties,
    LowEntropy,
}

impl SignalKind {
    pub fn strong_family(&self) -> Option<StrongFamily> {
        match self {
            SignalKind::LongStreak => Some(StrongFamily::Streak),
            SignalKind::Dominance(_) => Some(StrongFamily::Dominance),
            SignalKind::Reversals => Some(StrongFamily::Reversals),
            SignalKind::ElevatedTies => Some(StrongFamily::Ties),
            SignalKind::LowEntropy => Some(StrongFamily::LowEntropy),
            SignalKind::Anchor
            | SignalKind::HighEntropy
            | SignalKind::Camouflage
            | SignalKind::HighAlternation => None,
        }
    }

    /// Signaux qui concernent les égalités (ou leur rôle d'ancre).
    pub fn involves_ties(&self) -> bool {
        matches!(self, SignalKind::ElevatedTies | SignalKind::Anchor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signal {
    pub kind: SignalKind,
    /// Points ajoutés au score brut.
    pub weight: f64,
    pub description: String,
}

#[derive(Debug, Clone, Copy)]
pub struct RiskInputs<'a> {
    /// Fréquences pondérées sur la fenêtre courte.
    pub weighted: &'a Distribution,
    /// Séries sur la fenêtre courte.
    pub streak: &'a StreakInfo,
    pub patterns: &'a PatternReport,
    pub entropy: f64,
    pub alternation: f64,
    /// Taille de la fenêtre sur laquelle l'alternance a été mesurée.
    pub samples: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReport {
    pub level: u8,
    pub score: f64,
    pub evidence: Vec<Signal>,
    /// Vrai si le niveau a été ramené à 7 faute de corroboration.
    pub capped: bool,
}

impl RiskReport {
    pub fn strong_families(&self) -> usize {
        count_strong_families(&self.evidence)
    }
}

fn count_strong_families(evidence: &[Signal]) -> usize {
    let mut families: Vec<StrongFamily> = evidence
        .iter()
        .filter_map(|s| s.kind.strong_family())
        .collect();
    families.sort();
    families.dedup();
    families.len()
}

/// Niveau brut : floor(score / 10) + 1, borné à [1, 9].
pub fn level_for_score(score: f64) -> u8 {
    let raw = (score.max(0.0) / 10.0).floor() + 1.0;
    raw.clamp(MIN_LEVEL as f64, MAX_LEVEL as f64) as u8
}

pub fn score(inputs: &RiskInputs<'_>) -> RiskReport {
    let mut evidence: Vec<Signal> = Vec::new();
    let mut push = |kind: SignalKind, weight: f64, description: String| {
        evidence.push(Signal { kind, weight, description });
    };

    let tie_share = inputs.weighted.tie;
    if tie_share > TIE_SHARE_THRESHOLD {
        push(
            SignalKind::ElevatedTies,
            (tie_share * 100.0).min(TIE_SHARE_CAP),
            format!("Égalités récentes élevées ({:.0}%)", tie_share * 100.0),
        );
    }

    for side in [Outcome::Home, Outcome::Away] {
        let share = inputs.weighted.get(side);
        if share > DOMINANCE_THRESHOLD {
            push(
                SignalKind::Dominance(side),
                DOMINANCE_POINTS,
                format!("Domination {} ({:.0}%)", side, share * 100.0),
            );
        }
    }

    if let Some(run) = inputs.streak.current_side_run() {
        if run.len >= STREAK_MIN {
            push(
                SignalKind::LongStreak,
                (STREAK_STEP * (run.len - 3) as f64).min(STREAK_CAP),
                format!("Série en cours de {}x{}", run.len, run.outcome),
            );
        }
    }

    let reversals = inputs.patterns.reversal_count();
    if reversals >= 1 {
        push(
            SignalKind::Reversals,
            (REVERSAL_STEP * reversals as f64).min(REVERSAL_CAP),
            format!("Inversions répétées ({})", reversals),
        );
    }

    let anchors = inputs.patterns.count(PatternKind::Anchor);
    if anchors >= 1 {
        push(
            SignalKind::Anchor,
            ANCHOR_POINTS,
            format!("Égalité utilisée comme ancre ({})", anchors),
        );
    }

    if inputs.entropy < LOW_ENTROPY {
        push(
            SignalKind::LowEntropy,
            LOW_ENTROPY_POINTS,
            format!("Entropie basse ({:.2}) : trop ordonné", inputs.entropy),
        );
    } else if inputs.entropy > HIGH_ENTROPY {
        push(
            SignalKind::HighEntropy,
            HIGH_ENTROPY_POINTS,
            format!("Entropie haute ({:.2}) : trop chaotique", inputs.entropy),
        );
    }

    let camouflage = inputs.patterns.camouflage_count();
    if camouflage >= 1 {
        push(
            SignalKind::Camouflage,
            (CAMOUFLAGE_STEP * camouflage as f64).min(CAMOUFLAGE_CAP),
            format!("Blocs répétés camouflés ({})", camouflage),
        );
    }

    if inputs.alternation > ALTERNATION_THRESHOLD && inputs.samples >= ALTERNATION_MIN_SAMPLES {
        push(
            SignalKind::HighAlternation,
            ALTERNATION_POINTS,
            format!("Alternance excessive ({:.0}%)", inputs.alternation * 100.0),
        );
    }

    let score: f64 = evidence.iter().map(|s| s.weight).sum();
    let mut level = level_for_score(score);
    let strong = count_strong_families(&evidence);
    let capped = level > UNCORROBORATED_CAP && strong < MIN_STRONG_FAMILIES;
    if capped {
        debug!(score, level, strong, "Niveau ramené à {}", UNCORROBORATED_CAP);
        level = UNCORROBORATED_CAP;
    }

    RiskReport { level, score, evidence, capped }
}
