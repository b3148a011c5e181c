//! Classification par cascade de priorité : une seule catégorie par fenêtre,
//! la première règle satisfaite l'emporte.

use serde::Serialize;

use crate::outcome::Outcome;
use crate::patterns::{detect_cycles, is_two_by_two};
use crate::streak::{self, Run};
use crate::window::{inversion_count, last_non_tie, repeat_count, tie_count};

const ALTERNATION_TAIL: usize = 8;
const ALTERNATION_MIN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PatternCategory {
    InsufficientData,
    LongRun,
    CompositeManipulation,
    ShortCycle,
    TwoThreeInversion,
    ResumedRun,
    RepetitiveRun,
    Alternation,
    PatternBreak,
    StrategicTies,
    HighNoise,
    ControlledNoise,
}

impl PatternCategory {
    pub fn number(&self) -> &'static str {
        match self {
            PatternCategory::InsufficientData => "-",
            PatternCategory::RepetitiveRun => "1",
            PatternCategory::ResumedRun => "1b",
            PatternCategory::Alternation => "2",
            PatternCategory::PatternBreak => "3",
            PatternCategory::StrategicTies => "4",
            PatternCategory::LongRun => "5",
            PatternCategory::TwoThreeInversion => "6",
            PatternCategory::ShortCycle => "7",
            PatternCategory::ControlledNoise => "8",
            PatternCategory::HighNoise => "9",
            PatternCategory::CompositeManipulation => "10",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PatternCategory::InsufficientData => "Données insuffisantes",
            PatternCategory::RepetitiveRun => "Série répétitive",
            PatternCategory::ResumedRun => "Série reprise après rupture",
            PatternCategory::Alternation => "Alternance",
            PatternCategory::PatternBreak => "Rupture de motif",
            PatternCategory::StrategicTies => "Égalités stratégiques",
            PatternCategory::LongRun => "Longue série d'une couleur",
            PatternCategory::TwoThreeInversion => "Deux ou trois répétés + inversion",
            PatternCategory::ShortCycle => "Cycles courts",
            PatternCategory::ControlledNoise => "Bruit contrôlé",
            PatternCategory::HighNoise => "Faux motifs",
            PatternCategory::CompositeManipulation => "Manipulation par niveau de confiance",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            PatternCategory::InsufficientData => "❔",
            PatternCategory::RepetitiveRun | PatternCategory::LongRun => "🔴",
            PatternCategory::ResumedRun | PatternCategory::ShortCycle => "🔄",
            PatternCategory::Alternation | PatternCategory::TwoThreeInversion => "🔵",
            PatternCategory::PatternBreak => "⚠️",
            PatternCategory::StrategicTies => "🟡",
            PatternCategory::ControlledNoise => "❓",
            PatternCategory::HighNoise => "🚫",
            PatternCategory::CompositeManipulation => "🔒",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PatternCategory::InsufficientData => "Moins de deux résultats dans la fenêtre.",
            PatternCategory::RepetitiveRun => {
                "3 résultats identiques consécutifs ou plus dans la fenêtre."
            }
            PatternCategory::ResumedRun => "Série reprise après une rupture dans la fenêtre.",
            PatternCategory::Alternation => "Résultats alternés dans la fenêtre (ex : 🔴🔵🔴🔵).",
            PatternCategory::PatternBreak => "Changement inattendu après un motif répétitif.",
            PatternCategory::StrategicTies => "Égalités dans la fenêtre ; confusion possible.",
            PatternCategory::LongRun => "Longue série (5 ou plus) de la même couleur.",
            PatternCategory::TwoThreeInversion => "Cycle de 2-3 répétitions suivi d'une inversion.",
            PatternCategory::ShortCycle => "Répétition de blocs courts dans la fenêtre.",
            PatternCategory::ControlledNoise => "Fenêtre au comportement apparemment aléatoire.",
            PatternCategory::HighNoise => "Peu de répétitions dans la fenêtre : bruit élevé.",
            PatternCategory::CompositeManipulation => {
                "Égalités et inversions fréquentes : motif sophistiqué."
            }
        }
    }
}

impl std::fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.number(), self.name())
    }
}

/// Faits dérivés de la fenêtre, exposés pour l'affichage et le débogage.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WindowMeta {
    pub len: usize,
    pub last: Option<Outcome>,
    pub last_non_tie: Option<Outcome>,
    pub current: Option<Run>,
    pub previous: Option<Run>,
    pub ties: usize,
    pub inversions: usize,
    pub repeats: usize,
}

impl WindowMeta {
    pub fn from_window(window: &[Outcome]) -> Self {
        let streaks = streak::analyze(window);
        Self {
            len: window.len(),
            last: window.last().copied(),
            last_non_tie: last_non_tie(window),
            current: streaks.current,
            previous: streaks.previous,
            ties: tie_count(window),
            inversions: inversion_count(window),
            repeats: repeat_count(window),
        }
    }

    pub fn current_len(&self) -> usize {
        self.current.map(|r| r.len).unwrap_or(0)
    }

    /// Série en cours sur un côté (pas une égalité).
    fn side_run(&self) -> Option<Run> {
        self.current.filter(|r| !r.outcome.is_tie())
    }

    /// Série d'au moins 3 sur un côté, précédée d'au moins 2 de l'autre côté.
    pub fn resumes_after_break(&self) -> bool {
        let Some(run) = self.side_run() else {
            return false;
        };
        run.len >= 3
            && self.previous.is_some_and(|prev| {
                !prev.outcome.is_tie() && prev.outcome != run.outcome && prev.len >= 2
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub category: PatternCategory,
    /// Confiance de la détection, 0 à 100.
    pub confidence: u8,
    /// Prochain résultat attendu, pour les catégories qui en définissent un.
    pub predicted: Option<Outcome>,
    pub meta: WindowMeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SuggestedAction {
    BetOn(Outcome),
    Caution,
    Wait,
    Avoid,
    NoClearSuggestion,
    NoSuggestion,
}

impl std::fmt::Display for SuggestedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestedAction::BetOn(o) => write!(f, "Miser sur {}", o),
            SuggestedAction::Caution => write!(f, "Miser avec prudence, petites mises"),
            SuggestedAction::Wait => write!(f, "Attendre"),
            SuggestedAction::Avoid => write!(f, "Éviter de miser"),
            SuggestedAction::NoClearSuggestion => write!(f, "Pas de suggestion claire"),
            SuggestedAction::NoSuggestion => write!(f, "Pas de suggestion"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub action: SuggestedAction,
    pub explanation: String,
}

fn classification(
    category: PatternCategory,
    confidence: u8,
    predicted: Option<Outcome>,
    meta: WindowMeta,
) -> Classification {
    Classification { category, confidence, predicted, meta }
}

/// Cascade de priorité sur la fenêtre. Fonction pure : même fenêtre, même résultat.
pub fn classify(window: &[Outcome]) -> Classification {
    use PatternCategory::*;

    let meta = WindowMeta::from_window(window);
    if window.len() < 2 {
        return classification(InsufficientData, 0, None, meta);
    }

    let run_len = meta.current_len() as u32;

    if let Some(run) = meta.side_run() {
        if run.len >= 5 {
            let conf = (50 + 6 * run_len).min(95);
            return classification(LongRun, conf as u8, None, meta);
        }
    }

    if meta.ties >= 1 && meta.inversions >= 2 {
        return classification(CompositeManipulation, 85, None, meta);
    }

    if let Some(cycle) = detect_cycles(window).first() {
        let predicted = window[cycle.offset];
        return classification(ShortCycle, 80, Some(predicted), meta);
    }

    let two_three = window
        .windows(4)
        .find(|q| is_two_by_two(q) && !q[0].is_tie() && !q[2].is_tie());
    if let Some(quad) = two_three {
        let predicted = quad[2];
        return classification(TwoThreeInversion, 75, Some(predicted), meta);
    }

    if let Some(run) = meta.side_run() {
        if meta.resumes_after_break() {
            let conf = (45 + 8 * run_len).min(85);
            return classification(ResumedRun, conf as u8, None, meta);
        }
        if run.len >= 3 {
            let conf = (40 + 6 * run_len).min(75);
            return classification(RepetitiveRun, conf as u8, None, meta);
        }
    }

    let sides: Vec<Outcome> = window.iter().copied().filter(|o| !o.is_tie()).collect();
    if sides.len() >= ALTERNATION_MIN {
        let tail = &sides[sides.len().saturating_sub(ALTERNATION_TAIL)..];
        if tail.windows(2).all(|p| p[0] != p[1]) {
            return classification(Alternation, 60, None, meta);
        }
    }

    if meta.current_len() == 2 && window.len() >= 3 && Some(window[window.len() - 3]) != meta.last {
        return classification(PatternBreak, 55, None, meta);
    }

    if meta.ties >= 1 {
        return classification(StrategicTies, 50, None, meta);
    }

    if meta.repeats <= 1 {
        return classification(HighNoise, 40, None, meta);
    }

    classification(ControlledNoise, 35, None, meta)
}

impl Classification {
    /// Texte de suggestion associé à la catégorie.
    pub fn suggestion(&self) -> Suggestion {
        use PatternCategory::*;
        use SuggestedAction::*;

        let meta = &self.meta;
        let conf = self.confidence;
        let run = meta.current_len();
        let make =
            |action: SuggestedAction, explanation: String| Suggestion { action, explanation };

        match self.category {
            ResumedRun => match (meta.last.filter(|o| !o.is_tie()), meta.last_non_tie) {
                (Some(last), _) => make(
                    BetOn(last),
                    format!(
                        "Série reprise après rupture ({}x) dans les {} derniers résultats. Confiance ≈ {}%.",
                        run, meta.len, conf
                    ),
                ),
                (None, Some(valid)) => make(
                    BetOn(valid),
                    format!(
                        "Dernière couleur valide {} ; miser avec prudence. Confiance ≈ {}%.",
                        valid, conf
                    ),
                ),
                (None, None) => {
                    make(Wait, "Derniers résultats nuls : attendre une couleur.".into())
                }
            },
            RepetitiveRun => match meta.last_non_tie.and_then(|o| o.opposite()) {
                Some(opp) => make(
                    BetOn(opp),
                    format!(
                        "Série de {} dans la fenêtre ; miser sur l'opposé en attendant la rupture. Confiance ≈ {}%.",
                        run, conf
                    ),
                ),
                None => make(Wait, "Série identifiée mais sans référence valide.".into()),
            },
            Alternation => match meta.last_non_tie.and_then(|o| o.opposite()) {
                Some(opp) => make(
                    BetOn(opp),
                    format!(
                        "Alternance sur les {} derniers résultats ; miser sur l'opposé du dernier. Confiance ≈ {}%.",
                        meta.len, conf
                    ),
                ),
                None => make(
                    NoClearSuggestion,
                    "Alternance identifiée mais sans référence valide.".into(),
                ),
            },
            PatternBreak => match meta.last_non_tie {
                Some(valid) => make(
                    BetOn(valid),
                    format!(
                        "Rupture de motif ; miser sur la continuité du dernier. Confiance ≈ {}%.",
                        conf
                    ),
                ),
                None => make(Wait, "Rupture détectée mais sans couleur valide.".into()),
            },
            StrategicTies => match meta.last_non_tie {
                Some(valid) => make(
                    BetOn(valid),
                    format!(
                        "Égalités dans la fenêtre ; miser sur la dernière couleur {} avec prudence. Confiance ≈ {}%.",
                        valid, conf
                    ),
                ),
                None => make(Wait, "Fenêtre composée uniquement d'égalités : attendre.".into()),
            },
            LongRun => make(
                Wait,
                format!(
                    "Série très longue ({}x) : risque élevé, éviter les entrées. Confiance ≈ {}%.",
                    run, conf
                ),
            ),
            TwoThreeInversion | ShortCycle => match self.predicted {
                Some(pred) => make(
                    BetOn(pred),
                    format!(
                        "{} ; prochain attendu : {}. Confiance ≈ {}%.",
                        self.category.name(),
                        pred,
                        conf
                    ),
                ),
                None => make(Wait, "Motif détecté mais prédiction peu fiable.".into()),
            },
            HighNoise => make(
                Avoid,
                format!("Bruit élevé dans la fenêtre : éviter de miser. Confiance ≈ {}%.", conf),
            ),
            CompositeManipulation => make(
                Caution,
                format!(
                    "Motif complexe (égalités + inversions) : petites mises et gestion stricte. Confiance ≈ {}%.",
                    conf
                ),
            ),
            ControlledNoise => {
                make(NoClearSuggestion, "Fenêtre bruitée : attendre plus de données.".into())
            }
            InsufficientData => make(NoSuggestion, "Historique insuffisant pour l'analyse.".into()),
        }
    }

    /// Libellé avec détail de série, ex : "1. Série répétitive (3x 🔴)".
    pub fn headline(&self) -> String {
        match self.meta.current.filter(|r| r.len >= 2 && !r.outcome.is_tie()) {
            Some(run) => format!("{} ({}x {})", self.category, run.len, run.outcome),
            None => self.category.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::parse_sequence;
    use PatternCategory::*;

    fn classify_str(s: &str) -> Classification {
        classify(&parse_sequence(s).unwrap())
    }

    #[test]
    fn test_insufficient_data() {
        let c = classify_str("V");
        assert_eq!(c.category, InsufficientData);
        assert_eq!(c.confidence, 0);
        assert_eq!(classify(&[]).category, InsufficientData);
    }

    #[test]
    fn test_long_run() {
        let c = classify_str("VVVVV");
        assert_eq!(c.category, LongRun);
        assert_eq!(c.confidence, 80);
        let c = classify_str("AAAAAAAAA");
        assert_eq!(c.confidence, 95);
    }

    #[test]
    fn test_long_tie_run_is_not_long_run() {
        assert_ne!(classify_str("EEEEE").category, LongRun);
    }

    #[test]
    fn test_composite_manipulation() {
        let c = classify_str("VAEVA");
        assert_eq!(c.category, CompositeManipulation);
        assert_eq!(c.confidence, 85);
    }

    #[test]
    fn test_short_cycle_predicts_first_of_block() {
        let c = classify_str("VVAVVA");
        assert_eq!(c.category, ShortCycle);
        assert_eq!(c.confidence, 80);
        assert_eq!(c.predicted, Some(Outcome::Home));
    }

    #[test]
    fn test_two_three_inversion() {
        let c = classify_str("VVAA");
        assert_eq!(c.category, TwoThreeInversion);
        assert_eq!(c.confidence, 75);
        assert_eq!(c.predicted, Some(Outcome::Away));
    }

    #[test]
    fn test_two_three_ignores_ties() {
        assert_ne!(classify_str("EEVV").category, TwoThreeInversion);
    }

    #[test]
    fn test_resumed_run_rule() {
        let meta = WindowMeta::from_window(&parse_sequence("AAVVV").unwrap());
        assert!(meta.resumes_after_break());
        let meta = WindowMeta::from_window(&parse_sequence("AVVV").unwrap());
        assert!(!meta.resumes_after_break(), "série précédente trop courte");
        let meta = WindowMeta::from_window(&parse_sequence("EEVVV").unwrap());
        assert!(!meta.resumes_after_break(), "les égalités ne comptent pas comme rupture");
    }

    #[test]
    fn test_resumed_run_shadowed_by_two_three() {
        // AAVV forme un 2×2, évalué avant la reprise de série
        let c = classify_str("AAVVV");
        assert_eq!(c.category, TwoThreeInversion);
        assert_eq!(c.predicted, Some(Outcome::Home));
    }

    #[test]
    fn test_run_after_ties_is_repetitive() {
        let c = classify_str("EEVVV");
        assert_eq!(c.category, RepetitiveRun);
        assert_eq!(c.confidence, 58);
    }

    #[test]
    fn test_suggestion_resumed_run_bets_on_last() {
        let meta = WindowMeta::from_window(&parse_sequence("AAVVV").unwrap());
        let c = Classification { category: ResumedRun, confidence: 69, predicted: None, meta };
        assert_eq!(c.suggestion().action, SuggestedAction::BetOn(Outcome::Home));
    }

    #[test]
    fn test_repetitive_run() {
        let c = classify_str("VVVV");
        assert_eq!(c.category, RepetitiveRun);
        assert_eq!(c.confidence, 64);
        let c = classify_str("VVV");
        assert_eq!(c.confidence, 58);
    }

    #[test]
    fn test_alternation() {
        let c = classify_str("VAVAVAVA");
        assert_eq!(c.category, Alternation);
        assert_eq!(c.confidence, 60);
    }

    #[test]
    fn test_pattern_break() {
        let c = classify_str("VAA");
        assert_eq!(c.category, PatternBreak);
        assert_eq!(c.confidence, 55);
    }

    #[test]
    fn test_strategic_ties() {
        let c = classify_str("EE");
        assert_eq!(c.category, StrategicTies);
        assert_eq!(c.confidence, 50);
    }

    #[test]
    fn test_high_noise() {
        let c = classify_str("VAV");
        assert_eq!(c.category, HighNoise);
        assert_eq!(c.confidence, 40);
        assert_eq!(c.suggestion().action, SuggestedAction::Avoid);
    }

    #[test]
    fn test_controlled_noise_fallback() {
        // deux paires répétées, ni série >= 3, ni égalité, ni 2×2, ni cycle
        let c = classify_str("VVAVAVVA");
        assert_eq!(c.category, ControlledNoise);
        assert_eq!(c.confidence, 35);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let seq = parse_sequence("VAEVVAAEVAVVVAEEAV").unwrap();
        assert_eq!(classify(&seq), classify(&seq));
    }

    #[test]
    fn test_suggestion_repetitive_bets_opposite() {
        let c = classify_str("VVVV");
        assert_eq!(c.suggestion().action, SuggestedAction::BetOn(Outcome::Away));
    }

    #[test]
    fn test_suggestion_long_run_waits() {
        assert_eq!(classify_str("VVVVVV").suggestion().action, SuggestedAction::Wait);
    }

    #[test]
    fn test_headline_includes_run() {
        assert_eq!(classify_str("VVV").headline(), "1. Série répétitive (3x 🔴)");
        assert_eq!(classify_str("VAV").headline(), "9. Faux motifs");
    }
}
