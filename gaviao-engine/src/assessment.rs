use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classifier::{self, Classification, PatternCategory};
use crate::config::EngineConfig;
use crate::manipulation::{self, RiskInputs, Signal};
use crate::outcome::Outcome;
use crate::patterns::{PatternMatch, PatternReport};
use crate::prediction::{self, Prediction};
use crate::recommendation::{self, Recommendation};
use crate::signals::{Distribution, alternation_rate, shannon_entropy, weighted_frequency};
use crate::streak::{self, StreakInfo};
use crate::window::select;

/// Évaluation complète d'un historique. Remplacée en bloc à chaque nouveau résultat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    /// Niveau de manipulation, 1 à 9.
    pub level: u8,
    pub score: f64,
    /// Niveau ramené à 7 faute de signaux forts corroborés.
    pub capped: bool,
    pub signals: Vec<Signal>,
    pub patterns: Vec<PatternMatch>,
    pub classification: Classification,
    pub prediction: Prediction,
    pub breach: bool,
    pub recommendation: Recommendation,
    pub entropy: f64,
    pub alternation: f64,
    /// Fréquences pondérées de la fenêtre courte.
    pub recent: Distribution,
    pub streak: StreakInfo,
    pub window: Vec<Outcome>,
    pub computed_at: DateTime<Utc>,
}

impl Assessment {
    pub fn compute(history: &[Outcome], config: &EngineConfig) -> Self {
        Self::compute_at(history, config, Utc::now())
    }

    /// Même calcul avec un horodatage fourni ; tout le reste ne dépend que de l'historique.
    pub fn compute_at(
        history: &[Outcome],
        config: &EngineConfig,
        computed_at: DateTime<Utc>,
    ) -> Self {
        let long = select(history, config.long_window);
        let short = select(history, config.short_window);

        let recent = weighted_frequency(short, config.signal_decay);
        let short_streak = streak::analyze(short);
        let entropy = shannon_entropy(long);
        let alternation = alternation_rate(long);
        let patterns = PatternReport::detect(long, &config.reversal_widths, &config.block_widths);

        let risk = manipulation::score(&RiskInputs {
            weighted: &recent,
            streak: &short_streak,
            patterns: &patterns,
            entropy,
            alternation,
            samples: long.len(),
        });

        let classification = classifier::classify(long);
        let prediction = prediction::predict(
            long,
            risk.level,
            patterns.reversal_count(),
            config.prediction_decay,
        );
        let breach = recommendation::detect_breach(
            risk.level,
            &risk.evidence,
            entropy,
            patterns.camouflage_count(),
        );
        let recommendation = recommendation::recommend(&prediction, risk.level, breach);

        Self {
            level: risk.level,
            score: risk.score,
            capped: risk.capped,
            signals: risk.evidence,
            patterns: patterns.matches,
            classification,
            prediction,
            breach,
            recommendation,
            entropy,
            alternation,
            recent,
            streak: streak::analyze(long),
            window: long.to_vec(),
            computed_at,
        }
    }

    /// Recommandation affichée : « éviter » quand la cascade conclut à un bruit élevé.
    pub fn effective_recommendation(&self) -> Recommendation {
        if self.classification.category == PatternCategory::HighNoise {
            Recommendation::Avoid
        } else {
            self.recommendation
        }
    }

    /// Compare tout sauf l'horodatage.
    pub fn same_analysis(&self, other: &Assessment) -> bool {
        Assessment { computed_at: other.computed_at, ..self.clone() } == *other
    }
}
