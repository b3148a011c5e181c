use tracing::debug;

use crate::assessment::Assessment;
use crate::config::EngineConfig;
use crate::history::OutcomeHistory;
use crate::outcome::Outcome;

/// Historique plus dernière évaluation. Un seul propriétaire ; à partager
/// derrière un `Mutex` si plusieurs appelants enregistrent en parallèle.
#[derive(Debug, Clone)]
pub struct Session {
    config: EngineConfig,
    history: OutcomeHistory,
    assessment: Option<Assessment>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Session {
    pub fn new(config: EngineConfig) -> Self {
        let history = OutcomeHistory::new(config.capacity);
        Self { config, history, assessment: None }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn history(&self) -> &OutcomeHistory {
        &self.history
    }

    pub fn assessment(&self) -> Option<&Assessment> {
        self.assessment.as_ref()
    }

    /// Ajoute un résultat et recalcule l'évaluation dès que l'historique
    /// atteint `min_samples`.
    pub fn record_outcome(&mut self, outcome: Outcome) -> Option<&Assessment> {
        if let Some(evicted) = self.history.append(outcome) {
            debug!(
                evicted = %evicted.symbol(),
                "capacité atteinte, résultat le plus ancien retiré"
            );
        }
        debug!(outcome = %outcome.symbol(), len = self.history.len(), "résultat enregistré");
        self.refresh();
        self.assessment.as_ref()
    }

    pub fn record_all(&mut self, outcomes: &[Outcome]) -> Option<&Assessment> {
        for &o in outcomes {
            self.record_outcome(o);
        }
        self.assessment.as_ref()
    }

    /// Retire le dernier résultat. Sans effet sur un historique vide.
    pub fn undo_last(&mut self) -> Option<Outcome> {
        let removed = self.history.undo_last()?;
        debug!(outcome = %removed.symbol(), len = self.history.len(), "dernier résultat annulé");
        self.refresh();
        Some(removed)
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.assessment = None;
        debug!("session réinitialisée");
    }

    fn refresh(&mut self) {
        self.assessment = if self.history.len() >= self.config.min_samples {
            let assessment = Assessment::compute(&self.history.to_vec(), &self.config);
            debug!(
                level = assessment.level,
                category = assessment.classification.category.number(),
                recommendation = %assessment.recommendation,
                "évaluation recalculée"
            );
            Some(assessment)
        } else {
            None
        };
    }
}
