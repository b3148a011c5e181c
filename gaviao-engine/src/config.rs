use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Paramètres du moteur. Tous les champs ont une valeur par défaut ;
/// un fichier JSON partiel ne remplace que les champs présents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Taille maximale de l'historique (anneau).
    pub capacity: usize,
    /// Nombre minimal de résultats avant de produire une évaluation.
    pub min_samples: usize,
    /// Fenêtre courte : signaux récents du score de manipulation.
    pub short_window: usize,
    /// Fenêtre longue : motifs, entropie, classification, prédiction.
    pub long_window: usize,
    pub signal_decay: f64,
    pub prediction_decay: f64,
    pub reversal_widths: Vec<usize>,
    pub block_widths: Vec<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacity: 200,
            min_samples: 5,
            short_window: 6,
            long_window: 18,
            signal_decay: 0.85,
            prediction_decay: 0.88,
            reversal_widths: vec![4, 5, 6],
            block_widths: vec![4, 6, 9],
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            bail!("Capacité nulle");
        }
        if self.min_samples == 0 {
            bail!("min_samples doit être >= 1");
        }
        if self.short_window == 0 || self.long_window == 0 {
            bail!(
                "Fenêtres invalides : courte={}, longue={}",
                self.short_window,
                self.long_window
            );
        }
        let decays = [
            ("signal_decay", self.signal_decay),
            ("prediction_decay", self.prediction_decay),
        ];
        for (name, decay) in decays {
            if !(decay > 0.0 && decay < 1.0) {
                bail!("{} hors de ]0, 1[ : {}", name, decay);
            }
        }
        let widths = [
            ("reversal_widths", &self.reversal_widths),
            ("block_widths", &self.block_widths),
        ];
        for (name, widths) in widths {
            if widths.is_empty() {
                bail!("{} vide", name);
            }
            if let Some(w) = widths.iter().find(|&&w| w < 4) {
                bail!("{} : largeur {} < 4", name, w);
            }
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Impossible de lire {:?}", path))?;
        let config: EngineConfig = serde_json::from_str(&content)
            .with_context(|| format!("Configuration invalide dans {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Impossible d'écrire {:?}", path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.long_window, 18);
        assert!((config.prediction_decay - 0.88).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_bad_decay() {
        let config = EngineConfig { signal_decay: 1.0, ..Default::default() };
        assert!(config.validate().is_err());
        let config = EngineConfig { prediction_decay: 0.0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        assert!(EngineConfig { capacity: 0, ..Default::default() }.validate().is_err());
        assert!(EngineConfig { min_samples: 0, ..Default::default() }.validate().is_err());
        assert!(EngineConfig { short_window: 0, ..Default::default() }.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_narrow_widths() {
        let config = EngineConfig { block_widths: vec![3, 6], ..Default::default() };
        assert!(config.validate().is_err());
        let config = EngineConfig { reversal_widths: vec![], ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"long_window": 6, "signal_decay": 0.88}"#).unwrap();
        assert_eq!(config.long_window, 6);
        assert_eq!(config.capacity, 200);
        assert_eq!(config.block_widths, vec![4, 6, 9]);
    }

    #[test]
    fn test_save_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");
        let config = EngineConfig { capacity: 90, ..Default::default() };
        config.save(&path).unwrap();
        let loaded = EngineConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");
        std::fs::write(&path, r#"{"capacity": 0}"#).unwrap();
        assert!(EngineConfig::load(&path).is_err());
        assert!(EngineConfig::load(&dir.path().join("absent.json")).is_err());
    }
}
