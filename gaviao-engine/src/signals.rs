use serde::Serialize;

use crate::outcome::Outcome;

/// Triplet de probabilités indexé par `Outcome::index()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Distribution {
    pub home: f64,
    pub away: f64,
    pub tie: f64,
}

impl Distribution {
    /// 1/3 partout ; s'affiche 33/33/33 (arrondi indépendant, pas de 34 forcé).
    pub fn uniform() -> Self {
        let p = 1.0 / 3.0;
        Self { home: p, away: p, tie: p }
    }

    pub fn from_array(v: [f64; 3]) -> Self {
        Self { home: v[0], away: v[1], tie: v[2] }
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.home, self.away, self.tie]
    }

    pub fn get(&self, outcome: Outcome) -> f64 {
        self.to_array()[outcome.index()]
    }

    pub fn sum(&self) -> f64 {
        self.home + self.away + self.tie
    }

    /// Ramène chaque composante à >= 0 puis normalise. Total nul : distribution uniforme.
    pub fn normalized(&self) -> Self {
        let clamped = self.to_array().map(|p| if p.is_finite() { p.max(0.0) } else { 0.0 });
        let total: f64 = clamped.iter().sum();
        if total > 0.0 {
            Self::from_array(clamped.map(|p| p / total))
        } else {
            Self::uniform()
        }
    }

    /// Pourcentages arrondis indépendamment (la somme peut différer de 100).
    pub fn percentages(&self) -> [u8; 3] {
        self.to_array().map(|p| (p * 100.0).round().clamp(0.0, 100.0) as u8)
    }

    /// Classe la plus probable ; à égalité, l'ordre Home < Away < Tie l'emporte.
    pub fn top(&self) -> Outcome {
        let v = self.to_array();
        let mut best = Outcome::Home;
        for o in Outcome::ALL {
            if v[o.index()] > v[best.index()] {
                best = o;
            }
        }
        best
    }

    /// Deuxième plus forte probabilité.
    pub fn second_best(&self) -> f64 {
        let mut v = self.to_array();
        v.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        v[1]
    }
}

/// Fréquences pondérées : le i-ème résultat le plus récent pèse `decay^i`.
pub fn weighted_frequency(seq: &[Outcome], decay: f64) -> Distribution {
    let mut scores = [0.0f64; 3];
    for (i, o) in seq.iter().rev().enumerate() {
        scores[o.index()] += decay.powi(i as i32);
    }
    Distribution::from_array(scores).normalized()
}

pub fn class_counts(seq: &[Outcome]) -> [usize; 3] {
    let mut counts = [0usize; 3];
    for o in seq {
        counts[o.index()] += 1;
    }
    counts
}

/// Entropie de Shannon (bits) des fréquences brutes. Plage [0, log2(3)].
pub fn shannon_entropy(seq: &[Outcome]) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }
    let total = seq.len() as f64;
    let h: f64 = class_counts(seq)
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum();
    // -0.0 pour une fenêtre mono-classe
    h.max(0.0)
}

pub fn max_entropy() -> f64 {
    3f64.log2()
}

/// Part des paires adjacentes différentes. 0 si moins de deux résultats.
pub fn alternation_rate(seq: &[Outcome]) -> f64 {
    if seq.len() < 2 {
        return 0.0;
    }
    let changes = seq.windows(2).filter(|p| p[0] != p[1]).count();
    changes as f64 / (seq.len() - 1) as f64
}
