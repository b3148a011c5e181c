//! Détecteurs de motifs sur fenêtres glissantes.
//!
//! Tous les détecteurs passent par [`scan`] : pour chaque largeur et chaque décalage,
//! une [`Slice`] expose la sous-fenêtre, l'élément qui la suit et son voisinage.
//! Une largeur plus grande que la séquence ne produit simplement aucune correspondance.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::trace;

use crate::outcome::{Outcome, format_sequence};
use crate::signals::class_counts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PatternKind {
    /// Majorité >= 3 dans la sous-fenêtre, suivie d'une autre classe.
    Reversal,
    /// Alternance parfaite suivie de son premier élément.
    ReversalAlt,
    /// Égalité séparant deux régimes différents.
    Anchor,
    /// Forme a=b, c=d, a≠c.
    TwoByTwo,
    /// Bloc de 3 apparaissant au moins deux fois dans la sous-fenêtre.
    CamouflagedRepeat,
    TieCluster,
    /// Deux triplets adjacents identiques, sans égalité.
    Cycle,
}

impl PatternKind {
    pub fn label(&self) -> &'static str {
        match self {
            PatternKind::Reversal => "Inversion",
            PatternKind::ReversalAlt => "Inversion d'alternance",
            PatternKind::Anchor => "Ancre",
            PatternKind::TwoByTwo => "Bloc 2×2",
            PatternKind::CamouflagedRepeat => "Répétition camouflée",
            PatternKind::TieCluster => "Amas d'égalités",
            PatternKind::Cycle => "Cycle de 3",
        }
    }

    pub fn is_reversal(&self) -> bool {
        matches!(self, PatternKind::Reversal | PatternKind::ReversalAlt)
    }

    pub fn is_camouflage(&self) -> bool {
        matches!(self, PatternKind::TwoByTwo | PatternKind::CamouflagedRepeat)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternMatch {
    pub kind: PatternKind,
    /// Décalage absolu dans la séquence analysée (0 = plus ancien).
    pub offset: usize,
    pub width: usize,
    pub description: String,
}

impl PatternMatch {
    fn new(kind: PatternKind, offset: usize, width: usize, description: String) -> Self {
        Self { kind, offset, width, description }
    }
}

/// Vue d'une sous-fenêtre `seq[offset..offset + width]`.
#[derive(Debug, Clone, Copy)]
pub struct Slice<'a> {
    seq: &'a [Outcome],
    pub offset: usize,
    pub width: usize,
}

impl<'a> Slice<'a> {
    pub fn window(&self) -> &'a [Outcome] {
        let seq = self.seq;
        &seq[self.offset..self.offset + self.width]
    }

    /// Élément qui suit immédiatement la sous-fenêtre.
    pub fn next(&self) -> Option<Outcome> {
        self.seq.get(self.offset + self.width).copied()
    }

    /// Les `n` éléments plus anciens que la sous-fenêtre, s'ils existent tous.
    pub fn before(&self, n: usize) -> Option<&'a [Outcome]> {
        let seq = self.seq;
        (self.offset >= n).then(|| &seq[self.offset - n..self.offset])
    }

    /// Tout ce qui est plus récent que la sous-fenêtre.
    pub fn after(&self) -> &'a [Outcome] {
        let seq = self.seq;
        &seq[self.offset + self.width..]
    }
}

/// Balaye `seq` pour chaque largeur et chaque décalage. Les doublons
/// (même type, même décalage, même description) sont éliminés.
pub fn scan<F>(seq: &[Outcome], widths: &[usize], mut visit: F) -> Vec<PatternMatch>
where
    F: FnMut(Slice<'_>, &mut Vec<PatternMatch>),
{
    let mut found = Vec::new();
    for &width in widths {
        if width == 0 || width > seq.len() {
            continue;
        }
        for offset in 0..=seq.len() - width {
            visit(Slice { seq, offset, width }, &mut found);
        }
    }

    let mut seen = HashSet::new();
    found.retain(|m| seen.insert((m.kind, m.offset, m.description.clone())));
    found
}

fn majority(window: &[Outcome]) -> (Outcome, usize) {
    let counts = class_counts(window);
    let mut best = Outcome::Home;
    for o in Outcome::ALL {
        if counts[o.index()] > counts[best.index()] {
            best = o;
        }
    }
    (best, counts[best.index()])
}

fn is_perfect_alternation(window: &[Outcome]) -> bool {
    window.windows(2).all(|p| p[0] != p[1])
}

/// Forme a=b, c=d, a≠c sur quatre éléments.
pub fn is_two_by_two(quad: &[Outcome]) -> bool {
    quad.len() == 4 && quad[0] == quad[1] && quad[2] == quad[3] && quad[0] != quad[2]
}

pub fn detect_reversals(seq: &[Outcome], widths: &[usize]) -> Vec<PatternMatch> {
    scan(seq, widths, |slot, out| {
        let Some(next) = slot.next() else {
            return;
        };
        let window = slot.window();

        let (major, count) = majority(window);
        if count >= 3 && next != major {
            out.push(PatternMatch::new(
                PatternKind::Reversal,
                slot.offset,
                slot.width,
                format!("{}x{} sur {} puis {}", count, major, slot.width, next),
            ));
        }

        if slot.width >= 4 && is_perfect_alternation(window) && window.first() == Some(&next) {
            out.push(PatternMatch::new(
                PatternKind::ReversalAlt,
                slot.offset,
                slot.width,
                format!("alternance {} rompue par {}", format_sequence(window), next),
            ));
        }
    })
}

pub fn detect_anchors(seq: &[Outcome]) -> Vec<PatternMatch> {
    scan(seq, &[1], |slot, out| {
        if !slot.window()[0].is_tie() {
            return;
        }
        let Some(before) = slot.before(3) else {
            return;
        };
        let regime = before[0];
        if !before.iter().all(|&o| o == regime) {
            return;
        }
        match slot.after().last() {
            Some(&newest) if newest == regime => {}
            newest => out.push(PatternMatch::new(
                PatternKind::Anchor,
                slot.offset,
                1,
                match newest {
                    Some(n) => format!("3x{} puis égalité, régime {}", regime, n),
                    None => format!("3x{} puis égalité", regime),
                },
            )),
        }
    })
}

pub fn detect_blocks(seq: &[Outcome], widths: &[usize]) -> Vec<PatternMatch> {
    scan(seq, widths, |slot, out| {
        let window = slot.window();

        for (j, quad) in window.windows(4).enumerate() {
            if is_two_by_two(quad) {
                out.push(PatternMatch::new(
                    PatternKind::TwoByTwo,
                    slot.offset + j,
                    4,
                    format_sequence(quad),
                ));
            }
        }

        let mut triples: BTreeMap<&[Outcome], (usize, usize)> = BTreeMap::new();
        for (j, triple) in window.windows(3).enumerate() {
            triples.entry(triple).or_insert((0, j)).0 += 1;
        }
        for (triple, (count, first)) in triples {
            if count >= 2 {
                out.push(PatternMatch::new(
                    PatternKind::CamouflagedRepeat,
                    slot.offset + first,
                    3,
                    format!("bloc {} répété", format_sequence(triple)),
                ));
            }
        }

        let ties = window.iter().filter(|o| o.is_tie()).count();
        if ties >= (slot.width / 4).max(2) {
            out.push(PatternMatch::new(
                PatternKind::TieCluster,
                slot.offset,
                slot.width,
                format!("{} égalités sur {}", ties, slot.width),
            ));
        }
    })
}

/// Cycle de période 3 : `seq[i..i+3] == seq[i+3..i+6]`, sans égalité.
pub fn detect_cycles(seq: &[Outcome]) -> Vec<PatternMatch> {
    scan(seq, &[6], |slot, out| {
        let (first, second) = slot.window().split_at(3);
        if first == second && first.iter().all(|o| !o.is_tie()) {
            out.push(PatternMatch::new(
                PatternKind::Cycle,
                slot.offset,
                6,
                format!("cycle {}", format_sequence(first)),
            ));
        }
    })
}

/// Résultat de tous les détecteurs sur une même fenêtre.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatternReport {
    pub matches: Vec<PatternMatch>,
}

impl PatternReport {
    pub fn detect(seq: &[Outcome], reversal_widths: &[usize], block_widths: &[usize]) -> Self {
        let mut matches = detect_reversals(seq, reversal_widths);
        matches.extend(detect_anchors(seq));
        matches.extend(detect_blocks(seq, block_widths));
        matches.extend(detect_cycles(seq));
        trace!(
            total = matches.len(),
            window = seq.len(),
            "Motifs détectés"
        );
        Self { matches }
    }

    pub fn count(&self, kind: PatternKind) -> usize {
        self.matches.iter().filter(|m| m.kind == kind).count()
    }

    pub fn reversal_count(&self) -> usize {
        self.matches.iter().filter(|m| m.kind.is_reversal()).count()
    }

    pub fn camouflage_count(&self) -> usize {
        self.matches.iter().filter(|m| m.kind.is_camouflage()).count()
    }

    pub fn first(&self, kind: PatternKind) -> Option<&PatternMatch> {
        self.matches.iter().find(|m| m.kind == kind)
    }
}
