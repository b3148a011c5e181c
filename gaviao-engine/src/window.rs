use crate::outcome::Outcome;

/// Les `width` derniers résultats, ou toute la séquence si elle est plus courte.
pub fn select(seq: &[Outcome], width: usize) -> &[Outcome] {
    let start = seq.len().saturating_sub(width);
    &seq[start..]
}

/// Dernier résultat qui n'est pas une égalité.
pub fn last_non_tie(seq: &[Outcome]) -> Option<Outcome> {
    seq.iter().rev().copied().find(|o| !o.is_tie())
}

pub fn tie_count(seq: &[Outcome]) -> usize {
    seq.iter().filter(|o| o.is_tie()).count()
}

/// Paires adjacentes différentes dont aucun des deux membres n'est une égalité.
pub fn inversion_count(seq: &[Outcome]) -> usize {
    seq.windows(2)
        .filter(|p| p[0] != p[1] && !p[0].is_tie() && !p[1].is_tie())
        .count()
}

/// Paires adjacentes identiques.
pub fn repeat_count(seq: &[Outcome]) -> usize {
    seq.windows(2).filter(|p| p[0] == p[1]).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::parse_sequence;

    #[test]
    fn test_select_shorter_than_width() {
        let seq = parse_sequence("VAE").unwrap();
        assert_eq!(select(&seq, 6), &seq[..]);
    }

    #[test]
    fn test_select_trailing() {
        let seq = parse_sequence("VVVAAAEEE").unwrap();
        let w = select(&seq, 4);
        assert_eq!(w, &parse_sequence("AEEE").unwrap()[..]);
    }

    #[test]
    fn test_select_empty() {
        assert!(select(&[], 18).is_empty());
    }

    #[test]
    fn test_last_non_tie() {
        assert_eq!(last_non_tie(&parse_sequence("VAEE").unwrap()), Some(Outcome::Away));
        assert_eq!(last_non_tie(&parse_sequence("EE").unwrap()), None);
    }

    #[test]
    fn test_counts() {
        let seq = parse_sequence("VAEAVV").unwrap();
        assert_eq!(tie_count(&seq), 1);
        // V-A et A-V ; E-A et A-E ne comptent pas
        assert_eq!(inversion_count(&seq), 2);
        assert_eq!(repeat_count(&seq), 1);
    }
}
