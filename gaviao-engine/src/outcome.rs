use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Résultat d'une manche. L'ordre de déclaration sert d'ordre de départage (Home < Away < Tie).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Outcome {
    Home,
    Away,
    Tie,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [Outcome::Home, Outcome::Away, Outcome::Tie];

    pub fn index(&self) -> usize {
        match self {
            Outcome::Home => 0,
            Outcome::Away => 1,
            Outcome::Tie => 2,
        }
    }

    pub fn is_tie(&self) -> bool {
        matches!(self, Outcome::Tie)
    }

    /// Côté opposé. Une égalité n'a pas d'opposé.
    pub fn opposite(&self) -> Option<Outcome> {
        match self {
            Outcome::Home => Some(Outcome::Away),
            Outcome::Away => Some(Outcome::Home),
            Outcome::Tie => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Outcome::Home => 'V',
            Outcome::Away => 'A',
            Outcome::Tie => 'E',
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Outcome::Home => "🔴",
            Outcome::Away => "🔵",
            Outcome::Tie => "🟡",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Home => "Domicile",
            Outcome::Away => "Extérieur",
            Outcome::Tie => "Égalité",
        }
    }

    pub fn from_symbol(c: char) -> Result<Outcome> {
        match c.to_ascii_uppercase() {
            'V' => Ok(Outcome::Home),
            'A' => Ok(Outcome::Away),
            'E' => Ok(Outcome::Tie),
            _ => bail!("Symbole inconnu : '{}' (attendu V, A ou E)", c),
        }
    }

    /// Analyse un symbole seul : lettre ou pastille colorée.
    pub fn parse(token: &str) -> Result<Outcome> {
        let token = token.trim();
        for o in Outcome::ALL {
            if token == o.glyph() {
                return Ok(o);
            }
        }
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Outcome::from_symbol(c),
            _ => bail!("Résultat invalide : '{}'", token),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Analyse une suite compacte comme "VVAE" ou "🔴🔴🔵🟡". Espaces, virgules et tirets ignorés.
pub fn parse_sequence(input: &str) -> Result<Vec<Outcome>> {
    let mut seq = Vec::new();
    for c in input.chars() {
        if c.is_whitespace() || c == ',' || c == '-' || c == '\u{fe0f}' {
            continue;
        }
        let glyph = Outcome::ALL
            .into_iter()
            .find(|o| o.glyph().starts_with(c));
        match glyph {
            Some(o) => seq.push(o),
            None => seq.push(Outcome::from_symbol(c)?),
        }
    }
    Ok(seq)
}

pub fn format_sequence(seq: &[Outcome]) -> String {
    seq.iter().map(|o| o.symbol()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        assert_eq!(Outcome::Home.opposite(), Some(Outcome::Away));
        assert_eq!(Outcome::Away.opposite(), Some(Outcome::Home));
        assert_eq!(Outcome::Tie.opposite(), None);
    }

    #[test]
    fn test_order_for_tie_break() {
        assert!(Outcome::Home < Outcome::Away);
        assert!(Outcome::Away < Outcome::Tie);
        for (i, o) in Outcome::ALL.iter().enumerate() {
            assert_eq!(o.index(), i);
        }
    }

    #[test]
    fn test_parse_letters_case_insensitive() {
        assert_eq!(Outcome::parse("v").unwrap(), Outcome::Home);
        assert_eq!(Outcome::parse("A").unwrap(), Outcome::Away);
        assert_eq!(Outcome::parse(" e ").unwrap(), Outcome::Tie);
    }

    #[test]
    fn test_parse_glyph() {
        assert_eq!(Outcome::parse("🔴").unwrap(), Outcome::Home);
        assert_eq!(Outcome::parse("🔵").unwrap(), Outcome::Away);
        assert_eq!(Outcome::parse("🟡").unwrap(), Outcome::Tie);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Outcome::parse("x").is_err());
        assert!(Outcome::parse("VA").is_err());
        assert!(Outcome::parse("").is_err());
    }

    #[test]
    fn test_parse_sequence_mixed() {
        let seq = parse_sequence("VV a, E-🔵").unwrap();
        assert_eq!(
            seq,
            vec![Outcome::Home, Outcome::Home, Outcome::Away, Outcome::Tie, Outcome::Away]
        );
        assert_eq!(format_sequence(&seq), "VVAEA");
    }

    #[test]
    fn test_parse_sequence_rejects_unknown() {
        assert!(parse_sequence("VVX").is_err());
    }

    #[test]
    fn test_only_vae_letters() {
        for c in ['R', 'B', 'T', 'r', 'b', 't'] {
            assert!(Outcome::from_symbol(c).is_err(), "'{}' ne doit pas être accepté", c);
        }
        // un mot mal tapé n'enregistre rien
        assert!(parse_sequence("tab").is_err());
        assert!(parse_sequence("eat").is_err());
    }
}
