use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};

use gaviao_engine::classifier::SuggestedAction;
use gaviao_engine::history::OutcomeHistory;
use gaviao_engine::{Assessment, EngineConfig, Outcome, Recommendation};

const GRID_COLUMNS: usize = 9;
const GRID_ROWS: usize = 10;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn outcome_color(outcome: Outcome) -> Color {
    match outcome {
        Outcome::Home => Color::Red,
        Outcome::Away => Color::Blue,
        Outcome::Tie => Color::Yellow,
    }
}

/// Grille de l'historique : plus récent en premier, 9 par ligne, 10 lignes au plus.
pub fn grid_rows(history: &OutcomeHistory) -> Vec<Vec<Outcome>> {
    let newest_first: Vec<Outcome> = history
        .iter()
        .rev()
        .take(GRID_COLUMNS * GRID_ROWS)
        .copied()
        .collect();
    newest_first.chunks(GRID_COLUMNS).map(<[Outcome]>::to_vec).collect()
}

pub fn display_history(history: &OutcomeHistory) {
    if history.is_empty() {
        println!("Historique vide.");
        return;
    }

    println!("\n📜 Historique ({} résultats, plus récent en premier)\n", history.len());
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    for row in grid_rows(history) {
        table.add_row(row.iter().map(|o| Cell::new(o.glyph())).collect::<Vec<_>>());
    }
    println!("{table}");
}

pub fn display_waiting(len: usize, min_samples: usize) {
    println!(
        "\n⏳ {} résultat(s) enregistré(s) ; l'analyse démarre à partir de {}.",
        len, min_samples
    );
}

pub fn display_assessment(a: &Assessment) {
    let c = &a.classification;
    let suggestion = c.suggestion();

    println!("\n🧭 Motif : {} {}", c.category.glyph(), c.headline());
    println!("   {}", c.category.description());
    println!("   Confiance du motif : {}%", c.confidence);

    let action = match suggestion.action {
        SuggestedAction::BetOn(o) => Cell::new(suggestion.action.to_string()).fg(outcome_color(o)),
        SuggestedAction::Avoid => Cell::new(suggestion.action.to_string()).fg(Color::Red),
        _ => Cell::new(suggestion.action.to_string()),
    };
    let mut table = new_table(vec!["Suggestion", "Détail"]);
    table.add_row(vec![action, Cell::new(&suggestion.explanation)]);
    println!("{table}");

    display_prediction(a);
    display_signals(a);
    display_patterns(a);
    display_verdict(a);
}

fn display_prediction(a: &Assessment) {
    println!("\n🎯 Prochain résultat (confiance {}%)\n", a.prediction.confidence);
    let mut table = new_table(vec!["Résultat", "Probabilité"]);
    for o in Outcome::ALL {
        let pct = a.prediction.percentages[o.index()];
        let mut cell = Cell::new(format!("{} {}", o.glyph(), o.label()));
        if o == a.prediction.top {
            cell = cell.fg(outcome_color(o));
        }
        table.add_row(vec![cell, Cell::new(format!("{pct}%"))]);
    }
    println!("{table}");
}

fn display_signals(a: &Assessment) {
    if a.signals.is_empty() {
        println!("\nAucun signal de manipulation.");
        return;
    }
    println!("\n🔎 Signaux (score {:.0})\n", a.score);
    let mut table = new_table(vec!["Signal", "Points"]);
    for s in &a.signals {
        table.add_row(vec![Cell::new(&s.description), Cell::new(format!("{:.0}", s.weight))]);
    }
    println!("{table}");
}

fn display_patterns(a: &Assessment) {
    if a.patterns.is_empty() {
        return;
    }
    println!("\n🧩 Motifs détectés ({})\n", a.patterns.len());
    let mut table = new_table(vec!["Type", "Position", "Largeur", "Détail"]);
    for m in &a.patterns {
        table.add_row(vec![
            m.kind.label().to_string(),
            m.offset.to_string(),
            m.width.to_string(),
            m.description.clone(),
        ]);
    }
    println!("{table}");
}

fn display_verdict(a: &Assessment) {
    let level_color = match a.level {
        1..=3 => Color::Green,
        4..=6 => Color::Yellow,
        _ => Color::Red,
    };
    let reco = a.effective_recommendation();
    let reco_color = match reco {
        Recommendation::Bet => Color::Green,
        Recommendation::Wait => Color::Yellow,
        Recommendation::Avoid => Color::Red,
    };

    let mut table =
        new_table(vec!["Niveau", "Entropie", "Alternance", "Brèche", "Recommandation"]);
    let level = if a.capped {
        format!("{}/9 (plafonné)", a.level)
    } else {
        format!("{}/9", a.level)
    };
    table.add_row(vec![
        Cell::new(level).fg(level_color),
        Cell::new(format!("{:.2}", a.entropy)),
        Cell::new(format!("{:.0}%", a.alternation * 100.0)),
        Cell::new(if a.breach { "oui" } else { "non" }),
        Cell::new(reco.to_string()).fg(reco_color),
    ]);
    println!("\n{table}");
}

/// Vue de débogage : métadonnées de la fenêtre de classification.
pub fn display_debug(a: &Assessment) {
    let meta = &a.classification.meta;
    let mut table = new_table(vec!["Champ", "Valeur"]);
    let fmt_opt =
        |o: Option<Outcome>| o.map_or_else(|| "—".to_string(), |o| o.glyph().to_string());
    let fmt_run = |r: Option<gaviao_engine::streak::Run>| {
        r.map_or_else(|| "—".to_string(), |r| format!("{}x {}", r.len, r.outcome))
    };
    table.add_row(vec!["Taille de fenêtre".to_string(), meta.len.to_string()]);
    table.add_row(vec!["Dernier".to_string(), fmt_opt(meta.last)]);
    table.add_row(vec!["Dernier hors égalité".to_string(), fmt_opt(meta.last_non_tie)]);
    table.add_row(vec!["Série en cours".to_string(), fmt_run(meta.current)]);
    table.add_row(vec!["Série précédente".to_string(), fmt_run(meta.previous)]);
    table.add_row(vec!["Égalités".to_string(), meta.ties.to_string()]);
    table.add_row(vec!["Inversions".to_string(), meta.inversions.to_string()]);
    table.add_row(vec!["Répétitions".to_string(), meta.repeats.to_string()]);
    table.add_row(vec!["Prédit".to_string(), fmt_opt(a.classification.predicted)]);
    println!("\n🛠  Débogage\n{table}");
}

pub fn display_config(config: &EngineConfig) {
    let mut table = new_table(vec!["Paramètre", "Valeur"]);
    let join = |v: &[usize]| v.iter().map(|w| w.to_string()).collect::<Vec<_>>().join(", ");
    table.add_row(vec!["Capacité".to_string(), config.capacity.to_string()]);
    table.add_row(vec!["Échantillon minimal".to_string(), config.min_samples.to_string()]);
    table.add_row(vec!["Fenêtre courte".to_string(), config.short_window.to_string()]);
    table.add_row(vec!["Fenêtre longue".to_string(), config.long_window.to_string()]);
    table.add_row(vec!["Décroissance signaux".to_string(), config.signal_decay.to_string()]);
    table.add_row(vec!["Décroissance prédiction".to_string(), config.prediction_decay.to_string()]);
    table.add_row(vec!["Largeurs inversion".to_string(), join(&config.reversal_widths)]);
    table.add_row(vec!["Largeurs blocs".to_string(), join(&config.block_widths)]);
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaviao_engine::parse_sequence;

    fn history_of(s: &str, capacity: usize) -> OutcomeHistory {
        let mut h = OutcomeHistory::new(capacity);
        for o in parse_sequence(s).unwrap() {
            h.append(o);
        }
        h
    }

    #[test]
    fn test_grid_newest_first() {
        let rows = grid_rows(&history_of("VVA", 200));
        assert_eq!(rows, vec![vec![Outcome::Away, Outcome::Home, Outcome::Home]]);
    }

    #[test]
    fn test_grid_nine_per_row() {
        let rows = grid_rows(&history_of("VAVAVAVAVAE", 200));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 9);
        assert_eq!(rows[0][0], Outcome::Tie);
        assert_eq!(rows[1].len(), 2);
    }

    #[test]
    fn test_grid_at_most_ten_rows() {
        let seq = "V".repeat(120);
        let rows = grid_rows(&history_of(&seq, 200));
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|r| r.len() == 9));
    }
}
