use std::io::{self, Write};

use anyhow::{Context, Result, bail};

use gaviao_engine::{Outcome, Session, parse_sequence};

use crate::display;

#[derive(Debug, PartialEq)]
enum InteractiveCommand {
    Record(Vec<Outcome>),
    Undo,
    Reset,
    History,
    Debug,
    Json,
    Quit,
}

fn parse_command(input: &str) -> Option<InteractiveCommand> {
    let lowered = input.trim().to_lowercase();
    match lowered.as_str() {
        "1" | "casa" | "v" => Some(InteractiveCommand::Record(vec![Outcome::Home])),
        "2" | "visitante" | "a" => Some(InteractiveCommand::Record(vec![Outcome::Away])),
        "3" | "égalité" | "egalite" | "empate" | "e" => {
            Some(InteractiveCommand::Record(vec![Outcome::Tie]))
        }
        "4" | "annuler" | "undo" | "u" => Some(InteractiveCommand::Undo),
        "5" | "effacer" | "reset" => Some(InteractiveCommand::Reset),
        "6" | "historique" | "history" | "hist" => Some(InteractiveCommand::History),
        "7" | "debug" | "dbg" => Some(InteractiveCommand::Debug),
        "json" => Some(InteractiveCommand::Json),
        "8" | "quitter" | "quit" | "q" | "exit" => Some(InteractiveCommand::Quit),
        "" => None,
        // saisie groupée : "vvae", "🔴🔵"
        other => parse_sequence(other)
            .ok()
            .filter(|s| !s.is_empty())
            .map(InteractiveCommand::Record),
    }
}

fn display_menu() {
    println!();
    println!("── Mode interactif ──");
    println!("  1. casa       🔴 Victoire Casa (V)");
    println!("  2. visitante  🔵 Victoire Visitante (A)");
    println!("  3. égalité    🟡 Égalité (E)");
    println!("  4. annuler    Annuler le dernier résultat");
    println!("  5. effacer    Effacer l'historique");
    println!("  6. historique Grille des résultats");
    println!("  7. debug      Métadonnées de la fenêtre");
    println!("  8. quitter    Quitter");
    println!("  Saisie groupée possible : vvae");
    println!();
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .context("Erreur de lecture")?;
    if read == 0 {
        bail!("Fin de l'entrée");
    }
    Ok(input.trim().to_string())
}

fn show_current(session: &Session, debug: bool) {
    match session.assessment() {
        Some(a) => {
            display::display_assessment(a);
            if debug {
                display::display_debug(a);
            }
        }
        None => display::display_waiting(session.history().len(), session.config().min_samples),
    }
}

fn cmd_record(session: &mut Session, outcomes: &[Outcome], debug: bool) {
    session.record_all(outcomes);
    let recorded = outcomes.iter().map(|o| o.glyph()).collect::<String>();
    println!("Enregistré : {}", recorded);
    show_current(session, debug);
}

fn cmd_undo(session: &mut Session, debug: bool) {
    match session.undo_last() {
        Some(o) => {
            println!("Annulé : {} {}", o.glyph(), o.label());
            show_current(session, debug);
        }
        None => println!("Historique vide, rien à annuler."),
    }
}

fn cmd_json(session: &Session) -> Result<()> {
    match session.assessment() {
        Some(a) => println!("{}", serde_json::to_string_pretty(a)?),
        None => println!("Aucune évaluation disponible."),
    }
    Ok(())
}

pub fn run_interactive(mut session: Session, mut debug: bool) -> Result<()> {
    println!("Bienvenue dans le mode interactif de gaviao !");

    loop {
        display_menu();
        let input = match prompt("> ") {
            Ok(s) => s,
            Err(_) => break,
        };

        if input.is_empty() {
            continue;
        }

        match parse_command(&input) {
            Some(InteractiveCommand::Quit) => {
                println!("Au revoir !");
                break;
            }
            Some(InteractiveCommand::Record(outcomes)) => {
                cmd_record(&mut session, &outcomes, debug)
            }
            Some(InteractiveCommand::Undo) => cmd_undo(&mut session, debug),
            Some(InteractiveCommand::Reset) => {
                session.reset();
                println!("Historique effacé.");
            }
            Some(InteractiveCommand::History) => display::display_history(session.history()),
            Some(InteractiveCommand::Debug) => {
                debug = !debug;
                println!("Mode débogage {}", if debug { "activé" } else { "désactivé" });
                if let Some(a) = session.assessment().filter(|_| debug) {
                    display::display_debug(a);
                }
            }
            Some(InteractiveCommand::Json) => {
                if let Err(e) = cmd_json(&session) {
                    println!("Erreur: {e:#}");
                }
            }
            None => {
                if let Err(e) = parse_sequence(&input) {
                    println!("Erreur: {e:#}");
                }
                println!(
                    "Commande inconnue : '{}'. Tapez un numéro (1-8), un nom de commande ou une suite V/A/E.",
                    input
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use InteractiveCommand::*;

    #[test]
    fn test_parse_command_by_number() {
        assert_eq!(parse_command("1"), Some(Record(vec![Outcome::Home])));
        assert_eq!(parse_command("2"), Some(Record(vec![Outcome::Away])));
        assert_eq!(parse_command("3"), Some(Record(vec![Outcome::Tie])));
        assert_eq!(parse_command("4"), Some(Undo));
        assert_eq!(parse_command("5"), Some(Reset));
        assert_eq!(parse_command("6"), Some(History));
        assert_eq!(parse_command("7"), Some(Debug));
        assert_eq!(parse_command("8"), Some(Quit));
    }

    #[test]
    fn test_parse_command_by_name() {
        assert_eq!(parse_command("casa"), Some(Record(vec![Outcome::Home])));
        assert_eq!(parse_command("visitante"), Some(Record(vec![Outcome::Away])));
        assert_eq!(parse_command("égalité"), Some(Record(vec![Outcome::Tie])));
        assert_eq!(parse_command("annuler"), Some(Undo));
        assert_eq!(parse_command("effacer"), Some(Reset));
        assert_eq!(parse_command("historique"), Some(History));
        assert_eq!(parse_command("quitter"), Some(Quit));
    }

    #[test]
    fn test_parse_command_case_insensitive() {
        assert_eq!(parse_command("QUIT"), Some(Quit));
        assert_eq!(parse_command("Casa"), Some(Record(vec![Outcome::Home])));
        assert_eq!(parse_command(" E "), Some(Record(vec![Outcome::Tie])));
    }

    #[test]
    fn test_parse_batch_entry() {
        assert_eq!(
            parse_command("vvae"),
            Some(Record(vec![Outcome::Home, Outcome::Home, Outcome::Away, Outcome::Tie]))
        );
        assert_eq!(parse_command("🔴🔵"), Some(Record(vec![Outcome::Home, Outcome::Away])));
    }

    #[test]
    fn test_parse_command_unknown() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("foo"), None);
        assert_eq!(parse_command("9"), None);
        assert_eq!(parse_command("vx"), None);
        // mots mal tapés : aucun résultat enregistré
        assert_eq!(parse_command("tab"), None);
        assert_eq!(parse_command("eat"), None);
    }
}
