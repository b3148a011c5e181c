mod display;
mod interactive;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use gaviao_engine::{EngineConfig, Session, parse_sequence};

#[derive(Parser)]
#[command(
    name = "gaviao",
    about = "Analyse de séquences Football Studio (Casa / Visitante / Égalité)"
)]
struct Cli {
    /// Fichier de configuration JSON (défaut : valeurs intégrées)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Saisie interactive des résultats
    Interactive {
        /// Afficher les métadonnées de fenêtre après chaque résultat
        #[arg(long)]
        debug: bool,
    },

    /// Analyser une séquence complète (ex : VVAEAV, plus ancien en premier)
    Analyze {
        sequence: String,

        /// Sortie JSON de l'évaluation
        #[arg(long)]
        json: bool,
    },

    /// Afficher la configuration effective
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Interactive { debug } => interactive::run_interactive(Session::new(config), debug),
        Command::Analyze { sequence, json } => cmd_analyze(config, &sequence, json),
        Command::Config => cmd_config(&config),
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let config = match path {
        Some(p) => EngineConfig::load(p)?,
        None => EngineConfig::default(),
    };
    debug!(?config, "configuration chargée");
    Ok(config)
}

fn cmd_analyze(config: EngineConfig, sequence: &str, json: bool) -> Result<()> {
    let outcomes = parse_sequence(sequence).context("Séquence invalide")?;
    debug!(len = outcomes.len(), "analyse d'une séquence");
    let mut session = Session::new(config);
    session.record_all(&outcomes);

    if json {
        match session.assessment() {
            Some(a) => println!("{}", serde_json::to_string_pretty(a)?),
            None => println!("null"),
        }
        return Ok(());
    }

    display::display_history(session.history());
    match session.assessment() {
        Some(a) => display::display_assessment(a),
        None => display::display_waiting(session.history().len(), session.config().min_samples),
    }
    Ok(())
}

fn cmd_config(config: &EngineConfig) -> Result<()> {
    display::display_config(config);
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
