use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sentinel : surveillance CPU / RAM / disque avec alertes Telegram
///
/// Samples the host every few seconds, shows a live terminal dashboard
/// and sends a Telegram alert when CPU or RAM goes above its limit.
#[derive(Parser, Debug)]
#[command(name = "sentinel")]
#[command(version, about, long_about)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to custom config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lancer la surveillance continue avec tableau de bord
    #[command(alias = "r")]
    Run {
        /// Pause entre deux cycles en secondes (défaut : config)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Stop after this many cycles
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        cycles: Option<u64>,
    },

    /// Show a single sample and exit
    #[command(alias = "s")]
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Envoyer une alerte de test sur Telegram
    #[command(alias = "t")]
    TestAlert,
}
