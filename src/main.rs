use std::io::IsTerminal;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use sentinel::application::config::AppConfig;
use sentinel::application::services::monitor::MonitorService;
use sentinel::infrastructure::collectors::sysinfo_sampler::SysinfoSampler;
use sentinel::infrastructure::notifications::http_transport::ReqwestTransport;
use sentinel::infrastructure::notifications::telegram::TelegramNotifier;
use sentinel::presentation::cli::app::{Cli, Commands};
use sentinel::presentation::cli::commands::run::run_monitor;
use sentinel::presentation::cli::commands::status::run_status;
use sentinel::presentation::cli::commands::test_alert::run_test_alert;
use sentinel::presentation::cli::display::TerminalDisplay;

fn print_banner() {
    println!("{}", "━".repeat(40).cyan());
    println!("{}", "  SENTINEL — Surveillance système".bold().cyan());
    println!("{}", "━".repeat(40).cyan());
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    // stdout belongs to the dashboard
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    // Load configuration
    let config = if let Some(ref path) = cli.config {
        AppConfig::load_or_create(path)?
    } else {
        AppConfig::load()?
    };

    // Manual DI: main.rs is the only place that knows concrete types
    let credentials = config.credentials();
    let configured = credentials.is_some();
    let thresholds = config.thresholds();
    let sampler = SysinfoSampler::with_measure_window(config.measure_window());
    let transport = ReqwestTransport::new(config.notify_timeout())?;
    let notifier = TelegramNotifier::new(
        credentials,
        Box::new(transport),
        config.notifications.api_base.clone(),
    );

    let (interval, cycles) = match cli.command {
        Some(Commands::Status { json }) => {
            return run_status(&sampler, thresholds, config.general.top_processes, json).await;
        }
        Some(Commands::TestAlert) => return run_test_alert(&notifier).await,
        Some(Commands::Run { interval, cycles }) => (interval, cycles),
        None => (None, None),
    };

    print_banner();
    if !configured {
        tracing::warn!(
            "Telegram non configuré (TELEGRAM_TOKEN / CHAT_ID) : les alertes seront seulement affichées"
        );
    }
    let interval = interval.map_or_else(|| config.interval(), Duration::from_secs);
    let mut service = MonitorService::new(&sampler, &notifier, thresholds)
        .with_quiet_window(config.quiet_window())
        .with_history_capacity(config.general.history_capacity)
        .with_alert_log_capacity(config.general.alert_log_capacity);
    let mut display = TerminalDisplay::new(thresholds, config.general.top_processes);
    if !std::io::stdout().is_terminal() {
        display = display.without_clear();
    }
    run_monitor(&mut service, &mut display, interval, cycles).await
}
