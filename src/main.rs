use auction_hunter::application::hunt::SessionOutcome;
use auction_hunter::cli::commands::{Cli, Commands, HuntArgs, PrefsAction};
use auction_hunter::cli::prompt::TerminalPrompt;
use auction_hunter::cli::setup;
use auction_hunter::domain::ports::notifier::Notifier;
use auction_hunter::domain::ports::operator_prompt::OperatorPrompt;
use auction_hunter::domain::ports::preference_store::PreferenceKey;
use auction_hunter::domain::values::server::Server;
use auction_hunter::infrastructure::clock::TokioSleeper;
use auction_hunter::infrastructure::http::page_fetcher::HttpPageFetcher;
use auction_hunter::infrastructure::notify::log::LogNotifier;
use auction_hunter::infrastructure::notify::sendgrid::SendGridNotifier;
use auction_hunter::{AuctionHunter, HuntPorts};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let db_path =
        std::env::var("AUCTION_HUNTER_DB").unwrap_or_else(|_| "./data/auction_hunter.db".into());

    let result = match cli.command {
        Commands::Hunt(args) => run_hunt(&db_path, args).await,
        Commands::Prefs { action } => {
            init_logging(None);
            run_prefs(&db_path, action)
        }
        Commands::Servers => {
            for server in Server::all() {
                println!("{}: {}", server.name(), server.id());
            }
            Ok(())
        }
    };
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Console output filtered by `RUST_LOG`; the per-target file gets everything from debug up.
fn init_logging(log_file: Option<File>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console = fmt::layer().with_target(false).with_filter(filter);
    let file = log_file.map(|f| {
        fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(f))
            .with_filter(LevelFilter::DEBUG)
    });
    tracing_subscriber::registry().with(console).with(file).init();
}

fn open_log_file(label: &str) -> Result<File, std::io::Error> {
    let dir = PathBuf::from(std::env::var("AUCTION_HUNTER_LOG_DIR").unwrap_or_else(|_| "./logs".into()));
    std::fs::create_dir_all(&dir)?;
    File::create(dir.join(format!("{label}.log")))
}

async fn run_hunt(db_path: &str, args: HuntArgs) -> Result<(), Box<dyn std::error::Error>> {
    let prompt = TerminalPrompt;
    let target = setup::watch_target(&args, &prompt)?;

    let log_file = open_log_file(target.label());
    let log_error = log_file.as_ref().err().map(|e| e.to_string());
    init_logging(log_file.ok());
    if let Some(e) = log_error {
        warn!("Could not open log file for {}: {e}", target.label());
    }
    info!("-----================ auction_hunter ================-----");
    info!("Type ctrl + c at any time to quit.");

    let hunter = AuctionHunter::new(db_path)?;
    let prefs = hunter.preferences().resolve_all(&prompt)?;
    let config = setup::threshold(&args, &target, &prompt)?;

    let notifier: Arc<dyn Notifier> = if args.no_email {
        Arc::new(LogNotifier)
    } else {
        Arc::new(SendGridNotifier::new(
            prefs.sendgrid_key.clone(),
            prefs.notification_address.clone(),
            std::env::var("AUCTION_HUNTER_SENDGRID_URL").ok(),
        ))
    };
    let ports = HuntPorts {
        fetcher: Arc::new(HttpPageFetcher::new(prefs.server_id.clone())),
        notifier,
        sleeper: Arc::new(TokioSleeper),
    };
    let mut session = hunter.session(target, config, prefs.settings.clone(), ports)?;

    let mut outcome = session.run().await;
    loop {
        match outcome {
            SessionOutcome::Completed {
                summary,
                notified,
                attempts,
            } => {
                info!(attempts, notified, "Hunt complete: {summary}");
                if !prompt.confirm("Would you like to run the script again?")? {
                    break;
                }
                session.restart();
                outcome = session.run().await;
            }
            SessionOutcome::AwaitingOperatorDecision {
                consecutive_failures,
                last_error,
            } => {
                warn!(
                    consecutive_failures,
                    kind = last_error.kind(),
                    "Stopped after repeated failures: {last_error}"
                );
                if !prompt.confirm("Would you like to resume the script and keep trying?")? {
                    break;
                }
                outcome = session.resume().await;
            }
        }
    }
    Ok(())
}

fn run_prefs(db_path: &str, action: PrefsAction) -> Result<(), Box<dyn std::error::Error>> {
    let hunter = AuctionHunter::new(db_path)?;
    let prefs = hunter.preferences();
    match action {
        PrefsAction::Show => {
            println!("{}", serde_json::to_string_pretty(&prefs.list()?)?);
        }
        PrefsAction::Set { key, value } => {
            let key: PreferenceKey = key.parse().map_err(|e: String| e)?;
            let stored = prefs.set(key, &value)?;
            if key.is_secret() {
                println!("{key} saved");
            } else {
                println!("{key} = {stored}");
            }
        }
        PrefsAction::Clear { key } => {
            let key: PreferenceKey = key.parse().map_err(|e: String| e)?;
            if prefs.clear(key)? {
                println!("{key} cleared");
            } else {
                println!("{key} was not set");
            }
        }
    }
    Ok(())
}
