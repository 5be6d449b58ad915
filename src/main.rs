//! EventDesk console application
//!
//! Main application entry point

use std::process;

use tracing::{error, info};

use eventdesk::{
    config::Settings,
    services::{ConfigSession, ServiceFactory, SessionProvider},
    utils::logging,
    ConsoleUi, ReviewController,
};

#[tokio::main]
async fn main() {
    // Load configuration; a bad config is a user problem, not a panic
    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Configuration error: {err}");
            process::exit(1);
        }
    };
    if let Err(err) = settings.validate() {
        eprintln!("Configuration error: {err}");
        process::exit(1);
    }

    // Keep the guard alive for the lifetime of the process so buffered
    // log lines are flushed on exit
    let _log_guard = match logging::init_logging(&settings.logging) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Could not initialize logging: {err}");
            process::exit(1);
        }
    };

    info!("Starting EventDesk v{}", eventdesk::VERSION);

    if let Err(err) = run(settings).await {
        error!(error = %err, "EventDesk exited with an error");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

async fn run(settings: Settings) -> anyhow::Result<()> {
    let session = ConfigSession::new(settings.session.clone());
    let identity = session.current_user()?;

    let services = ServiceFactory::new(&settings)?;
    let mut ui = ConsoleUi::new();
    let mut controller = ReviewController::new(services);
    controller.run(&identity, &mut ui).await?;
    Ok(())
}
