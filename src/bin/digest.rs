//! One-shot digest job: fetch the last day's listings and email them.

use dogfinder::config::Config;
use dogfinder::mailer::{DigestEmail, DigestMailer};
use dogfinder::AppState;
use log::{error, info};
use std::process::ExitCode;

fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let mailer = DigestMailer::new(&config.smtp)?;
    let recipients = config.smtp.recipients.join(", ");

    let state = AppState::new(config)?;
    let animals = state.search.digest()?;

    let email = DigestEmail::render(&animals, state.search.now());
    mailer.send(&email)?;

    info!("Sent digest with {} dogs to: {recipients}", animals.len());
    Ok(())
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = config.require_digest_settings() {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Digest failed: {e}");
            ExitCode::FAILURE
        }
    }
}
