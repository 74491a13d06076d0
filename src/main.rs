use std::process::ExitCode;

use log::{error, info};
use pico_args::Arguments;

use petflix::commands::{self, AppState, USAGE};
use petflix::libs::config::Config;
use petflix::PetflixError;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{}", USAGE);
        return Ok(ExitCode::SUCCESS);
    }

    let invocation = match commands::parse(args) {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("{}\n\n{}", err, USAGE);
            return Ok(ExitCode::from(2));
        }
    };

    let config = match &invocation.config_path {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    let state = AppState::setup(&config)?;

    info!("Running {:?}", invocation.command);
    match commands::run(&state, invocation.command).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err @ PetflixError::VideoNotFound(_)) | Err(err @ PetflixError::DataUnavailable(_)) => {
            error!("{}", err);
            println!("{}", serde_json::json!({ "error": err }));
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err.into()),
    }
}
