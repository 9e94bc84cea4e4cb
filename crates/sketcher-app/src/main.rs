//! Main application entry point.

use clap::Parser;
use sketcher_app::{AppConfig, AppError, SessionOptions, run_session};
use sketcher_core::Storage;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "sketcher", about = "Open, script and save Sketcher documents")]
struct Cli {
    /// JSON configuration file.
    #[arg(long, env = "SKETCHER_CONFIG")]
    config: Option<PathBuf>,

    /// Document to open before replaying.
    #[arg(long)]
    open: Option<String>,

    /// Session script to replay.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Save the resulting document under this name.
    #[arg(long)]
    save: Option<String>,

    /// List saved documents and exit.
    #[arg(long)]
    list: bool,

    /// Print the resulting document as JSON.
    #[arg(long)]
    print: bool,
}

fn run(cli: Cli, config: &AppConfig) -> Result<(), AppError> {
    let storage = config.storage()?;
    log::debug!("Documents stored in {}", storage.base_path().display());

    if cli.list {
        for name in storage.list()? {
            println!("{name}");
        }
        return Ok(());
    }

    let options = SessionOptions {
        open: cli.open,
        script: cli.script,
        save: cli.save,
    };
    let (editor, _) = run_session(config, &options, &storage)?;

    if cli.print {
        let json = editor
            .document()
            .to_json()
            .map_err(sketcher_core::EditorError::from)?;
        println!("{json}");
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.config.as_deref().map(AppConfig::load).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_filter.as_str()),
    )
    .init();
    log::info!("Starting Sketcher");

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
