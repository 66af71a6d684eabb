mod app;
mod auth;
mod nav;
mod pages;
mod paths;
mod profile;
mod settings;

use std::fs::{self, File};
use std::sync::Arc;

use simplelog::{Config, LevelFilter, WriteLogger};
use stockdom::Terminal;

use crate::app::{App, AppError};
use crate::auth::LogOnlyAuth;
use crate::settings::{Settings, SqliteBackend};

fn init_logging() {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        eprintln!("no cache directory, logging disabled");
        return;
    };
    if let Some(dir) = path.parent()
        && let Err(err) = fs::create_dir_all(dir)
    {
        eprintln!("could not create {}: {err}", dir.display());
        return;
    }
    match File::create(&path) {
        Ok(file) => {
            if let Err(err) = WriteLogger::init(LevelFilter::Debug, Config::default(), file) {
                eprintln!("could not initialize logger: {err}");
            }
        }
        Err(err) => eprintln!("could not create {}: {err}", path.display()),
    }
}

async fn open_settings() -> Result<Settings, AppError> {
    let Some(path) = paths::settings_db() else {
        log::warn!("no data directory, settings will not persist");
        return Ok(Settings::new(SqliteBackend::in_memory().await?));
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    log::info!("settings at {}", path.display());
    Ok(Settings::new(SqliteBackend::open(&path).await?))
}

async fn run() -> Result<(), AppError> {
    let settings = open_settings().await?;
    let app = App::new(settings, Arc::new(LogOnlyAuth)).await?;
    let mut terminal = Terminal::new()?;
    app.run(&mut terminal).await
}

#[tokio::main]
async fn main() {
    init_logging();
    log::info!("stockdash starting");

    if let Err(e) = run().await {
        log::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    log::info!("stockdash stopped");
}
