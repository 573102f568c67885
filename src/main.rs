use anyhow::{Context, Result};
use rusqlite::Connection;
use school_menus::config::ImportConfig;
use school_menus::extraction_errors::ExtractionError;
use school_menus::localization::LocalizationManager;
use school_menus::{db, import};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting school menu import");

    let config = ImportConfig::from_env()?;
    let localization = LocalizationManager::new()?;

    info!("Initializing database at: {}", config.database_url);
    let mut conn = Connection::open(&config.database_url)
        .with_context(|| format!("Failed to open database {}", config.database_url))?;
    db::init_database_schema(&conn)?;

    match import::run_import(&mut conn, &config) {
        Ok(summary) => {
            for line in summary.messages(&localization, &config.language) {
                info!("{}", line);
            }
            Ok(())
        }
        Err(err) => {
            if let Some(extraction_error) = err.downcast_ref::<ExtractionError>() {
                error!(
                    "{}",
                    localization.extraction_error(extraction_error, &config.language)
                );
            } else {
                error!("Import failed: {:#}", err);
            }
            Err(err)
        }
    }
}
