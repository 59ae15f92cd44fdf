//! Creates the PhishGuard collections and indexes, then exits.
//!
//! Safe to run repeatedly; a second run creates nothing.

use dotenv::dotenv;
use phishguard::{config::AppConfig, database::MongoDB};
use std::process::ExitCode;

#[actix_rt::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    log::info!("🔧 Initializing database '{}' at {}", config.mongodb_database, config.mongodb_uri);

    let db = match MongoDB::new(&config).await {
        Ok(db) => db,
        Err(e) => {
            log::error!("❌ Failed to connect to MongoDB: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match db.bootstrap().await {
        Ok(report) => {
            log::info!(
                "✅ Collections: {} created, {} already present",
                report.created_collections.len(),
                report.existing_collections.len()
            );
            log::info!(
                "✅ Indexes: {} created, {} already present",
                report.created_indexes.len(),
                report.existing_indexes.len()
            );
            if !report.mismatched_indexes.is_empty() {
                log::error!(
                    "❌ Indexes with the wrong unique flag: {}",
                    report.mismatched_indexes.join(", ")
                );
                return ExitCode::FAILURE;
            }
            log::info!("🎉 Database initialized successfully!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("❌ Database bootstrap failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
