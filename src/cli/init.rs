//! Init command implementation

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use tense_master::config::Config;
use tense_master::store::SqliteStore;

/// Write the config file and create the database
pub async fn init_command(config_path: Option<&Path>, force: bool) -> Result<()> {
    let config_path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(Config::global_config_path);

    let config = if config_path.exists() && !force {
        println!("Config already exists at {} (use --force to overwrite)", config_path.display());
        Config::from_file(&config_path)?
    } else {
        let config = Config::with_defaults();
        config.save_to_file(&config_path)?;
        println!("Wrote {}", config_path.display());
        config
    };

    let db_path = config.database_path();
    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("Failed to create database: {}", db_path.display()))?;
    println!(
        "Database ready at {} (schema v{})",
        db_path.display(),
        store.database().schema_version()?
    );
    Ok(())
}
