//! Foyerweb main entry point

use anyhow::Context;
use clap::Parser;
use foyerweb_api::start_server;
use foyerweb_config::Config;
use foyerweb_crypto::FieldCipher;
use foyerweb_store::Store;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::Mutex;

#[derive(Parser, Debug)]
#[command(name = "foyerweb")]
#[command(version = "0.1.0")]
#[command(about = "A multi-tenant household budgeting web API", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Write a default configuration file and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    if args.init_config {
        std::fs::write(&args.config, Config::generate_default())
            .with_context(|| format!("Failed to write {}", args.config.display()))?;
        println!("Wrote default configuration to {}", args.config.display());
        return Ok(());
    }

    let config = Config::load(args.config.clone())
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;
    log::info!("Config loaded: database={}", config.database.path.display());

    let store = Store::open(&config.database.path).context("Failed to open database")?;
    let store = Arc::new(Mutex::new(store));
    let cipher = Arc::new(FieldCipher::from_secret(&config.security.encryption_key));

    let rt = Runtime::new()?;
    rt.block_on(start_server(config, store, cipher))?;

    Ok(())
}
