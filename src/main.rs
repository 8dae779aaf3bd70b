#[macro_use]
extern crate rocket;

use std::process;

use catproxy::cli::{self, Cli};
use catproxy::config::AppConfig;
use clap::Parser;
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use rocket::{
    figment::{
        providers::{Format, Toml},
        Figment, Profile,
    },
    Config,
};

#[launch]
async fn rocket() -> _ {
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    let address = match cli::resolve_host(&cli.host, cli.port).await {
        Ok(address) => address,
        Err(e) => {
            error!("Failed to resolve host '{}': {}", cli.host, e);
            process::exit(1);
        }
    };

    // Load config, command-line flags win
    let figment = Figment::from(Config::default()).merge(Toml::file("App.toml").nested());
    let figment = cli
        .merge_into(figment, address)
        .select(Profile::from_env_or("APP_PROFILE", "default"));

    let config = match figment.extract::<AppConfig>() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    info!("Configuration loaded successfully");
    info!(
        "Starting catproxy on http://{}:{}/ (cache: {})",
        cli.host,
        config.port,
        config.cache_dir.display()
    );

    match catproxy::build(figment, config).await {
        Ok(rocket) => rocket,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
