pub mod api;
pub mod clients;
pub mod config;
pub mod db;
pub mod entities;
pub mod services;
pub mod state;

pub use config::Config;
use db::Store;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let fmt_layer = tracing_subscriber::fmt::layer();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    match args[1].as_str() {
        "serve" | "-s" | "--serve" => run_server(config).await,

        "history" | "h" => {
            let limit = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(10);
            cmd_history(&config, limit).await
        }

        "init" | "--init" => {
            Config::create_default_if_missing()?;
            println!("✓ Config file created. Edit config.toml and run again.");
            Ok(())
        }

        "help" | "-h" | "--help" => {
            print_help();
            Ok(())
        }

        _ => {
            println!("Unknown command: {}", args[1]);
            println!();
            print_help();
            Ok(())
        }
    }
}

fn print_help() {
    println!("Tunebuddy - Song Lookup From Remembered Lyrics");
    println!("Type in the lyrics you remember and get back the closest tracks");
    println!();
    println!("USAGE:");
    println!("  tunebuddy <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("  serve             Run the web application");
    println!("  history [n]       Show recent lookups (default: 10)");
    println!("  init              Create default config file");
    println!("  help              Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("  tunebuddy serve          # Start the web server");
    println!("  tunebuddy history 20     # Show the last 20 lookups");
    println!();
    println!("CONFIG:");
    println!("  Edit config.toml to set the Musixmatch API key, port, etc.");
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    info!(
        "Tunebuddy v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let state = api::create_app_state_from_config(config.clone()).await?;

    let port = config.server.port;
    let app = api::router(state).await;
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let server_handle = tokio::spawn(async move {
        info!("🌐 Web Server running at http://0.0.0.0:{}", port);
        if let Err(e) = axum::serve(listener, app).await {
            error!("Web server error: {}", e);
        }
    });

    info!("Server running. Press Ctrl+C to stop.");

    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
        }
        Err(e) => {
            error!("Error listening for shutdown: {}", e);
        }
    }

    server_handle.abort();
    info!("Server stopped");

    Ok(())
}

async fn cmd_history(config: &Config, limit: usize) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let lookups = store.list_lookups().await?;

    if lookups.is_empty() {
        println!("No lookups recorded yet.");
        println!();
        println!("Start the web app with: tunebuddy serve");
        return Ok(());
    }

    let shown: Vec<_> = lookups.iter().rev().take(limit).collect();

    println!("Recent Lookups (last {}):", shown.len());
    println!("{:-<70}", "");

    for record in shown {
        println!("• \"{}\"", record.lyrics);
        if !record.artist_name.is_empty() {
            println!("  Artist filter: {}", record.artist_name);
        }
        if !record.genre.is_empty() {
            println!("  Genre filter: {}", record.genre);
        }
        println!("  1. {}", record.first_possible_song);
        println!("  2. {}", record.second_possible_song);
        println!("  3. {}", record.third_possible_song);
        println!();
    }

    Ok(())
}
