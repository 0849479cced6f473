mod cache;
mod cli;
mod config;
mod engine;
mod handlers;
mod http;
mod importer;
mod init;
mod topk;
mod trie;

use std::{path::PathBuf, sync::Arc};

use clap::Parser;

use cli::Commands;
use engine::Engine;
use handlers::Ctx;

#[tokio::main]
async fn main() {
    init::init_logger();

    let cli = cli::Cli::parse();

    // Handle CLI flags.
    if let Some(cmd) = cli.command {
        match cmd {
            // Generate a new config file.
            Commands::NewConfig { path } => {
                match config::generate_sample(&path) {
                    Ok(_) => {
                        log::info!("config file generated: {}", path.display());
                    }
                    Err(e) => {
                        log::error!("error generating config: {}", e);
                        std::process::exit(1);
                    }
                }
                return;
            }
        }
    }

    // Load config.
    let config = init::init_config(&cli.config);

    // --dict flag overrides the config value.
    let dict_file = cli
        .dict
        .unwrap_or_else(|| PathBuf::from(&config.app.dict_file));

    // Initialize the engine.
    let engine = Arc::new(Engine::new(&config.engine, &config.cache));

    // Bulk-load the dictionary before accepting connections.
    match importer::load_wordlist(&dict_file, &engine, config.app.max_word_len) {
        Ok(n) => log::info!("loaded {} words from {}", n, dict_file.display()),
        Err(e) => {
            log::error!("error loading dictionary {}: {}", dict_file.display(), e);
            std::process::exit(1);
        }
    }

    // Setup the global app context used in HTTP handlers.
    let ctx = Arc::new(Ctx { engine });

    // Start the HTTP server.
    let routes = http::init_handlers(ctx);
    let addr = config.app.address;

    log::info!("starting server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("error listening on {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, routes).await {
        log::error!("server error: {}", e);
        std::process::exit(1);
    }
}
