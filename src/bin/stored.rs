use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use anyhow::Context;
use clap::Parser;
use movie_store::engine::{seed, MemStore};
use movie_store::server::{Server, ServerConfig};
use movie_store::Catalog;
use tokio::signal;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long)]
    port: Option<u16>,

    /// JSON file holding the initial movies. Defaults to the bundled seed.
    #[arg(short, long)]
    seed: Option<PathBuf>,

    /// Origin allowed to call the API from a browser. May be repeated.
    #[arg(short = 'o', long = "allowed-origin")]
    allowed_origins: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut config = ServerConfig::default();

    if let Some(port) = args.port {
        config.port = port;
    } else if let Ok(port) = env::var("PORT") {
        config.port = port.parse().with_context(|| format!("invalid PORT {:?}", port))?;
    }

    if !args.allowed_origins.is_empty() {
        config.allowed_origins = args.allowed_origins;
    } else if let Ok(origins) = env::var("MOVIES_ALLOWED_ORIGINS") {
        config.allowed_origins = origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
    }

    let seed_path = args.seed.or_else(|| env::var_os("MOVIES_SEED_FILE").map(PathBuf::from));
    let movies = match &seed_path {
        Some(path) => seed::load(path).with_context(|| format!("failed to load seed {:?}", path))?,
        None => seed::builtin()?,
    };

    let store = Arc::new(MemStore::new(movies));
    let port = config.port;
    let server = Server::new(Catalog::new(store.clone()), config);

    println!("Starting Movie Store Daemon...");
    println!("Engine started. Loaded {} movies.", store.count()?);
    println!("Movie Store listening on http://localhost:{}", port);

    let shutdown = async {
        let _ = signal::ctrl_c().await;
        println!("\nShutdown signal received. Draining in-flight requests...");
    };

    if let Err(e) = server.listen(shutdown).await {
        eprintln!("HTTP server failed: {}", e);
    }

    println!("Exiting.");
    Ok(())
}
