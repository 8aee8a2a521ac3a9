use std::io;
use std::net::SocketAddr;

use axum::Router;
use axum::routing::get;
use clap::Parser;
use tower_http::cors::CorsLayer;
use tracing::info;

use adapters::{AppState, create_game, handle_connection, list_games};
use domain::GameConfig;

#[derive(Parser)]
#[command(name = "server", about = "Liar's Deck game server")]
struct Args {
    /// Address to listen on
    #[arg(long, env = "LIARS_DECK_ADDR", default_value = "0.0.0.0:3000")]
    addr: SocketAddr,

    /// Seed for every session's shuffles and revolvers, for reproducible tables
    #[arg(long, env = "LIARS_DECK_SEED")]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if let Some(seed) = args.seed {
        info!(seed, "Seeding session random sources");
    }

    let app_state = AppState::in_memory(GameConfig::default(), args.seed);

    let app = Router::new()
        .route("/ws/{game_code}/{player_id}", get(handle_connection))
        .route("/games", get(list_games).post(create_game))
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    info!(addr = %args.addr, "Server listening");
    axum::serve(listener, app).await?;
    info!("Server shut down");
    Ok(())
}
