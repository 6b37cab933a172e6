mod commands;
mod config;
mod handlers;
mod invites;
mod naming;
mod notify;
mod state;
mod ui;
mod web;

use std::sync::Arc;

use dotenvy::dotenv;
use serenity::all::{Client, GatewayIntents};
use tracing::{error, info};

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let token = config.token.clone();
    let port = config.port;
    let state = Arc::new(AppState::new(config));

    let app = web::router(state.clone());
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("HTTP server listening on port {port}");
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("HTTP server error: {e}");
        }
    });

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_INVITES;

    let mut client = Client::builder(&token, intents)
        .event_handler(handlers::Handler::new(state))
        .await?;

    client.start().await?;
    Ok(())
}
