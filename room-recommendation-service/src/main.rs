mod api;
mod clients;
mod handlers;
mod ranking;

use anyhow::Result;
use clap::Parser;
use shared::client::PeerClient;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "room-recommendation-service")]
struct Args {
    #[arg(long, env = "PORT", default_value = "5002")]
    port: u16,

    #[arg(long, env = "ROOM_AVAILABILITY_SERVICE_URL", default_value = "http://room_availability_service:5001")]
    room_availability_url: String,

    #[arg(long, env = "PRIMARY_TIMEOUT_SECS", default_value = "5")]
    primary_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    shared::telemetry::init_tracing();
    let args = Args::parse();

    let rooms = Arc::new(clients::HttpRoomCatalog::new(PeerClient::new(
        &args.room_availability_url,
        Duration::from_secs(args.primary_timeout_secs),
    )));

    let app = api::create_router(api::AppState {
        handler: Arc::new(handlers::RecommendationHandler::new(rooms)),
    });

    shared::http::serve(app, "room-recommendation-service", args.port).await
}
