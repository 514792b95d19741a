mod api;
mod clients;
mod handlers;

use anyhow::Result;
use clap::Parser;
use shared::client::PeerClient;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "room-booking-status-service")]
struct Args {
    #[arg(long, env = "PORT", default_value = "5012")]
    port: u16,

    #[arg(
        long,
        env = "BOOKING_CONFIRMATION_SERVICE_URL",
        default_value = "http://booking_confirmation_service:5006"
    )]
    booking_confirmation_url: String,

    #[arg(long, env = "ROOM_AVAILABILITY_SERVICE_URL", default_value = "http://room_availability_service:5001")]
    room_availability_url: String,

    #[arg(long, env = "PRIMARY_TIMEOUT_SECS", default_value = "5")]
    primary_timeout_secs: u64,

    #[arg(long, env = "ENRICHMENT_TIMEOUT_SECS", default_value = "2")]
    enrichment_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    shared::telemetry::init_tracing();
    let args = Args::parse();

    let mirror = Arc::new(clients::HttpMirrorSource::new(PeerClient::new(
        &args.booking_confirmation_url,
        Duration::from_secs(args.primary_timeout_secs),
    )));
    let rooms = Arc::new(clients::HttpRoomLookup::new(PeerClient::new(
        &args.room_availability_url,
        Duration::from_secs(args.enrichment_timeout_secs),
    )));

    let app = api::create_router(api::AppState {
        handler: Arc::new(handlers::BookingStatusHandler::new(mirror, rooms)),
    });

    shared::http::serve(app, "room-booking-status-service", args.port).await
}
