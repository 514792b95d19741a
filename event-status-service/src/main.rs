mod api;
mod clients;
mod handlers;
mod registry;

use anyhow::Result;
use clap::Parser;
use shared::client::PeerClient;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "event-status-service")]
struct Args {
    #[arg(long, env = "PORT", default_value = "5011")]
    port: u16,

    #[arg(long, env = "ADD_EVENT_SERVICE_URL", default_value = "http://add_event_service:5008")]
    event_service_url: String,

    #[arg(
        long,
        env = "ROOM_BOOKING_STATUS_SERVICE_URL",
        default_value = "http://room_booking_status_service:5012"
    )]
    room_booking_status_url: String,

    #[arg(long, env = "PRIMARY_TIMEOUT_SECS", default_value = "5")]
    primary_timeout_secs: u64,

    #[arg(long, env = "ENRICHMENT_TIMEOUT_SECS", default_value = "2")]
    enrichment_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    shared::telemetry::init_tracing();
    let args = Args::parse();

    let registry = Arc::new(registry::EventStatusRegistry::new());
    let events = Arc::new(clients::HttpEventLookup::new(PeerClient::new(
        &args.event_service_url,
        Duration::from_secs(args.primary_timeout_secs),
    )));
    let bookings = Arc::new(clients::HttpBookingStatusLookup::new(PeerClient::new(
        &args.room_booking_status_url,
        Duration::from_secs(args.enrichment_timeout_secs),
    )));

    let app = api::create_router(api::AppState {
        handler: Arc::new(handlers::EventStatusHandler::new(registry, events, bookings)),
    });

    shared::http::serve(app, "event-status-service", args.port).await
}
