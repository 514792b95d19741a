mod api;
mod calendar;
mod clients;
mod handlers;

use anyhow::Result;
use clap::Parser;
use shared::client::PeerClient;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "event-calendar-service")]
struct Args {
    #[arg(long, env = "PORT", default_value = "5013")]
    port: u16,

    #[arg(long, env = "ADD_EVENT_SERVICE_URL", default_value = "http://add_event_service:5008")]
    event_service_url: String,

    #[arg(long, env = "PRIMARY_TIMEOUT_SECS", default_value = "5")]
    primary_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    shared::telemetry::init_tracing();
    let args = Args::parse();

    let events = Arc::new(clients::HttpEventSource::new(PeerClient::new(
        &args.event_service_url,
        Duration::from_secs(args.primary_timeout_secs),
    )));

    let app = api::create_router(api::AppState {
        handler: Arc::new(handlers::CalendarHandler::new(events)),
    });

    shared::http::serve(app, "event-calendar-service", args.port).await
}
