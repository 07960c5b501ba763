use place_reviews::api::runtime::RuntimeClient;
use place_reviews::{InvocationEvent, PlaceService, CONFIG};
use reqwest::Client;
use std::env;
use std::error::Error;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .init();

    let runtime_api = env::var("AWS_LAMBDA_RUNTIME_API")
        .map_err(|_| "AWS_LAMBDA_RUNTIME_API is not set")?;

    let config = CONFIG.clone();
    info!(
        "Starting place reviews handler (region {}, secret {}, max-age {}s)",
        config.region, config.secret_name, config.cache_max_age
    );
    if config.place_id.is_none() {
        warn!("GOOGLE_PLACE_ID is not set, requests will fail");
    }

    let runtime = RuntimeClient::new(Client::new(), &runtime_api);
    let mut service = PlaceService::new(config);

    loop {
        let invocation = match runtime.next_invocation().await {
            Ok(invocation) => invocation,
            Err(e) => {
                error!("Failed to fetch next invocation: {}", e);
                return Err(e);
            }
        };

        let event = match InvocationEvent::try_from(invocation.payload) {
            Ok(event) => event,
            Err(e) => {
                error!("Invalid event for {}: {}", invocation.request_id, e);
                if let Err(e) = runtime
                    .send_error(&invocation.request_id, "InvalidEvent", &e.to_string())
                    .await
                {
                    error!("Failed to report invocation error: {}", e);
                }
                continue;
            }
        };

        let response = service.handle(&event).await;
        if let Err(e) = runtime.send_response(&invocation.request_id, &response).await {
            error!("Failed to send response for {}: {}", invocation.request_id, e);
        }
    }
}
