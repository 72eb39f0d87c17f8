/// HTTP transport for the gateway
///
/// Mounts the gateway behind an axum router. All requests and sweep ticks
/// go through one mutex, so the gateway sees one event at a time just as
/// it would on a single-threaded event loop. Tool callbacks run while the
/// lock is held: a slow tool stalls every other request.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::gateway::{Gateway, GatewayRequest, GatewayResponse};
use crate::ServerError;

/// Largest request body accepted, in bytes
pub const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Gateway shared between the router and the session sweeper
pub type SharedGateway = Arc<Mutex<Gateway>>;

/// Router sending every path to the gateway
pub fn router(gateway: SharedGateway) -> Router {
    Router::new().fallback(handle).with_state(gateway)
}

async fn handle(State(gateway): State<SharedGateway>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(body) => body,
        Err(e) => {
            warn!("Failed to read request body: {}", e);
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };

    let request = GatewayRequest {
        method: parts.method,
        path: parts.uri.path().to_string(),
        headers: parts.headers,
        body,
    };

    let response = gateway
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .handle(request);

    into_response(response)
}

/// Convert a gateway response into an axum response
pub fn into_response(response: GatewayResponse) -> Response {
    let mut builder = Response::builder().status(response.status);
    for (name, value) in response.headers {
        builder = builder.header(name, value);
    }

    builder.body(Body::from(response.body)).unwrap_or_else(|e| {
        error!("Failed to build HTTP response: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    })
}

/// Run the session sweep once per `period`
///
/// The first tick fires one full period after the sweeper starts.
pub fn spawn_session_sweeper(gateway: SharedGateway, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let start = tokio::time::Instant::now() + period;
        let mut interval = tokio::time::interval_at(start, period);
        loop {
            interval.tick().await;
            gateway
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .sweep_sessions();
        }
    })
}

/// Serve the gateway on `bind` until Ctrl-C is received
pub async fn serve(gateway: Gateway, bind: &str) -> Result<(), ServerError> {
    let period = gateway.config().session_timeout();
    let entry_point = gateway.config().entry_point.clone();
    let gateway: SharedGateway = Arc::new(Mutex::new(gateway));

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Listening on {} (MCP endpoint {})", listener.local_addr()?, entry_point);

    let sweeper = spawn_session_sweeper(Arc::clone(&gateway), period);

    axum::serve(listener, router(gateway))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await?;

    sweeper.abort();
    info!("HTTP transport shut down");
    Ok(())
}
