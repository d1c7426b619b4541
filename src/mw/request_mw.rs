use std::time::Instant;

use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use tracing::{info, warn};

pub async fn request_mw(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(req).await;
    let status = response.status();
    let elapsed = started.elapsed().as_millis();

    if status.is_server_error() {
        warn!("{} {} -> {} ({} ms)", method, path, status, elapsed);
    } else {
        info!("{} {} -> {} ({} ms)", method, path, status, elapsed);
    }

    response
}
