use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let started = Instant::now();
    let response = next.run(req).await;
    let elapsed = started.elapsed();

    log::info!("{} {} {} {:?}", method, path, response.status().as_u16(), elapsed);
    response
}
