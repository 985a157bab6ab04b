use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::time::Instant;

const RESPONSE_TIME_HEADER: &str = "x-response-time-us";
const SERVER_TIMING_HEADER: &str = "server-timing";

/// Stamps every response with how long the router took to answer it,
/// in microseconds (`X-Response-Time-Us`) and milliseconds
/// (`Server-Timing: total;dur=…`), and logs the request at debug level.
pub async fn timing_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let start = Instant::now();
    let mut response = next.run(req).await;
    let elapsed = start.elapsed();
    let elapsed_us = elapsed.as_micros() as u64;

    let headers = response.headers_mut();
    if let Ok(val) = HeaderValue::from_str(&elapsed_us.to_string()) {
        headers.insert(RESPONSE_TIME_HEADER, val);
    }
    let millis = elapsed.as_secs_f64() * 1000.0;
    if let Ok(val) = HeaderValue::from_str(&format!("total;dur={millis:.3}")) {
        headers.insert(SERVER_TIMING_HEADER, val);
    }

    let status = response.status().as_u16();
    tracing::debug!(%method, %path, status, elapsed_us, "request served");

    response
}
