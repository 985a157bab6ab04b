use axum::{
    extract::{FromRequest, OriginalUri, Query, Request, State},
    http::Method,
    Form,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::state::RequestId;
use crate::worker;
use crate::AppState;

use super::AppError;

// ─── Request types ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct HashForm {
    #[serde(default)]
    pub password: String,
}

// ─── ANY /hash ───────────────────────────────────────────────────

/// POST with a `password` gets a fresh identifier right away and leaves
/// the digest to a background task. Any other method, or a missing
/// password, is answered with an error and records nothing.
///
/// The recorded latency covers password extraction and validation only.
pub async fn submit_hash(
    State(state): State<Arc<AppState>>,
    req: Request,
) -> Result<String, AppError> {
    let t0 = Instant::now();

    let method = req.method().clone();
    let password = match method {
        Method::POST => extract_password(req).await,
        Method::GET => {
            if let Ok(Query(params)) = Query::<HashMap<String, String>>::try_from_uri(req.uri()) {
                for (key, value) in &params {
                    tracing::debug!(%key, %value, "GET /hash query parameter");
                }
            }
            String::new()
        }
        _ => String::new(),
    };

    if password.is_empty() {
        tracing::warn!("submission without password rejected");
        return Err(AppError::NoPassword);
    }

    let latency_us = t0.elapsed().as_micros() as u64;
    let id = state.coordinator.record_submission(latency_us);
    tracing::info!(id, latency_us, "submission accepted");

    worker::spawn_completion(state.coordinator.clone(), id, password, state.hash_delay);

    Ok(id.to_string())
}

// ─── ANY /hash/*id ───────────────────────────────────────────────

/// Everything after `/hash/` is the identifier text. Anything that does
/// not name a completed digest is an invalid link.
pub async fn lookup_hash(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
) -> Result<String, AppError> {
    let path = uri.path();
    path.strip_prefix("/hash/")
        .and_then(parse_id)
        .and_then(|id| state.coordinator.lookup_digest(id))
        .ok_or_else(|| AppError::InvalidLink(path.to_owned()))
}

// ─── Helpers ─────────────────────────────────────────────────────

/// Body fields take precedence; the query string is the fallback.
async fn extract_password(req: Request) -> String {
    let from_query = Query::<HashForm>::try_from_uri(req.uri())
        .map(|Query(form)| form.password)
        .unwrap_or_default();

    let from_body = match Form::<HashForm>::from_request(req, &()).await {
        Ok(Form(form)) => form.password,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "no form body in submission");
            String::new()
        }
    };

    if from_body.is_empty() {
        from_query
    } else {
        from_body
    }
}

/// Only the canonical decimal form names an identifier, so `01` or `+1`
/// never resolve.
fn parse_id(raw: &str) -> Option<RequestId> {
    raw.parse::<RequestId>()
        .ok()
        .filter(|id| id.to_string() == raw)
}
