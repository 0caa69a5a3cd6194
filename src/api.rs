use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::config::Config;
use crate::error::GenerateError;
use crate::provider::{self, ExistingRecord};
use crate::record::{self, Record, ScriptContext};
use crate::script::ScriptFormat;

pub struct AppState {
    pub config: Config,
    pub client: reqwest::Client,
    pub clock: Arc<dyn Clock>,
}

#[derive(Serialize)]
struct ValidateResponse {
    success: bool,
    zone_id: String,
    domain: String,
    records: Vec<ExistingRecord>,
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

#[derive(Deserialize)]
struct ValidateRequest {
    #[serde(default)]
    api_token: String,
    #[serde(default)]
    domain: String,
}

#[derive(Deserialize)]
struct GenerateRequest {
    #[serde(default)]
    api_token: String,
    #[serde(default)]
    domain: String,
    #[serde(default)]
    zone_id: String,
    #[serde(default)]
    records: Vec<RecordRequest>,
}

#[derive(Deserialize)]
struct RecordRequest {
    /// Subdomain label; `@` or empty for the zone apex.
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default = "default_record_type")]
    record_type: String,
    #[serde(default = "default_proxied")]
    proxied: bool,
}

fn default_record_type() -> String {
    "A".to_string()
}

fn default_proxied() -> bool {
    true
}

pub fn create_router(config: Config, clock: Arc<dyn Clock>) -> Result<Router> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.cloudflare.timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    let state = Arc::new(AppState {
        config,
        client,
        clock,
    });

    Ok(Router::new()
        .route("/validate", post(validate_config))
        .route("/scripts/{format}", post(generate_script))
        .route("/health", get(health_check))
        .layer(middleware::from_fn(access_log))
        .with_state(state))
}

async fn access_log(request: Request, next: Next) -> Response {
    let start = Instant::now();

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let user_agent = request
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let duration = start.elapsed();

    // Access log format: method path "user-agent" status duration
    info!(
        target: "access",
        "{} {} \"{}\" {} {:.3}ms",
        method, path, user_agent, status, duration.as_secs_f64() * 1000.0
    );

    response
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok"
    }))
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: error.into(),
        }),
    )
        .into_response()
}

fn malformed_body(rejection: JsonRejection) -> Response {
    warn!("Rejected malformed request body: {}", rejection.body_text());
    error_response(
        StatusCode::BAD_REQUEST,
        format!("Invalid request body: {}", rejection.body_text()),
    )
}

async fn validate_config(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };
    let api_token = request.api_token.trim();
    let domain = request.domain.trim().to_lowercase();

    if api_token.is_empty() || domain.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Please enter both API token and domain",
        );
    }

    match provider::cloudflare::validate(&state.client, &state.config.cloudflare, api_token, &domain).await {
        Ok(validation) => (
            StatusCode::OK,
            Json(ValidateResponse {
                success: true,
                zone_id: validation.zone_id,
                domain,
                records: validation.records,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Validation of {} failed: {:#}", domain, e);
            error_response(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

async fn generate_script(
    State(state): State<Arc<AppState>>,
    Path(format): Path<String>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };
    match render_request(&format, &request, state.clock.as_ref()) {
        Ok((format, domain, count, script)) => {
            info!(
                "Generated {} script for {} with {} record(s)",
                format, domain, count
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", format.default_file_name()),
                    ),
                ],
                script,
            )
                .into_response()
        }
        Err(e) => {
            warn!("Rejected script generation request: {}", e);
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
    }
}

/// Rejects unknown formats before looking at the payload.
fn render_request(
    tag: &str,
    request: &GenerateRequest,
    clock: &dyn Clock,
) -> Result<(ScriptFormat, String, usize, String), GenerateError> {
    let format: ScriptFormat = tag.parse()?;
    let (context, records) = build_inputs(request)?;
    let script = format.render(&context, &records, clock);
    Ok((format, context.domain, records.len(), script))
}

/// Turns a request into the immutable inputs of one generation run.
fn build_inputs(request: &GenerateRequest) -> Result<(ScriptContext, Vec<Record>), GenerateError> {
    if request.zone_id.trim().is_empty() {
        return Err(GenerateError::validation(
            "Configuration has not been validated",
        ));
    }

    let context = ScriptContext::new(
        request.api_token.trim(),
        &request.domain,
        request.zone_id.trim(),
    )?;

    let records = request
        .records
        .iter()
        .map(|r| record::derive_record(&r.name, &context.domain, &r.record_type, r.proxied))
        .collect::<Result<Vec<_>, _>>()?;
    record::check_record_count(&records)?;

    Ok((context, records))
}
