use axum::{
    Router,
    extract::{Json, Query},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::core::{
    CompanyReport, EntropyNews, FinancialHistory, FinancialRecord, NewsSource, RiskAssessment,
    Rng, assess, build_report, csv_file_name, name_seed, summarize, synthesize, to_csv,
};

mod cli;

pub use cli::{Cli, Command, ReportArgs, render_report, run_report};

pub const DEFAULT_COMPANY: &str = "Roshen";
const MAX_NAME_CHARS: usize = 256;
const MAX_RECORDS: usize = 1_000;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CompanyPayload {
    name: Option<String>,
    news_seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AssessPayload {
    records: Option<Vec<FinancialRecord>>,
    news_seed: Option<u64>,
}

#[derive(Debug)]
struct CompanyRequest {
    company: String,
    news_seed: Option<u64>,
}

#[derive(Debug)]
struct AssessRequest {
    history: FinancialHistory,
    news_seed: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompanyResponse<'a> {
    #[serde(flatten)]
    report: &'a CompanyReport,
    score_label: String,
    seed_length: u64,
    news_seeded: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AssessResponse<'a> {
    #[serde(flatten)]
    assessment: &'a RiskAssessment,
    score_label: String,
    summary: String,
    records: usize,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/company",
            get(company_get_handler).post(company_post_handler),
        )
        .route("/api/company/csv", get(company_csv_handler))
        .route("/api/assess", post(assess_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "company microscope API listening");
    info!("local access: http://127.0.0.1:{port}/api/company?name={DEFAULT_COMPANY}");

    axum::serve(listener, app).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn company_get_handler(Query(payload): Query<CompanyPayload>) -> Response {
    company_handler_impl(payload)
}

async fn company_post_handler(Json(payload): Json<CompanyPayload>) -> Response {
    company_handler_impl(payload)
}

async fn company_csv_handler(Query(payload): Query<CompanyPayload>) -> Response {
    let request = match company_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };
    csv_download_response(&request.company)
}

async fn assess_handler(Json(payload): Json<AssessPayload>) -> Response {
    assess_handler_impl(payload)
}

fn assess_handler_impl(payload: AssessPayload) -> Response {
    let request = match assess_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    let mut news = news_source(request.news_seed);
    match assess(&request.history, news.as_mut()) {
        Ok(assessment) => json_response(
            StatusCode::OK,
            AssessResponse {
                score_label: assessment.score_label(),
                summary: summarize(&assessment),
                records: request.history.len(),
                assessment: &assessment,
            },
        ),
        Err(err) => {
            warn!(%err, "rejected assessment request");
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
    }
}

fn company_handler_impl(payload: CompanyPayload) -> Response {
    let request = match company_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    let mut news = news_source(request.news_seed);
    let report = match build_report(&request.company, news.as_mut()) {
        Ok(report) => report,
        Err(err) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string()),
    };

    json_response(StatusCode::OK, build_company_response(&report, &request))
}

fn build_company_response<'a>(
    report: &'a CompanyReport,
    request: &CompanyRequest,
) -> CompanyResponse<'a> {
    CompanyResponse {
        report,
        score_label: report.assessment.score_label(),
        seed_length: name_seed(&request.company),
        news_seeded: request.news_seed.is_some(),
    }
}

fn csv_download_response(company: &str) -> Response {
    let csv = match to_csv(&synthesize(company)) {
        Ok(csv) => csv,
        Err(err) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string()),
    };
    let disposition = match HeaderValue::from_str(&content_disposition(&csv_file_name(company))) {
        Ok(value) => value,
        Err(err) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string()),
    };

    with_cache_control((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/csv; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

/// Seeded draws when the caller pins `news_seed`, fresh entropy otherwise.
fn news_source(seed: Option<u64>) -> Box<dyn NewsSource> {
    match seed {
        Some(seed) => Box::new(Rng::new(seed)),
        None => Box::new(EntropyNews),
    }
}

/// `attachment` disposition with an ASCII fallback name plus the RFC 5987
/// encoded original name.
fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let mut encoded = String::with_capacity(file_name.len() * 3);
    for byte in file_name.bytes() {
        if byte.is_ascii_alphanumeric() || b"-._~".contains(&byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }

    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn company_request_from_json(json: &str) -> Result<CompanyRequest, String> {
    let payload = serde_json::from_str::<CompanyPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    company_request_from_payload(payload)
}

#[cfg(test)]
fn assess_request_from_json(json: &str) -> Result<AssessRequest, String> {
    let payload = serde_json::from_str::<AssessPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    assess_request_from_payload(payload)
}

fn company_request_from_payload(payload: CompanyPayload) -> Result<CompanyRequest, String> {
    let company = payload
        .name
        .unwrap_or_else(|| DEFAULT_COMPANY.to_string());
    if company.chars().count() > MAX_NAME_CHARS {
        return Err(format!("name must be at most {MAX_NAME_CHARS} characters"));
    }

    Ok(CompanyRequest {
        company,
        news_seed: payload.news_seed,
    })
}

fn assess_request_from_payload(payload: AssessPayload) -> Result<AssessRequest, String> {
    let Some(records) = payload.records else {
        return Err("records is required".to_string());
    };
    if records.len() > MAX_RECORDS {
        return Err(format!("records must hold at most {MAX_RECORDS} entries"));
    }
    if records.windows(2).any(|w| w[1].year <= w[0].year) {
        return Err("records must be in strictly ascending year order".to_string());
    }

    Ok(AssessRequest {
        history: FinancialHistory::from_records(records),
        news_seed: payload.news_seed,
    })
}
