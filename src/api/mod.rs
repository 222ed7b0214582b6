mod report;

use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Args, Parser, Subcommand};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{FilingStatus, TaxInput, compute_breakdown};

pub use report::{format_money, render_report};

#[derive(Debug, Parser)]
#[command(
    name = "taxcalc",
    about = "US federal income tax estimator (2024 brackets, single or married filing jointly)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate tax for one household and print the result.
    Compute(ComputeArgs),
    /// Serve the JSON API.
    Serve {
        #[arg(default_value_t = 8080)]
        port: u16,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ComputeArgs {
    #[command(flatten)]
    pub tax: TaxArgs,
    #[arg(long, help = "Print the full breakdown as JSON")]
    pub json: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct TaxArgs {
    #[arg(long, default_value_t = 0.0)]
    pub total_compensation: f64,
    #[arg(long, default_value_t = 0.0)]
    pub extra_income: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "401(k), employer HSA and other amounts excluded from take-home pay"
    )]
    pub pre_tax_deductions: f64,
    #[arg(long, default_value_t = 0.0)]
    pub roth_conversions: f64,
    #[arg(long, default_value_t = 0.0)]
    pub mortgage_interest: f64,
    #[arg(
        long = "ira-contributions",
        default_value_t = 0.0,
        help = "Traditional and Roth IRA contributions combined"
    )]
    pub traditional_roth_ira_contributions: f64,
    #[arg(long, default_value_t = 0.0)]
    pub student_loan_interest: f64,
    #[arg(long, default_value_t = 0.0)]
    pub hsa_contributions: f64,
    #[arg(long, default_value_t = 0.0)]
    pub property_taxes: f64,
    #[arg(long, default_value_t = 0.0)]
    pub state_local_taxes: f64,
    #[arg(long, default_value_t = 0.0)]
    pub charitable_contributions: f64,
    #[arg(long, help = "single or married; anything else is treated as married")]
    pub filing_status: Option<String>,
    #[arg(long, help = "Reject unknown filing statuses instead of falling back to married")]
    pub strict: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TaxPayload {
    #[serde(deserialize_with = "blank_amount")]
    total_compensation: Option<f64>,
    #[serde(deserialize_with = "blank_amount")]
    extra_income: Option<f64>,
    #[serde(deserialize_with = "blank_amount")]
    pre_tax_deductions: Option<f64>,
    #[serde(deserialize_with = "blank_amount")]
    roth_conversions: Option<f64>,
    #[serde(deserialize_with = "blank_amount")]
    mortgage_interest: Option<f64>,
    #[serde(deserialize_with = "blank_amount")]
    traditional_roth_ira_contributions: Option<f64>,
    #[serde(deserialize_with = "blank_amount")]
    student_loan_interest: Option<f64>,
    #[serde(deserialize_with = "blank_amount")]
    hsa_contributions: Option<f64>,
    #[serde(deserialize_with = "blank_amount")]
    property_taxes: Option<f64>,
    #[serde(deserialize_with = "blank_amount")]
    state_local_taxes: Option<f64>,
    #[serde(deserialize_with = "blank_amount")]
    charitable_contributions: Option<f64>,
    filing_status: Option<String>,
    strict: Option<bool>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountField {
    Number(f64),
    Text(String),
}

/// Form fields arrive as numbers (JSON) or strings (query); empty means blank.
fn blank_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<AmountField>::deserialize(deserializer)? {
        None => Ok(None),
        Some(AmountField::Number(v)) => Ok(Some(v)),
        Some(AmountField::Text(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                trimmed
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| D::Error::custom(format!("invalid amount '{raw}'")))
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn build_input(args: &TaxArgs) -> Result<TaxInput, String> {
    let filing_status =
        FilingStatus::resolve(args.filing_status.as_deref().unwrap_or(""), args.strict)
            .map_err(|e| e.to_string())?;

    let input = TaxInput {
        total_compensation: args.total_compensation,
        extra_income: args.extra_income,
        pre_tax_deductions: args.pre_tax_deductions,
        roth_conversions: args.roth_conversions,
        mortgage_interest: args.mortgage_interest,
        student_loan_interest: args.student_loan_interest,
        hsa_contributions: args.hsa_contributions,
        property_taxes: args.property_taxes,
        state_local_taxes: args.state_local_taxes,
        charitable_contributions: args.charitable_contributions,
        traditional_roth_ira_contributions: args.traditional_roth_ira_contributions,
        filing_status,
    };
    input.validate().map_err(|e| e.to_string())?;
    Ok(input)
}

pub fn run_compute(args: &ComputeArgs) -> Result<String, String> {
    let input = build_input(&args.tax)?;
    let breakdown = compute_breakdown(&input);
    tracing::debug!(
        filing_status = %breakdown.filing_status,
        final_taxable = breakdown.final_taxable,
        tax = breakdown.result.tax,
        "computed tax"
    );
    if args.json {
        serde_json::to_string_pretty(&breakdown)
            .map_err(|e| format!("Failed to serialize result: {e}"))
    } else {
        Ok(render_report(&input, &breakdown))
    }
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/tax", get(tax_get_handler).post(tax_post_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "tax API listening");

    axum::serve(listener, app).await
}

async fn health_handler() -> impl IntoResponse {
    with_cache_control("ok")
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn tax_get_handler(Query(payload): Query<TaxPayload>) -> Response {
    tax_response(payload)
}

async fn tax_post_handler(Json(payload): Json<TaxPayload>) -> Response {
    tax_response(payload)
}

fn tax_response(payload: TaxPayload) -> Response {
    let args = tax_args_from_payload(payload);
    let input = match build_input(&args) {
        Ok(input) => input,
        Err(msg) => {
            tracing::warn!(error = %msg, "rejected tax request");
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    let breakdown = compute_breakdown(&input);
    tracing::debug!(
        filing_status = %breakdown.filing_status,
        tax = breakdown.result.tax,
        "tax request served"
    );
    json_response(StatusCode::OK, breakdown)
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
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
fn tax_args_from_json(json: &str) -> Result<TaxArgs, String> {
    let payload = serde_json::from_str::<TaxPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    Ok(tax_args_from_payload(payload))
}

fn tax_args_from_payload(payload: TaxPayload) -> TaxArgs {
    TaxArgs {
        total_compensation: payload.total_compensation.unwrap_or(0.0),
        extra_income: payload.extra_income.unwrap_or(0.0),
        pre_tax_deductions: payload.pre_tax_deductions.unwrap_or(0.0),
        roth_conversions: payload.roth_conversions.unwrap_or(0.0),
        mortgage_interest: payload.mortgage_interest.unwrap_or(0.0),
        traditional_roth_ira_contributions: payload
            .traditional_roth_ira_contributions
            .unwrap_or(0.0),
        student_loan_interest: payload.student_loan_interest.unwrap_or(0.0),
        hsa_contributions: payload.hsa_contributions.unwrap_or(0.0),
        property_taxes: payload.property_taxes.unwrap_or(0.0),
        state_local_taxes: payload.state_local_taxes.unwrap_or(0.0),
        charitable_contributions: payload.charitable_contributions.unwrap_or(0.0),
        filing_status: payload.filing_status,
        strict: payload.strict.unwrap_or(false),
    }
}
