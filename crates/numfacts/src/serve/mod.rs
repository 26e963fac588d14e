use crate::prelude::{eprintln, *};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use numfacts_core::classify::{build_output, classify, parse_number};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::facts::{self, FactsConfig};

/// Message returned on every enrichment failure, whatever the cause
const ENRICHMENT_ERROR: &str = "Error fetching fun fact from Numbers API";

#[derive(Debug, clap::Args)]
pub struct ServeOptions {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,
}

/// Read-only state shared by every request handler
pub struct ServerState {
    client: reqwest::Client,
    facts: FactsConfig,
    verbose: bool,
}

/// Query parameters accepted by the classification endpoint
#[derive(Debug, serde::Deserialize)]
pub struct ClassifyParams {
    pub number: Option<String>,
}

/// Payload returned when the candidate number fails validation.
///
/// The invalid input is echoed back; the key is omitted entirely when the
/// parameter was absent from the request.
#[derive(Debug, serde::Serialize)]
pub struct InvalidInputBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    pub error: bool,
}

/// Payload returned when the Numbers API lookup fails
#[derive(Debug, serde::Serialize)]
pub struct EnrichmentErrorBody {
    pub error: String,
}

/// Module entry point
pub async fn run(options: ServeOptions, global: crate::Global) -> Result<()> {
    let facts_config = FactsConfig::from_env().with_overrides(global.numbers_api_base_url.clone());
    let client = facts::create_client(&facts_config)?;

    if global.verbose {
        eprintln!("Numbers API base: {}", facts_config.base_url);
        eprintln!("Request timeout: {}s", facts_config.timeout);
    }

    let state = Arc::new(ServerState {
        client,
        facts: facts_config,
        verbose: global.verbose,
    });

    let addr = format!("{}:{}", options.host, options.port);
    let app_router = router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    eprintln!("numfacts API listening on http://{}", addr);
    eprintln!(
        "Classification endpoint: http://{}/api/classify-number?number=42",
        addr
    );

    axum::serve(listener, app_router)
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

/// Build the API router
pub fn router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/classify-number", get(classify_number))
        .layer(cors)
        .with_state(state)
}

/// Classify the candidate number and enrich it with a trivia fact.
///
/// Validation failures answer 400 with the input echoed back. A failed fact
/// lookup answers 500 with a fixed message and discards the classification.
async fn classify_number(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<ClassifyParams>,
) -> Response {
    let parsed = params.number.as_deref().map(parse_number);
    let number = match parsed {
        Some(Ok(number)) => number,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(InvalidInputBody {
                    number: params.number,
                    error: true,
                }),
            )
                .into_response();
        }
    };

    let classification = classify(number);

    let fun_fact = match facts::fetch_fun_fact(&state.client, &state.facts, number).await {
        Ok(fact) => fact,
        Err(e) => {
            if state.verbose {
                eprintln!("Fun fact lookup for {} failed: {}", number, e);
            }
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(EnrichmentErrorBody {
                    error: ENRICHMENT_ERROR.to_string(),
                }),
            )
                .into_response();
        }
    };

    (
        StatusCode::OK,
        Json(build_output(classification, Some(fun_fact))),
    )
        .into_response()
}
