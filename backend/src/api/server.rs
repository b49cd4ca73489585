//! HTTP server standing in for the statement parser.
//!
//! Uploaded PDFs are checked the way the real parser checks them, then
//! answered with a fixture statement for the issuer named in the file.
//!
//! # API Endpoints
//!
//! | Method | Path                                  | Description                      |
//! |--------|---------------------------------------|----------------------------------|
//! | GET    | `/api/statements/health`              | Health check                     |
//! | GET    | `/api/statements/supported-issuers`   | Issuers the parser recognises    |
//! | POST   | `/api/statements/parse`               | Upload a PDF, get StatementData  |
//! | POST   | `/api/statements/debug`               | Describe an upload without parsing |

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, Method},
    response::Json,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::types::{is_pdf, DebugReport, HealthResponse, SupportedIssuersResponse};
use crate::config::{ServerConfig, API_PREFIX, MAX_UPLOAD_BYTES};
use crate::error::{ServerError, ServerResult};
use crate::fixtures::fixture_statement;
use crate::models::{Issuer, StatementData};

pub const NO_FILE_MESSAGE: &str = "No file uploaded";
pub const NOT_PDF_MESSAGE: &str = "Only PDF files are supported";
pub const UNSUPPORTED_FORMAT_MESSAGE: &str = "Failed to parse statement. Unsupported format.";

/// Multipart field carrying the statement.
const FILE_FIELD: &str = "file";

/// Slack for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(Debug, Clone)]
struct AppState {
    fixture_transactions: usize,
}

/// A file read from a multipart request.
#[derive(Debug)]
struct Upload {
    file_name: Option<String>,
    bytes: Vec<u8>,
}

/// Build the application router.
pub fn router(config: &ServerConfig) -> Router {
    // Permissive CORS for local development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    let statements = Router::new()
        .route("/health", get(health))
        .route("/supported-issuers", get(supported_issuers))
        .route("/parse", post(parse_statement))
        .route("/debug", post(debug_upload))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD));

    Router::new()
        .route("/", get(health))
        .nest(API_PREFIX, statements)
        .with_state(AppState {
            fixture_transactions: config.fixture_transactions,
        })
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the HTTP server on all interfaces.
pub async fn start_server(config: ServerConfig) -> ServerResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("🚀 Statement parser running on http://localhost:{}{}", config.port, API_PREFIX);
    tracing::info!("   POST {}/parse             - Parse a statement PDF", API_PREFIX);
    tracing::info!("   POST {}/debug             - Inspect an upload", API_PREFIX);
    tracing::info!("   GET  {}/supported-issuers - Supported issuers", API_PREFIX);
    tracing::info!("   GET  {}/health            - Health check", API_PREFIX);
    tracing::info!("   Fixture transactions: {}", config.fixture_transactions);

    serve(listener, &config).await
}

/// Serve on an already-bound listener.
pub async fn serve(listener: TcpListener, config: &ServerConfig) -> ServerResult<()> {
    axum::serve(listener, router(config)).await?;
    Ok(())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::up())
}

async fn supported_issuers() -> Json<SupportedIssuersResponse> {
    Json(SupportedIssuersResponse::all())
}

/// Parse endpoint
async fn parse_statement(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ServerResult<Json<StatementData>> {
    let upload = read_upload(multipart).await?;
    let file_name = upload.file_name.unwrap_or_default();

    tracing::info!(file = %file_name, bytes = upload.bytes.len(), "📄 Received statement");

    if !file_name.to_lowercase().ends_with(".pdf") {
        return Err(ServerError::BadRequest(NOT_PDF_MESSAGE.to_string()));
    }

    if !is_pdf(&upload.bytes) {
        tracing::debug!(file = %file_name, "missing %PDF header");
        return Err(ServerError::Unprocessable(UNSUPPORTED_FORMAT_MESSAGE.to_string()));
    }

    let issuer = Issuer::detect(&file_name).ok_or_else(|| {
        tracing::debug!(file = %file_name, "no issuer keyword in file name");
        ServerError::Unprocessable(UNSUPPORTED_FORMAT_MESSAGE.to_string())
    })?;

    let statement = fixture_statement(issuer, state.fixture_transactions);
    if !statement.is_valid() {
        return Err(ServerError::Unprocessable(UNSUPPORTED_FORMAT_MESSAGE.to_string()));
    }

    tracing::info!(
        issuer = %issuer,
        transactions = statement.transactions.len(),
        "✅ Parsed statement"
    );
    Ok(Json(statement))
}

/// Debug endpoint
async fn debug_upload(multipart: Multipart) -> ServerResult<Json<DebugReport>> {
    let upload = read_upload(multipart).await?;
    let report = DebugReport::inspect(upload.file_name.as_deref(), &upload.bytes);
    tracing::info!(
        file = report.file_name.as_deref().unwrap_or("unknown"),
        issuer = %report.issuer_detected,
        "🔍 Debug upload"
    );
    Ok(Json(report))
}

/// Pull the `file` field out of a multipart body. Empty files count as missing.
async fn read_upload(mut multipart: Multipart) -> ServerResult<Upload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Multipart error: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ServerError::BadRequest(format!("Read error: {}", e)))?;

        if bytes.is_empty() {
            break;
        }
        return Ok(Upload {
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    Err(ServerError::BadRequest(NO_FILE_MESSAGE.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::multipart::{Form, Part};
    use reqwest::StatusCode;
    use serde_json::Value;

    const PDF_BYTES: &[u8] = b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\n";

    async fn spawn_server(fixture_transactions: usize) -> String {
        let config = ServerConfig {
            fixture_transactions,
            ..ServerConfig::default()
        };
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            serve(listener, &config).await.unwrap();
        });
        format!("http://{}{}", addr, API_PREFIX)
    }

    fn pdf_form(name: &str, bytes: &[u8]) -> Form {
        let part = Part::bytes(bytes.to_vec())
            .file_name(name.to_string())
            .mime_str("application/pdf")
            .unwrap();
        Form::new().part("file", part)
    }

    async fn post_form(url: String, form: Form) -> (StatusCode, Value) {
        let response = reqwest::Client::new()
            .post(url)
            .multipart(form)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    #[tokio::test]
    async fn test_health_and_issuers() {
        let base = spawn_server(5).await;

        let health: Value = reqwest::get(format!("{}/health", base)).await.unwrap().json().await.unwrap();
        assert_eq!(health["status"], "UP");
        assert_eq!(health["service"], "Credit Card Statement Parser");

        let issuers: Value = reqwest::get(format!("{}/supported-issuers", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(issuers["count"], 5);
        assert_eq!(issuers["issuers"][3], "Axis Bank");
    }

    #[tokio::test]
    async fn test_parse_returns_fixture_for_detected_issuer() {
        let base = spawn_server(5).await;

        let (status, body) = post_form(format!("{}/parse", base), pdf_form("HDFC_Oct_2025.pdf", PDF_BYTES)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["issuerName"], "HDFC Bank");
        assert_eq!(body["cardLastFourDigits"], "5678");
        assert_eq!(body["totalAmountDue"], 4500.5);
        assert_eq!(body["paymentDueDate"], "2025-11-01");
        assert_eq!(body["transactions"].as_array().unwrap().len(), 5);
        assert_eq!(body["transactions"][0]["description"], "Amazon.in Purchase");
    }

    #[tokio::test]
    async fn test_parse_honours_fixture_size() {
        let base = spawn_server(15).await;
        let (status, body) = post_form(format!("{}/parse", base), pdf_form("icici.pdf", PDF_BYTES)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["transactions"].as_array().unwrap().len(), 15);
    }

    #[tokio::test]
    async fn test_parse_rejections() {
        let base = spawn_server(5).await;
        let url = format!("{}/parse", base);

        let (status, body) = post_form(url.clone(), Form::new().text("note", "no file here")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], NO_FILE_MESSAGE);
        assert!(body["timestamp"].is_string());

        let (status, body) = post_form(url.clone(), pdf_form("hdfc.csv", PDF_BYTES)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], NOT_PDF_MESSAGE);

        let (status, body) = post_form(url.clone(), pdf_form("hdfc.pdf", b"not a pdf")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], UNSUPPORTED_FORMAT_MESSAGE);

        let (status, body) = post_form(url, pdf_form("bad format.pdf", PDF_BYTES)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], UNSUPPORTED_FORMAT_MESSAGE);
    }

    #[tokio::test]
    async fn test_debug_describes_upload() {
        let base = spawn_server(5).await;
        let (status, body) = post_form(format!("{}/debug", base), pdf_form("amex-platinum.pdf", PDF_BYTES)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fileName"], "amex-platinum.pdf");
        assert_eq!(body["sizeBytes"], PDF_BYTES.len());
        assert_eq!(body["looksLikePdf"], true);
        assert_eq!(body["issuerDetected"], "American Express");
    }

    #[tokio::test]
    async fn test_cors_preflight_is_allowed() {
        let base = spawn_server(5).await;
        let response = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, format!("{}/parse", base))
            .header("Origin", "http://localhost:5174")
            .header("Access-Control-Request-Method", "POST")
            .send()
            .await
            .unwrap();

        assert!(response.status().is_success());
        let allow_origin = response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok());
        assert_eq!(allow_origin, Some("*"));
    }
}
