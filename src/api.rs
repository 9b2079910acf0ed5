// 🌐 REST API with Axum
//
// All routes live under /api and answer with the ApiResponse envelope.
// Validation problems → 400, gateway problems → 502.

use crate::birth_chart::{compute_birth_chart, BirthChart, BirthDate};
use crate::error::NamvedaError;
use crate::generator::{
    generate_astrological_names, generate_names, generate_sibling_names, AstrologyNames,
    GeneratedNames, TextGenerator,
};
use crate::payment::{create_donation_order, DonationOrder, DonationRequest, PaymentGateway};
use crate::prompts::{AstrologyFilters, NameFilters, SiblingFilters};
use axum::{
    extract::{rejection::JsonRejection, FromRequest, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
    /// None when donations are not configured
    pub payments: Option<PaymentState>,
}

#[derive(Clone)]
pub struct PaymentState {
    pub gateway: Arc<dyn PaymentGateway>,
    pub public_key_id: String,
}

/// API Response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: (),
            error: Some(message.into()),
        }
    }
}

/// Maps library errors onto HTTP responses
pub struct ApiError(NamvedaError);

impl From<NamvedaError> for ApiError {
    fn from(err: NamvedaError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(NamvedaError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            NamvedaError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            NamvedaError::Payment(_) => {
                (StatusCode::BAD_GATEWAY, "Something went wrong".to_string())
            }
            NamvedaError::Generation(_) => (
                StatusCode::BAD_GATEWAY,
                "Failed to generate names".to_string(),
            ),
            NamvedaError::Config(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Service not configured".to_string(),
            ),
        };

        if !self.0.is_client_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        (status, Json(ApiResponse::err(message))).into_response()
    }
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// JSON body extractor whose rejections use the ApiResponse envelope (400)
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

// ============================================================================
// API Handlers
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthChartRequest {
    #[serde(default)]
    pub birth_date: String,
}

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// POST /api/birth-chart - Numerology, zodiac, Chinese zodiac, Nakshatra
async fn birth_chart(ApiJson(request): ApiJson<BirthChartRequest>) -> ApiResult<BirthChart> {
    let birth = BirthDate::parse(&request.birth_date)?;
    let chart = compute_birth_chart(birth.date);
    tracing::debug!(date = %birth.date, zodiac = %chart.zodiac_sign, "computed birth chart");
    Ok(Json(ApiResponse::ok(chart)))
}

/// POST /api/generate-names - General name search
async fn names(
    State(state): State<AppState>,
    ApiJson(filters): ApiJson<NameFilters>,
) -> ApiResult<GeneratedNames> {
    let result = generate_names(state.generator.as_ref(), &filters).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/astrology-names - Names aligned with a birth chart
async fn astrology_names(
    State(state): State<AppState>,
    ApiJson(filters): ApiJson<AstrologyFilters>,
) -> ApiResult<AstrologyNames> {
    let result = generate_astrological_names(state.generator.as_ref(), &filters).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/sibling-names - Names that match existing siblings
async fn sibling_names(
    State(state): State<AppState>,
    ApiJson(filters): ApiJson<SiblingFilters>,
) -> ApiResult<GeneratedNames> {
    let result = generate_sibling_names(state.generator.as_ref(), &filters).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/create-order - Donation order + checkout options
async fn create_order(
    State(state): State<AppState>,
    ApiJson(donation): ApiJson<DonationRequest>,
) -> ApiResult<DonationOrder> {
    let payments = state
        .payments
        .as_ref()
        .ok_or_else(|| NamvedaError::Config("donations are not configured".to_string()))?;

    let result =
        create_donation_order(payments.gateway.as_ref(), &payments.public_key_id, &donation)
            .await?;
    Ok(Json(ApiResponse::ok(result)))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/birth-chart", post(birth_chart))
        .route("/generate-names", post(names))
        .route("/astrology-names", post(astrology_names))
        .route("/sibling-names", post(sibling_names))
        .route("/create-order", post(create_order))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// TESTS
// ============================================================================
