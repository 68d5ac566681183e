//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use biztime_types::{
    AppError, AssociateCompanyRequest, AssociationResponse, BizTimeRepository,
    CompanyDetailResponse, CompanyListResponse, CompanyResponse, CreateCompanyRequest,
    CreateIndustryRequest, CreateInvoiceRequest, DeletedResponse, ErrorBody, ErrorResponse,
    IndustryListResponse, IndustryResponse, InvoiceDetailResponse, InvoiceId,
    InvoiceListResponse, InvoiceResponse, UpdateCompanyRequest, UpdateInvoiceRequest,
};

use super::extract::ApiJson;
use crate::BizTimeService;
use crate::openapi::ApiDoc;
use crate::service::invoice_not_found;

/// Application state shared across handlers.
pub struct AppState<R: BizTimeRepository> {
    pub service: BizTimeService<R>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_domain_error() {
            tracing::debug!(error = %self.0.message(), status = status.as_u16(), "request rejected");
        } else {
            tracing::error!(error = %self.0.message(), status = status.as_u16(), "request failed");
        }

        let body = ErrorResponse {
            error: ErrorBody {
                message: self.0.message().to_string(),
                status: status.as_u16(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Parses a path segment as an invoice id. Anything that is not an
/// integer cannot name an invoice, so it is reported as absent.
fn parse_invoice_id(raw: &str) -> Result<InvoiceId, ApiError> {
    raw.parse().map_err(|_| invoice_not_found(raw).into())
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Fallback for unmatched routes and methods.
pub async fn not_found() -> ApiError {
    AppError::NotFound("Not Found".into()).into()
}

/// Serves the OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

// ─────────────────────────────────────────────────────────────────────────────
// Companies
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state))]
pub async fn list_companies<R: BizTimeRepository>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let companies = state.service.list_companies().await?;
    Ok(Json(CompanyListResponse { companies }))
}

#[tracing::instrument(skip(state))]
pub async fn get_company<R: BizTimeRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let company = state.service.get_company(&code).await?;
    Ok(Json(CompanyDetailResponse { company }))
}

#[tracing::instrument(skip(state))]
pub async fn create_company<R: BizTimeRepository>(
    State(state): State<Arc<AppState<R>>>,
    ApiJson(req): ApiJson<CreateCompanyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let company = state.service.create_company(req).await?;
    tracing::info!(code = %company.code, "company created");
    Ok((StatusCode::CREATED, Json(CompanyResponse { company })))
}

#[tracing::instrument(skip(state))]
pub async fn update_company<R: BizTimeRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(code): Path<String>,
    ApiJson(req): ApiJson<UpdateCompanyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let company = state.service.update_company(&code, req).await?;
    Ok(Json(CompanyResponse { company }))
}

#[tracing::instrument(skip(state))]
pub async fn delete_company<R: BizTimeRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.delete_company(&code).await?;
    Ok(Json(DeletedResponse::deleted()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Invoices
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state))]
pub async fn list_invoices<R: BizTimeRepository>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let invoices = state.service.list_invoices().await?;
    Ok(Json(InvoiceListResponse { invoices }))
}

#[tracing::instrument(skip(state))]
pub async fn get_invoice<R: BizTimeRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_invoice_id(&id)?;
    let invoice = state.service.get_invoice(id).await?;
    Ok(Json(InvoiceDetailResponse { invoice }))
}

#[tracing::instrument(skip(state))]
pub async fn create_invoice<R: BizTimeRepository>(
    State(state): State<Arc<AppState<R>>>,
    ApiJson(req): ApiJson<CreateInvoiceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let invoice = state.service.create_invoice(req).await?;
    tracing::info!(id = %invoice.id, comp_code = %invoice.comp_code, "invoice created");
    Ok((StatusCode::CREATED, Json(InvoiceResponse { invoice })))
}

#[tracing::instrument(skip(state))]
pub async fn update_invoice<R: BizTimeRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateInvoiceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_invoice_id(&id)?;
    let invoice = state.service.update_invoice(id, req).await?;
    Ok(Json(InvoiceResponse { invoice }))
}

#[tracing::instrument(skip(state))]
pub async fn delete_invoice<R: BizTimeRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_invoice_id(&id)?;
    state.service.delete_invoice(id).await?;
    Ok(Json(DeletedResponse::deleted()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Industries
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state))]
pub async fn list_industries<R: BizTimeRepository>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let industries = state.service.list_industries().await?;
    Ok(Json(IndustryListResponse { industries }))
}

#[tracing::instrument(skip(state))]
pub async fn create_industry<R: BizTimeRepository>(
    State(state): State<Arc<AppState<R>>>,
    ApiJson(req): ApiJson<CreateIndustryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let industry = state.service.create_industry(req).await?;
    Ok((StatusCode::CREATED, Json(IndustryResponse { industry })))
}

#[tracing::instrument(skip(state))]
pub async fn associate_company<R: BizTimeRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(code): Path<String>,
    ApiJson(req): ApiJson<AssociateCompanyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let association = state.service.associate_company(&code, req).await?;
    Ok((StatusCode::CREATED, Json(AssociationResponse { association })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn envelope(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = ApiError(err).into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_internal_error_uses_envelope() {
        let (status, body) = envelope(AppError::Internal("pool timed out".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["status"], 500);
        assert_eq!(body["error"]["message"], "pool timed out");
    }

    #[tokio::test]
    async fn test_client_errors_keep_their_status() {
        let (status, body) = envelope(AppError::Conflict("taken".into())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["status"], 409);

        let (status, body) = envelope(AppError::BadRequest("name is required".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "name is required");
    }
}
