//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use biztime_types::domain::{
    Company, CompanyDetail, CompanyIndustry, Industry, IndustrySummary, Invoice, InvoiceDetail,
    InvoiceId, InvoiceSummary,
};
use biztime_types::dto::{
    AssociateCompanyRequest, AssociationResponse, CompanyDetailResponse, CompanyListResponse,
    CompanyResponse, CreateCompanyRequest, CreateIndustryRequest, CreateInvoiceRequest,
    DeletedResponse, ErrorBody, ErrorResponse, IndustryListResponse, IndustryResponse,
    InvoiceDetailResponse, InvoiceListResponse, InvoiceResponse, UpdateCompanyRequest,
    UpdateInvoiceRequest,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// List all companies
#[utoipa::path(
    get,
    path = "/companies",
    tag = "companies",
    responses(
        (status = 200, description = "All companies, ordered by code", body = CompanyListResponse)
    )
)]
async fn list_companies() {}

/// Get a company with its invoice ids and industries
#[utoipa::path(
    get,
    path = "/companies/{code}",
    tag = "companies",
    params(("code" = String, Path, description = "Company code")),
    responses(
        (status = 200, description = "Company details", body = CompanyDetailResponse),
        (status = 404, description = "Company not found", body = ErrorResponse)
    )
)]
async fn get_company() {}

/// Create a company
#[utoipa::path(
    post,
    path = "/companies",
    tag = "companies",
    request_body = CreateCompanyRequest,
    responses(
        (status = 201, description = "Company created", body = CompanyResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 409, description = "Company code already taken", body = ErrorResponse)
    )
)]
async fn create_company() {}

/// Update a company's name and description
#[utoipa::path(
    put,
    path = "/companies/{code}",
    tag = "companies",
    params(("code" = String, Path, description = "Company code")),
    request_body = UpdateCompanyRequest,
    responses(
        (status = 200, description = "Company updated", body = CompanyResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 404, description = "Company not found", body = ErrorResponse)
    )
)]
async fn update_company() {}

/// Delete a company and its invoices
#[utoipa::path(
    delete,
    path = "/companies/{code}",
    tag = "companies",
    params(("code" = String, Path, description = "Company code")),
    responses(
        (status = 200, description = "Deleted (also when nothing matched)", body = DeletedResponse)
    )
)]
async fn delete_company() {}

/// List all invoices
#[utoipa::path(
    get,
    path = "/invoices",
    tag = "invoices",
    responses(
        (status = 200, description = "All invoices as id and company code", body = InvoiceListResponse)
    )
)]
async fn list_invoices() {}

/// Get an invoice with its company
#[utoipa::path(
    get,
    path = "/invoices/{id}",
    tag = "invoices",
    params(("id" = i64, Path, description = "Invoice id")),
    responses(
        (status = 200, description = "Invoice details", body = InvoiceDetailResponse),
        (status = 404, description = "Invoice not found", body = ErrorResponse)
    )
)]
async fn get_invoice() {}

/// Create an unpaid invoice
#[utoipa::path(
    post,
    path = "/invoices",
    tag = "invoices",
    request_body = CreateInvoiceRequest,
    responses(
        (status = 201, description = "Invoice created", body = InvoiceResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 404, description = "Company not found", body = ErrorResponse)
    )
)]
async fn create_invoice() {}

/// Update an invoice's amount and paid flag
#[utoipa::path(
    put,
    path = "/invoices/{id}",
    tag = "invoices",
    params(("id" = i64, Path, description = "Invoice id")),
    request_body = UpdateInvoiceRequest,
    responses(
        (status = 200, description = "Invoice updated; paid_date derived from the paid transition", body = InvoiceResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 404, description = "Invoice not found", body = ErrorResponse)
    )
)]
async fn update_invoice() {}

/// Delete an invoice
#[utoipa::path(
    delete,
    path = "/invoices/{id}",
    tag = "invoices",
    params(("id" = i64, Path, description = "Invoice id")),
    responses(
        (status = 200, description = "Deleted (also when nothing matched)", body = DeletedResponse)
    )
)]
async fn delete_invoice() {}

/// List industries with their company codes
#[utoipa::path(
    get,
    path = "/industries",
    tag = "industries",
    responses(
        (status = 200, description = "All industries", body = IndustryListResponse)
    )
)]
async fn list_industries() {}

/// Create an industry
#[utoipa::path(
    post,
    path = "/industries",
    tag = "industries",
    request_body = CreateIndustryRequest,
    responses(
        (status = 201, description = "Industry created", body = IndustryResponse),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 409, description = "Industry code already taken", body = ErrorResponse)
    )
)]
async fn create_industry() {}

/// Place a company in an industry
#[utoipa::path(
    post,
    path = "/industries/{code}/companies",
    tag = "industries",
    params(("code" = String, Path, description = "Industry code")),
    request_body = AssociateCompanyRequest,
    responses(
        (status = 201, description = "Association created", body = AssociationResponse),
        (status = 400, description = "Missing comp_code", body = ErrorResponse),
        (status = 404, description = "Industry or company not found", body = ErrorResponse),
        (status = 409, description = "Already associated", body = ErrorResponse)
    )
)]
async fn associate_company() {}

/// OpenAPI documentation for the BizTime API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "BizTime API",
        version = "1.0.0",
        description = "Companies, their invoices and the industries they belong to.\n\nEvery error is returned as:\n\n```\n{\"error\": {\"message\": \"...\", \"status\": 404}}\n```",
        license(name = "MIT"),
    ),
    paths(
        health,
        list_companies,
        get_company,
        create_company,
        update_company,
        delete_company,
        list_invoices,
        get_invoice,
        create_invoice,
        update_invoice,
        delete_invoice,
        list_industries,
        create_industry,
        associate_company,
    ),
    components(
        schemas(
            Company,
            CompanyDetail,
            Invoice,
            InvoiceId,
            InvoiceSummary,
            InvoiceDetail,
            Industry,
            IndustrySummary,
            CompanyIndustry,
            CreateCompanyRequest,
            UpdateCompanyRequest,
            CreateInvoiceRequest,
            UpdateInvoiceRequest,
            CreateIndustryRequest,
            AssociateCompanyRequest,
            CompanyListResponse,
            CompanyResponse,
            CompanyDetailResponse,
            InvoiceListResponse,
            InvoiceResponse,
            InvoiceDetailResponse,
            IndustryListResponse,
            IndustryResponse,
            AssociationResponse,
            DeletedResponse,
            ErrorResponse,
            ErrorBody,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "companies", description = "Company management"),
        (name = "invoices", description = "Invoice management and payment"),
        (name = "industries", description = "Industries and company membership"),
    )
)]
pub struct ApiDoc;
