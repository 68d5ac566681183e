//! Data Transfer Objects (DTOs) for requests and response envelopes.
//!
//! Request fields are all optional at the JSON level so that a missing
//! field is reported as a validation error naming it, not as a parse error.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Company, CompanyChanges, CompanyDetail, CompanyIndustry, Industry, IndustrySummary, Invoice,
    InvoiceChanges, InvoiceDetail, InvoiceSummary, NewCompany, NewInvoice,
};
use crate::error::DomainError;

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, DomainError> {
    value.ok_or(DomainError::MissingField(field))
}

// ─────────────────────────────────────────────────────────────────────────────
// Company DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a company. `code` is derived from `name` when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateCompanyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "apple")]
    pub code: Option<String>,
    #[schema(example = "Apple Computer")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Maker of OSX.")]
    pub description: Option<String>,
}

impl TryFrom<CreateCompanyRequest> for NewCompany {
    type Error = DomainError;

    fn try_from(req: CreateCompanyRequest) -> Result<Self, Self::Error> {
        NewCompany::new(req.code, required(req.name, "name")?, req.description)
    }
}

/// Request to update a company's name and description.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCompanyRequest {
    #[schema(example = "Apple Inc.")]
    pub name: Option<String>,
    #[schema(example = "Maker of macOS.")]
    pub description: Option<String>,
}

impl TryFrom<UpdateCompanyRequest> for CompanyChanges {
    type Error = DomainError;

    fn try_from(req: UpdateCompanyRequest) -> Result<Self, Self::Error> {
        CompanyChanges::new(
            required(req.name, "name")?,
            required(req.description, "description")?,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompanyListResponse {
    pub companies: Vec<Company>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompanyResponse {
    pub company: Company,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompanyDetailResponse {
    pub company: CompanyDetail,
}

// ─────────────────────────────────────────────────────────────────────────────
// Invoice DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create an invoice for an existing company.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateInvoiceRequest {
    #[schema(example = "apple")]
    pub comp_code: Option<String>,
    #[schema(example = 500.0)]
    pub amt: Option<f64>,
}

impl TryFrom<CreateInvoiceRequest> for NewInvoice {
    type Error = DomainError;

    fn try_from(req: CreateInvoiceRequest) -> Result<Self, Self::Error> {
        NewInvoice::new(required(req.comp_code, "comp_code")?, required(req.amt, "amt")?)
    }
}

/// Request to update an invoice. `paid` defaults to false when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateInvoiceRequest {
    #[schema(example = 750.0)]
    pub amt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid: Option<bool>,
}

impl TryFrom<UpdateInvoiceRequest> for InvoiceChanges {
    type Error = DomainError;

    fn try_from(req: UpdateInvoiceRequest) -> Result<Self, Self::Error> {
        InvoiceChanges::new(required(req.amt, "amt")?, req.paid.unwrap_or(false))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceListResponse {
    pub invoices: Vec<InvoiceSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceResponse {
    pub invoice: Invoice,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceDetailResponse {
    pub invoice: InvoiceDetail,
}

// ─────────────────────────────────────────────────────────────────────────────
// Industry DTOs
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateIndustryRequest {
    #[schema(example = "tech")]
    pub code: Option<String>,
    #[schema(example = "Technology")]
    pub industry: Option<String>,
}

impl TryFrom<CreateIndustryRequest> for Industry {
    type Error = DomainError;

    fn try_from(req: CreateIndustryRequest) -> Result<Self, Self::Error> {
        Industry::new(required(req.code, "code")?, required(req.industry, "industry")?)
    }
}

/// Request to place a company in an industry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AssociateCompanyRequest {
    #[schema(example = "apple")]
    pub comp_code: Option<String>,
}

impl AssociateCompanyRequest {
    pub fn into_comp_code(self) -> Result<String, DomainError> {
        match self.comp_code {
            Some(code) if !code.trim().is_empty() => Ok(code),
            _ => Err(DomainError::MissingField("comp_code")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IndustryListResponse {
    pub industries: Vec<IndustrySummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IndustryResponse {
    pub industry: Industry,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssociationResponse {
    pub association: CompanyIndustry,
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared envelopes
// ─────────────────────────────────────────────────────────────────────────────

/// Body returned by every DELETE route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    #[schema(example = "deleted")]
    pub status: String,
}

impl DeletedResponse {
    pub fn deleted() -> Self {
        Self {
            status: "deleted".into(),
        }
    }
}

/// `{"error": {"message": ..., "status": ...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Not Found")]
    pub message: String,
    #[schema(example = 404)]
    pub status: u16,
}
