//! Industry domain model and its company associations.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::company::is_url_safe_code;
use crate::error::DomainError;

/// An industry a company can belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Industry {
    #[schema(example = "tech")]
    pub code: String,
    #[schema(example = "Technology")]
    pub industry: String,
}

impl Industry {
    /// # Validation
    /// - Neither code nor label may be blank
    /// - The code must be URL-safe
    pub fn new(code: String, industry: String) -> Result<Self, DomainError> {
        if code.trim().is_empty() {
            return Err(DomainError::MissingField("code"));
        }
        if !is_url_safe_code(&code) {
            return Err(DomainError::InvalidCode);
        }
        if industry.trim().is_empty() {
            return Err(DomainError::MissingField("industry"));
        }
        Ok(Self { code, industry })
    }
}

/// An industry with the codes of the companies in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IndustrySummary {
    pub code: String,
    pub industry: String,
    #[schema(example = json!(["apple", "ibm"]))]
    pub companies: Vec<String>,
}

/// A row of the company/industry join table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CompanyIndustry {
    pub comp_code: String,
    pub ind_code: String,
}
