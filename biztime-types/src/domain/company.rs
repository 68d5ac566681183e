//! Company domain model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::industry::Industry;
use super::invoice::InvoiceId;
use crate::error::DomainError;

/// Punctuation removed from a company name when deriving its code.
const SLUG_STRIPPED: &[char] = &['*', '+', '~', '.', '(', ')', '\'', '"', '!', ':', '@'];

/// Derives a URL-safe company code from free text.
///
/// Lowercases, drops all whitespace and strips the `*+~.()'"!:@` set, then
/// removes anything else outside `[a-z0-9_-]`. No separator is inserted,
/// so `"Apple Computer"` becomes `"applecomputer"`.
pub fn slugify(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && !SLUG_STRIPPED.contains(c))
        .flat_map(char::to_lowercase)
        .filter(|c| is_code_char(*c))
        .collect()
}

fn is_code_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// True when `code` can be used as a single path segment without escaping.
pub fn is_url_safe_code(code: &str) -> bool {
    !code.is_empty() && code.chars().all(is_code_char)
}

/// A company row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Company {
    /// Primary key, immutable once created
    #[schema(example = "apple")]
    pub code: String,
    #[schema(example = "Apple Computer")]
    pub name: String,
    #[schema(example = "Maker of OSX.")]
    pub description: Option<String>,
}

/// A company with its related invoice ids and industries.
///
/// Response shaping only; `invoices` and `industries` are not columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompanyDetail {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub invoices: Vec<InvoiceId>,
    pub industries: Vec<Industry>,
}

impl CompanyDetail {
    pub fn from_parts(company: Company, invoices: Vec<InvoiceId>, industries: Vec<Industry>) -> Self {
        Self {
            code: company.code,
            name: company.name,
            description: company.description,
            invoices,
            industries,
        }
    }
}

/// Validated input for inserting a company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompany {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

impl NewCompany {
    /// Builds a company, taking `code` as given or slugifying `name` when absent.
    ///
    /// # Validation
    /// - Name cannot be blank
    /// - A supplied code must be URL-safe
    /// - A derived code cannot be empty
    pub fn new(
        code: Option<String>,
        name: String,
        description: Option<String>,
    ) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::MissingField("name"));
        }

        let code = match code {
            Some(code) if !code.trim().is_empty() => {
                if !is_url_safe_code(&code) {
                    return Err(DomainError::InvalidCode);
                }
                code
            }
            _ => slugify(&name),
        };

        if code.is_empty() {
            return Err(DomainError::UnderivableCode);
        }

        Ok(Self {
            code,
            name,
            description,
        })
    }
}

/// Validated input for updating a company. The code never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyChanges {
    pub name: String,
    pub description: String,
}

impl CompanyChanges {
    pub fn new(name: String, description: String) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::MissingField("name"));
        }
        if description.trim().is_empty() {
            return Err(DomainError::MissingField("description"));
        }
        Ok(Self { name, description })
    }
}
