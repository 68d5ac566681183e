//! Invoice domain model and paid-date rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::company::Company;
use crate::error::DomainError;

/// Unique identifier for an Invoice (database-generated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct InvoiceId(i64);

impl InvoiceId {
    /// Creates an InvoiceId from a raw database value.
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    pub fn into_i64(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for InvoiceId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// An invoice row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Invoice {
    pub id: InvoiceId,
    /// Code of the owning company
    #[schema(example = "apple")]
    pub comp_code: String,
    #[schema(example = 100.0)]
    pub amt: f64,
    pub paid: bool,
    /// Set at creation, never modified
    pub add_date: DateTime<Utc>,
    /// Present exactly when `paid` is true
    pub paid_date: Option<DateTime<Utc>>,
}

/// Narrow projection used by the invoice listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InvoiceSummary {
    pub id: InvoiceId,
    #[schema(example = "apple")]
    pub comp_code: String,
}

/// An invoice joined with its owning company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InvoiceDetail {
    pub id: InvoiceId,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
    pub company: Company,
}

/// Validated input for inserting an invoice.
///
/// `paid` starts false and `paid_date` absent; both are storage defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub comp_code: String,
    pub amt: f64,
}

impl NewInvoice {
    /// # Validation
    /// - Company code cannot be blank
    /// - Amount must be a finite number greater than zero
    pub fn new(comp_code: String, amt: f64) -> Result<Self, DomainError> {
        if comp_code.trim().is_empty() {
            return Err(DomainError::MissingField("comp_code"));
        }
        validate_amount(amt)?;
        Ok(Self { comp_code, amt })
    }
}

/// Validated input for updating an invoice. `paid_date` is always derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvoiceChanges {
    pub amt: f64,
    pub paid: bool,
}

impl InvoiceChanges {
    pub fn new(amt: f64, paid: bool) -> Result<Self, DomainError> {
        validate_amount(amt)?;
        Ok(Self { amt, paid })
    }

    /// Computes the paid date to store given the one currently stored.
    ///
    /// - unpaid -> paid: stamped with `now`
    /// - -> unpaid: cleared
    /// - paid -> paid: existing date kept
    pub fn next_paid_date(
        &self,
        current: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        match (current, self.paid) {
            (None, true) => Some(now),
            (_, false) => None,
            (Some(existing), true) => Some(existing),
        }
    }
}

fn validate_amount(amt: f64) -> Result<(), DomainError> {
    if !amt.is_finite() || amt <= 0.0 {
        return Err(DomainError::NonPositiveAmount);
    }
    Ok(())
}
