//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite, in-memory mocks) implement this trait.

use crate::domain::{
    Company, CompanyChanges, CompanyIndustry, Industry, IndustrySummary, Invoice, InvoiceChanges,
    InvoiceDetail, InvoiceId, InvoiceSummary, NewCompany, NewInvoice,
};
use crate::error::RepoError;

/// Data access for companies, invoices and industries.
///
/// Lookups return `Ok(None)` for missing rows; the application layer
/// decides how absence is reported. Writes that hit a unique constraint
/// fail with `RepoError::Conflict`, and writes that reference a missing
/// row fail with `RepoError::InvalidReference`.
#[async_trait::async_trait]
pub trait BizTimeRepository: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────────
    // Companies
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists every company, ordered by code.
    async fn list_companies(&self) -> Result<Vec<Company>, RepoError>;

    /// Gets a company by code.
    async fn get_company(&self, code: &str) -> Result<Option<Company>, RepoError>;

    /// Ids of the invoices billed to a company, ascending.
    async fn list_invoice_ids_for_company(&self, code: &str) -> Result<Vec<InvoiceId>, RepoError>;

    /// Industries a company belongs to, ordered by industry code.
    async fn list_industries_for_company(&self, code: &str) -> Result<Vec<Industry>, RepoError>;

    /// Inserts a company and returns the stored row.
    async fn create_company(&self, company: NewCompany) -> Result<Company, RepoError>;

    /// Updates name and description; `None` when no company has this code.
    async fn update_company(
        &self,
        code: &str,
        changes: CompanyChanges,
    ) -> Result<Option<Company>, RepoError>;

    /// Deletes a company (and, by cascade, its invoices). Returns whether a row was removed.
    async fn delete_company(&self, code: &str) -> Result<bool, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Invoices
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists every invoice as `{id, comp_code}`, ordered by id.
    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, RepoError>;

    /// Gets an invoice joined with its company.
    async fn get_invoice(&self, id: InvoiceId) -> Result<Option<InvoiceDetail>, RepoError>;

    /// Inserts an unpaid invoice stamped with the current time.
    async fn create_invoice(&self, invoice: NewInvoice) -> Result<Invoice, RepoError>;

    /// Applies `amt`/`paid` and the derived `paid_date` atomically.
    ///
    /// Reading the stored paid date and writing the new one MUST happen
    /// in one database transaction so concurrent updates cannot interleave.
    async fn update_invoice(
        &self,
        id: InvoiceId,
        changes: InvoiceChanges,
    ) -> Result<Option<Invoice>, RepoError>;

    /// Deletes an invoice. Returns whether a row was removed.
    async fn delete_invoice(&self, id: InvoiceId) -> Result<bool, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Industries
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists industries with the codes of their companies.
    async fn list_industries(&self) -> Result<Vec<IndustrySummary>, RepoError>;

    /// Gets an industry by code.
    async fn get_industry(&self, code: &str) -> Result<Option<Industry>, RepoError>;

    /// Inserts an industry.
    async fn create_industry(&self, industry: Industry) -> Result<Industry, RepoError>;

    /// Links a company to an industry.
    async fn associate_company(
        &self,
        ind_code: &str,
        comp_code: &str,
    ) -> Result<CompanyIndustry, RepoError>;
}
