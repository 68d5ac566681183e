//! BizTime Application Service
//!
//! Orchestrates domain operations through the repository port.
//! Contains NO infrastructure logic - validation, not-found policy and
//! the wording of every client-facing error live here.

use std::fmt::Display;

use biztime_types::{
    AppError, AssociateCompanyRequest, BizTimeRepository, Company, CompanyChanges, CompanyDetail,
    CompanyIndustry, CreateCompanyRequest, CreateIndustryRequest, CreateInvoiceRequest, Industry,
    IndustrySummary, Invoice, InvoiceChanges, InvoiceDetail, InvoiceId, InvoiceSummary,
    NewCompany, NewInvoice, RepoError, UpdateCompanyRequest, UpdateInvoiceRequest,
};

pub(crate) fn company_not_found(code: impl Display) -> AppError {
    AppError::NotFound(format!("Company with code of {} does not exist.", code))
}

pub(crate) fn invoice_not_found(id: impl Display) -> AppError {
    AppError::NotFound(format!("Invoice with id of {} does not exist.", id))
}

pub(crate) fn industry_not_found(code: impl Display) -> AppError {
    AppError::NotFound(format!("Industry with code of {} does not exist.", code))
}

/// Application service for companies, invoices and industries.
///
/// Generic over `R: BizTimeRepository` - the adapter is injected at compile time.
pub struct BizTimeService<R: BizTimeRepository> {
    repo: R,
}

impl<R: BizTimeRepository> BizTimeService<R> {
    /// Creates a new service with the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Companies
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists all companies.
    pub async fn list_companies(&self) -> Result<Vec<Company>, AppError> {
        self.repo.list_companies().await.map_err(Into::into)
    }

    /// Gets a company with its invoice ids and industries.
    pub async fn get_company(&self, code: &str) -> Result<CompanyDetail, AppError> {
        let company = self
            .repo
            .get_company(code)
            .await?
            .ok_or_else(|| company_not_found(code))?;

        let invoices = self.repo.list_invoice_ids_for_company(code).await?;
        let industries = self.repo.list_industries_for_company(code).await?;

        Ok(CompanyDetail::from_parts(company, invoices, industries))
    }

    /// Creates a company, deriving its code from the name when none is given.
    pub async fn create_company(&self, req: CreateCompanyRequest) -> Result<Company, AppError> {
        let company = NewCompany::try_from(req)?;
        let code = company.code.clone();

        self.repo
            .create_company(company)
            .await
            .map_err(|e| match e {
                RepoError::Conflict(_) => {
                    AppError::Conflict(format!("Company with code of {} already exists.", code))
                }
                e => e.into(),
            })
    }

    /// Updates a company's name and description.
    pub async fn update_company(
        &self,
        code: &str,
        req: UpdateCompanyRequest,
    ) -> Result<Company, AppError> {
        let changes = CompanyChanges::try_from(req)?;

        self.repo
            .update_company(code, changes)
            .await?
            .ok_or_else(|| company_not_found(code))
    }

    /// Deletes a company. Deleting an unknown code still succeeds.
    pub async fn delete_company(&self, code: &str) -> Result<(), AppError> {
        let removed = self.repo.delete_company(code).await?;
        if !removed {
            tracing::debug!(code, "delete of absent company");
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Invoices
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists all invoices as `{id, comp_code}`.
    pub async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, AppError> {
        self.repo.list_invoices().await.map_err(Into::into)
    }

    /// Gets an invoice with its company embedded.
    pub async fn get_invoice(&self, id: InvoiceId) -> Result<InvoiceDetail, AppError> {
        self.repo
            .get_invoice(id)
            .await?
            .ok_or_else(|| invoice_not_found(id))
    }

    /// Creates an unpaid invoice for an existing company.
    pub async fn create_invoice(&self, req: CreateInvoiceRequest) -> Result<Invoice, AppError> {
        let invoice = NewInvoice::try_from(req)?;
        let comp_code = invoice.comp_code.clone();

        self.repo
            .create_invoice(invoice)
            .await
            .map_err(|e| match e {
                RepoError::InvalidReference(_) => company_not_found(&comp_code),
                e => e.into(),
            })
    }

    /// Updates amount and paid flag; the paid date is derived by the repository.
    pub async fn update_invoice(
        &self,
        id: InvoiceId,
        req: UpdateInvoiceRequest,
    ) -> Result<Invoice, AppError> {
        let changes = InvoiceChanges::try_from(req)?;

        self.repo
            .update_invoice(id, changes)
            .await?
            .ok_or_else(|| invoice_not_found(id))
    }

    /// Deletes an invoice. Deleting an unknown id still succeeds.
    pub async fn delete_invoice(&self, id: InvoiceId) -> Result<(), AppError> {
        let removed = self.repo.delete_invoice(id).await?;
        if !removed {
            tracing::debug!(%id, "delete of absent invoice");
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Industries
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists industries with their company codes.
    pub async fn list_industries(&self) -> Result<Vec<IndustrySummary>, AppError> {
        self.repo.list_industries().await.map_err(Into::into)
    }

    /// Creates an industry.
    pub async fn create_industry(&self, req: CreateIndustryRequest) -> Result<Industry, AppError> {
        let industry = Industry::try_from(req)?;
        let code = industry.code.clone();

        self.repo
            .create_industry(industry)
            .await
            .map_err(|e| match e {
                RepoError::Conflict(_) => {
                    AppError::Conflict(format!("Industry with code of {} already exists.", code))
                }
                e => e.into(),
            })
    }

    /// Places a company in an industry. Both must already exist.
    pub async fn associate_company(
        &self,
        ind_code: &str,
        req: AssociateCompanyRequest,
    ) -> Result<CompanyIndustry, AppError> {
        let comp_code = req.into_comp_code()?;

        if self.repo.get_industry(ind_code).await?.is_none() {
            return Err(industry_not_found(ind_code));
        }
        if self.repo.get_company(&comp_code).await?.is_none() {
            return Err(company_not_found(&comp_code));
        }

        self.repo
            .associate_company(ind_code, &comp_code)
            .await
            .map_err(|e| match e {
                RepoError::Conflict(_) => AppError::Conflict(format!(
                    "Company {} is already in industry {}.",
                    comp_code, ind_code
                )),
                RepoError::InvalidReference(_) => company_not_found(&comp_code),
                e => e.into(),
            })
    }
}
