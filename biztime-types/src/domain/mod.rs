//! Domain models for the BizTime service.

pub mod company;
pub mod industry;
pub mod invoice;

pub use company::{Company, CompanyChanges, CompanyDetail, NewCompany, is_url_safe_code, slugify};
pub use industry::{CompanyIndustry, Industry, IndustrySummary};
pub use invoice::{Invoice, InvoiceChanges, InvoiceDetail, InvoiceId, InvoiceSummary, NewInvoice};
