//! # BizTime Types
//!
//! Domain types and port traits for the BizTime companies/invoices service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Company, Invoice, Industry)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Request bodies and JSON envelopes for the API boundary
//! - `error/` - Domain, repository and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Company, CompanyChanges, CompanyDetail, CompanyIndustry, Industry, IndustrySummary, Invoice,
    InvoiceChanges, InvoiceDetail, InvoiceId, InvoiceSummary, NewCompany, NewInvoice, is_url_safe_code, slugify,
};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError};
pub use ports::BizTimeRepository;
