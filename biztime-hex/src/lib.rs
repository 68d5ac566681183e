//! # BizTime Hex
//!
//! Application service layer and HTTP adapter for the BizTime service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (validation, not-found policy, error wording)
//! - `inbound/` - HTTP adapter (Axum server, error translator)
//! - `openapi/` - OpenAPI document served at `/api-docs/openapi.json`
//!
//! The service is generic over `R: BizTimeRepository`, allowing
//! different repository implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::BizTimeService;
