//! # BizTime Client SDK
//!
//! A typed Rust client for the BizTime API. Each method unwraps the
//! response envelope and returns the resource inside it.

use biztime_types::{
    AssociateCompanyRequest, AssociationResponse, Company, CompanyDetail, CompanyDetailResponse,
    CompanyIndustry, CompanyListResponse, CompanyResponse, CreateCompanyRequest,
    CreateIndustryRequest, CreateInvoiceRequest, DeletedResponse, Industry, IndustryListResponse,
    IndustryResponse, IndustrySummary, Invoice, InvoiceDetail, InvoiceDetailResponse, InvoiceId,
    InvoiceListResponse, InvoiceResponse, InvoiceSummary, UpdateCompanyRequest,
    UpdateInvoiceRequest,
};
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid base URL: {0}")]
    InvalidUrl(String),
}

/// BizTime API client.
pub struct BizTimeClient {
    base_url: String,
    http: Client,
}

impl BizTimeClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self.http.get(self.url(&["health"])?).send().await?;
        Ok(resp.status().is_success())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Companies
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn list_companies(&self) -> Result<Vec<Company>, ClientError> {
        let resp: CompanyListResponse = self.get(&["companies"]).await?;
        Ok(resp.companies)
    }

    pub async fn get_company(&self, code: &str) -> Result<CompanyDetail, ClientError> {
        let resp: CompanyDetailResponse = self.get(&["companies", code]).await?;
        Ok(resp.company)
    }

    /// Creates a company. The server derives the code from the name when `code` is `None`.
    pub async fn create_company(
        &self,
        code: Option<&str>,
        name: &str,
        description: Option<&str>,
    ) -> Result<Company, ClientError> {
        let req = CreateCompanyRequest {
            code: code.map(String::from),
            name: Some(name.to_string()),
            description: description.map(String::from),
        };
        let resp: CompanyResponse = self.send(Method::POST, &["companies"], Some(&req)).await?;
        Ok(resp.company)
    }

    pub async fn update_company(
        &self,
        code: &str,
        name: &str,
        description: &str,
    ) -> Result<Company, ClientError> {
        let req = UpdateCompanyRequest {
            name: Some(name.to_string()),
            description: Some(description.to_string()),
        };
        let resp: CompanyResponse = self
            .send(Method::PUT, &["companies", code], Some(&req))
            .await?;
        Ok(resp.company)
    }

    pub async fn delete_company(&self, code: &str) -> Result<DeletedResponse, ClientError> {
        self.delete(&["companies", code]).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Invoices
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, ClientError> {
        let resp: InvoiceListResponse = self.get(&["invoices"]).await?;
        Ok(resp.invoices)
    }

    pub async fn get_invoice(&self, id: InvoiceId) -> Result<InvoiceDetail, ClientError> {
        let resp: InvoiceDetailResponse = self.get(&["invoices", &id.to_string()]).await?;
        Ok(resp.invoice)
    }

    pub async fn create_invoice(&self, comp_code: &str, amt: f64) -> Result<Invoice, ClientError> {
        let req = CreateInvoiceRequest {
            comp_code: Some(comp_code.to_string()),
            amt: Some(amt),
        };
        let resp: InvoiceResponse = self.send(Method::POST, &["invoices"], Some(&req)).await?;
        Ok(resp.invoice)
    }

    /// Updates an invoice. Marking it paid stamps `paid_date` once; unpaid clears it.
    pub async fn update_invoice(
        &self,
        id: InvoiceId,
        amt: f64,
        paid: bool,
    ) -> Result<Invoice, ClientError> {
        let req = UpdateInvoiceRequest {
            amt: Some(amt),
            paid: Some(paid),
        };
        let resp: InvoiceResponse = self
            .send(Method::PUT, &["invoices", &id.to_string()], Some(&req))
            .await?;
        Ok(resp.invoice)
    }

    pub async fn delete_invoice(&self, id: InvoiceId) -> Result<DeletedResponse, ClientError> {
        self.delete(&["invoices", &id.to_string()]).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Industries
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn list_industries(&self) -> Result<Vec<IndustrySummary>, ClientError> {
        let resp: IndustryListResponse = self.get(&["industries"]).await?;
        Ok(resp.industries)
    }

    pub async fn create_industry(
        &self,
        code: &str,
        industry: &str,
    ) -> Result<Industry, ClientError> {
        let req = CreateIndustryRequest {
            code: Some(code.to_string()),
            industry: Some(industry.to_string()),
        };
        let resp: IndustryResponse = self.send(Method::POST, &["industries"], Some(&req)).await?;
        Ok(resp.industry)
    }

    pub async fn associate_company(
        &self,
        ind_code: &str,
        comp_code: &str,
    ) -> Result<CompanyIndustry, ClientError> {
        let req = AssociateCompanyRequest {
            comp_code: Some(comp_code.to_string()),
        };
        let resp: AssociationResponse = self
            .send(
                Method::POST,
                &["industries", ind_code, "companies"],
                Some(&req),
            )
            .await?;
        Ok(resp.association)
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        self.send::<T, ()>(Method::GET, segments, None).await
    }

    async fn delete<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        self.send::<T, ()>(Method::DELETE, segments, None).await
    }

    async fn send<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<T, ClientError> {
        let mut req = self.http.request(method, self.url(segments)?);
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            })
        }
    }
}

/// Pulls `error.message` out of an error envelope, falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = BizTimeClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = BizTimeClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_url_encodes_each_segment() {
        let client = BizTimeClient::new("http://localhost:3000");
        let url = client.url(&["companies", "yahoo?"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/companies/yahoo%3F");

        let url = client.url(&["industries", "a/b c#1", "companies"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/industries/a%2Fb%20c%231/companies"
        );
    }

    #[test]
    fn test_url_keeps_base_path_prefix() {
        let client = BizTimeClient::new("http://localhost:3000/api/");
        let url = client.url(&["invoices", "7"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/invoices/7");
    }

    #[test]
    fn test_url_rejects_unparseable_base() {
        let client = BizTimeClient::new("not a url");
        assert!(matches!(client.url(&["health"]), Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_error_message_from_envelope() {
        let body = r#"{"error":{"message":"Invoice with id of 0 does not exist.","status":404}}"#;
        assert_eq!(error_message(body), "Invoice with id of 0 does not exist.");
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message(r#"{"error":"flat"}"#), r#"{"error":"flat"}"#);
    }
}
