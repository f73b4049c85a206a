use crate::domain::model::{CompanyRecord, CompanySummary};
use crate::domain::ports::CompanySource;
use crate::utils::error::{CompaniesError, Result};
use serde::Serialize;
use std::collections::HashMap;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// Response handed back to the function host. Serializes in the
/// API Gateway proxy integration shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status_code: u16, content_type: &str, body: String) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), content_type.to_string());
        Self {
            status_code,
            headers,
            body,
        }
    }

    pub fn json(body: String) -> Self {
        Self::new(200, CONTENT_TYPE_JSON, body)
    }

    pub fn text(status_code: u16, body: String) -> Self {
        Self::new(status_code, CONTENT_TYPE_TEXT, body)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("Content-Type").map(String::as_str)
    }
}

/// Renames `id`/`companyName` to `CompanyID`/`CompanyName`, keeping order.
pub fn reshape(records: Vec<CompanyRecord>) -> Vec<CompanySummary> {
    records.into_iter().map(CompanySummary::from).collect()
}

/// Two-space indented JSON; non-ASCII text is written as-is, not `\u` escaped.
pub fn render_json(summaries: &[CompanySummary]) -> Result<String> {
    Ok(serde_json::to_string_pretty(summaries)?)
}

/// Serves the company listing: fetch everything, reshape, render.
pub struct CompaniesHandler<S: CompanySource> {
    source: S,
}

impl<S: CompanySource> CompaniesHandler<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn list_companies(&self) -> Result<String> {
        let records = self.source.fetch_all().await?;
        let summaries = reshape(records);
        tracing::debug!("Rendering {} company summaries", summaries.len());
        render_json(&summaries)
    }

    /// Never fails: every error becomes a 502 or 500 response.
    pub async fn handle(&self) -> HttpResponse {
        match self.list_companies().await {
            Ok(body) => HttpResponse::json(body),
            Err(e) => error_response(&e),
        }
    }
}

fn error_response(err: &CompaniesError) -> HttpResponse {
    if err.is_upstream() {
        return HttpResponse::text(err.status_code(), format!("Upstream API error: {}", err));
    }

    tracing::error!("❌ Unhandled error: {:?}", err);
    HttpResponse::text(err.status_code(), format!("Error: {}", err))
}
