use crate::config::{AutotaskConfig, ENV_INTEGRATION_CODE, ENV_SECRET, ENV_USERNAME};
use crate::domain::model::{CompanyQuery, CompanyRecord, QueryPage};
use crate::domain::ports::CompanySource;
use crate::utils::error::{CompaniesError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response};

/// Upstream response text kept for logs and errors.
const ERROR_BODY_LIMIT: usize = 1000;

/// Autotask REST client for the Companies entity.
///
/// Credentials and the per-request timeout are baked into the inner
/// `reqwest::Client`, so every page request carries the same header set.
#[derive(Debug, Clone)]
pub struct AutotaskClient {
    client: Client,
    query_url: String,
}

impl AutotaskClient {
    pub fn new(config: &AutotaskConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("apiintegrationcode"),
            header_value(ENV_INTEGRATION_CODE, &config.integration_code)?,
        );
        headers.insert(
            HeaderName::from_static("username"),
            header_value(ENV_USERNAME, &config.username)?,
        );

        let mut secret = header_value(ENV_SECRET, &config.secret)?;
        secret.set_sensitive(true);
        headers.insert(HeaderName::from_static("secret"), secret);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            query_url: config.query_url(),
        })
    }

    async fn first_page(&self) -> Result<QueryPage> {
        tracing::debug!("📡 POST {}", self.query_url);
        let response = self
            .client
            .post(&self.query_url)
            .json(&CompanyQuery::default())
            .send()
            .await?;

        read_page("POST", &self.query_url, response).await
    }

    async fn next_page(&self, url: &str) -> Result<QueryPage> {
        tracing::debug!("📡 GET {}", url);
        let response = self.client.get(url).send().await?;

        read_page("GET", url, response).await
    }
}

#[async_trait]
impl CompanySource for AutotaskClient {
    async fn fetch_all(&self) -> Result<Vec<CompanyRecord>> {
        // 第一頁
        let mut page = self.first_page().await?;
        let mut records = std::mem::take(&mut page.items);
        let mut pages = 1usize;

        // 依 nextPageUrl 逐頁抓取，直到沒有下一頁
        while let Some(next_url) = page.next_page_url().map(str::to_owned) {
            page = self.next_page(&next_url).await?;
            records.append(&mut page.items);
            pages += 1;
        }

        tracing::info!(
            "📥 Fetched {} companies across {} page(s)",
            records.len(),
            pages
        );
        Ok(records)
    }
}

async fn read_page(method: &str, url: &str, response: Response) -> Result<QueryPage> {
    let status = response.status();

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let body: String = text.chars().take(ERROR_BODY_LIMIT).collect();
        tracing::error!("❌ {} {} -> {}\n{}", method, url, status, body);
        return Err(CompaniesError::UpstreamError {
            status,
            url: url.to_string(),
            body,
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|source| CompaniesError::DecodeError {
        url: url.to_string(),
        source,
    })
}

fn header_value(field: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| CompaniesError::InvalidConfigValueError {
        field: field.to_string(),
        value: "<redacted>".to_string(),
        reason: format!("Not a valid header value: {}", e),
    })
}
