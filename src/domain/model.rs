use serde::{Deserialize, Deserializer, Serialize};

/// Page size requested from Autotask; 500 is the API's upper limit.
pub const MAX_RECORDS: u32 = 500;

/// One element of an Autotask `items` array. Every other upstream field is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    pub id: i64,
    // key must be present, value may be null; any non-string value makes the page malformed
    #[serde(deserialize_with = "required_nullable")]
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanySummary {
    #[serde(rename = "CompanyID")]
    pub company_id: i64,
    #[serde(rename = "CompanyName")]
    pub company_name: Option<String>,
}

impl From<CompanyRecord> for CompanySummary {
    fn from(record: CompanyRecord) -> Self {
        Self {
            company_id: record.id,
            company_name: record.company_name,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryFilter {
    pub op: &'static str,
    pub field: &'static str,
    pub value: i64,
}

/// Body of `POST /Companies/query`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompanyQuery {
    pub max_records: u32,
    pub include_fields: Vec<&'static str>,
    pub filter: Vec<QueryFilter>,
}

impl Default for CompanyQuery {
    fn default() -> Self {
        Self {
            max_records: MAX_RECORDS,
            include_fields: vec!["id", "companyName"],
            filter: vec![QueryFilter {
                op: "gte",
                field: "id",
                value: 1,
            }],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDetails {
    #[serde(default)]
    pub next_page_url: Option<String>,
}

/// One page of an Autotask query response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPage {
    #[serde(default)]
    pub items: Vec<CompanyRecord>,
    #[serde(default)]
    pub page_details: Option<PageDetails>,
}

impl QueryPage {
    pub fn next_page_url(&self) -> Option<&str> {
        self.page_details
            .as_ref()
            .and_then(|details| details.next_page_url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

fn required_nullable<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}
