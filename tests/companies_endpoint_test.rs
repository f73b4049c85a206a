use anyhow::Result;
use autotask_companies::{AutotaskClient, AutotaskConfig, CompaniesHandler, HttpResponse};
use httpmock::prelude::*;
use serde_json::json;
use std::time::{Duration, Instant};

fn handler_for(server: &MockServer) -> Result<CompaniesHandler<AutotaskClient>> {
    handler_with_timeout(server, Duration::from_secs(30))
}

fn handler_with_timeout(
    server: &MockServer,
    timeout: Duration,
) -> Result<CompaniesHandler<AutotaskClient>> {
    let config = AutotaskConfig::new(server.base_url(), "INTEGRATION", "api-user", "s3cret")
        .with_timeout(timeout);
    Ok(CompaniesHandler::new(AutotaskClient::new(&config)?))
}

fn body_json(response: &HttpResponse) -> Result<serde_json::Value> {
    Ok(serde_json::from_str(&response.body)?)
}

#[tokio::test]
async fn test_empty_result_is_empty_array() -> Result<()> {
    let server = MockServer::start();

    let query_mock = server.mock(|when, then| {
        when.method(POST).path("/Companies/query");
        then.status(200).json_body(json!({
            "items": [],
            "pageDetails": {"count": 0, "nextPageUrl": null}
        }));
    });

    let response = handler_for(&server)?.handle().await;

    query_mock.assert();
    assert_eq!(response.status_code, 200);
    assert_eq!(response.content_type(), Some("application/json"));
    assert_eq!(response.body, "[]");
    Ok(())
}

#[tokio::test]
async fn test_two_pages_concatenate_in_order() -> Result<()> {
    let server = MockServer::start();
    let next_url = server.url("/V1.0/Companies/query/next?paging=eyJwYWdlIjoyfQ");

    let first = server.mock(|when, then| {
        when.method(POST).path("/Companies/query");
        then.status(200).json_body(json!({
            "items": [
                {"id": 10, "companyName": "Alpha"},
                {"id": 4, "companyName": "Bravo"}
            ],
            "pageDetails": {"count": 2, "nextPageUrl": next_url}
        }));
    });
    let second = server.mock(|when, then| {
        when.method(GET)
            .path("/V1.0/Companies/query/next")
            .query_param("paging", "eyJwYWdlIjoyfQ");
        then.status(200).json_body(json!({
            "items": [{"id": 7, "companyName": "Charlie"}],
            "pageDetails": {"count": 1, "nextPageUrl": null}
        }));
    });

    let response = handler_for(&server)?.handle().await;

    first.assert();
    second.assert();
    assert_eq!(response.status_code, 200);
    assert_eq!(
        body_json(&response)?,
        json!([
            {"CompanyID": 10, "CompanyName": "Alpha"},
            {"CompanyID": 4, "CompanyName": "Bravo"},
            {"CompanyID": 7, "CompanyName": "Charlie"}
        ])
    );
    Ok(())
}

#[tokio::test]
async fn test_absent_page_details_makes_single_call() -> Result<()> {
    let server = MockServer::start();

    let query_mock = server.mock(|when, then| {
        when.method(POST).path("/Companies/query");
        then.status(200)
            .json_body(json!({"items": [{"id": 1, "companyName": "Solo"}]}));
    });
    let any_get = server.mock(|when, then| {
        when.method(GET);
        then.status(500);
    });

    let response = handler_for(&server)?.handle().await;

    query_mock.assert_hits(1);
    any_get.assert_hits(0);
    assert_eq!(response.status_code, 200);
    assert_eq!(
        body_json(&response)?,
        json!([{"CompanyID": 1, "CompanyName": "Solo"}])
    );
    Ok(())
}

#[tokio::test]
async fn test_output_has_only_two_keys() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/Companies/query");
        then.status(200).json_body(json!({
            "items": [{
                "id": 29683,
                "companyName": "Northwind",
                "companyType": 1,
                "isActive": true,
                "userDefinedFields": []
            }],
            "pageDetails": {"nextPageUrl": null}
        }));
    });

    let response = handler_for(&server)?.handle().await;
    let body = body_json(&response)?;

    assert_eq!(body, json!([{"CompanyID": 29683, "CompanyName": "Northwind"}]));
    assert_eq!(body[0].as_object().map(|o| o.len()), Some(2));
    Ok(())
}

#[tokio::test]
async fn test_non_ascii_names_pass_through_literally() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/Companies/query");
        then.status(200).json_body(json!({
            "items": [{"id": 5, "companyName": "Müller & Söhne 株式会社"}],
            "pageDetails": {"nextPageUrl": null}
        }));
    });

    let response = handler_for(&server)?.handle().await;

    assert_eq!(response.status_code, 200);
    assert!(response.body.contains("Müller & Söhne 株式会社"));
    assert!(!response.body.contains("\\u"));
    assert!(response.body.contains("\n  {\n    \"CompanyID\": 5,"));
    Ok(())
}

#[tokio::test]
async fn test_first_call_500_is_bad_gateway() -> Result<()> {
    let server = MockServer::start();

    let query_mock = server.mock(|when, then| {
        when.method(POST).path("/Companies/query");
        then.status(500).body("{\"errors\":[\"Internal failure\"]}");
    });

    let response = handler_for(&server)?.handle().await;

    query_mock.assert();
    assert_eq!(response.status_code, 502);
    assert_eq!(response.content_type(), Some("text/plain; charset=utf-8"));
    assert!(response.body.starts_with("Upstream API error: 500 Internal Server Error"));
    assert!(!response.body.starts_with('['));
    Ok(())
}

#[tokio::test]
async fn test_later_page_failure_discards_partial_results() -> Result<()> {
    let server = MockServer::start();
    let next_url = server.url("/Companies/query/next?paging=2");

    let first = server.mock(|when, then| {
        when.method(POST).path("/Companies/query");
        then.status(200).json_body(json!({
            "items": [{"id": 1, "companyName": "Kept?"}],
            "pageDetails": {"nextPageUrl": next_url}
        }));
    });
    let second = server.mock(|when, then| {
        when.method(GET).path("/Companies/query/next");
        then.status(429).body("Too many requests");
    });

    let response = handler_for(&server)?.handle().await;

    first.assert();
    second.assert();
    assert_eq!(response.status_code, 502);
    assert!(response.body.contains("429"));
    assert!(!response.body.contains("Kept?"));
    Ok(())
}

#[tokio::test]
async fn test_malformed_response_is_internal_error() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/Companies/query");
        then.status(200)
            .json_body(json!({"items": [{"companyName": "No id"}]}));
    });

    let response = handler_for(&server)?.handle().await;

    assert_eq!(response.status_code, 500);
    assert!(response.body.starts_with("Error: Malformed response from"));
    Ok(())
}

#[tokio::test]
async fn test_non_string_company_name_is_internal_error() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/Companies/query");
        then.status(200).json_body(json!({
            "items": [{"id": 1, "companyName": 42}],
            "pageDetails": {"nextPageUrl": null}
        }));
    });

    let response = handler_for(&server)?.handle().await;

    assert_eq!(response.status_code, 500);
    assert!(response.body.starts_with("Error: Malformed response from"));
    assert!(response.body.contains("expected a string"));
    Ok(())
}

#[tokio::test]
async fn test_timeout_is_bounded_and_internal_error() -> Result<()> {
    let server = MockServer::start();
    let timeout = Duration::from_millis(300);

    server.mock(|when, then| {
        when.method(POST).path("/Companies/query");
        then.status(200)
            .delay(Duration::from_secs(3))
            .json_body(json!({"items": [], "pageDetails": {"nextPageUrl": null}}));
    });

    let handler = handler_with_timeout(&server, timeout)?;
    let started = Instant::now();
    let response = handler.handle().await;
    let elapsed = started.elapsed();

    assert_eq!(response.status_code, 500);
    assert!(response.body.starts_with("Error: API request failed"));
    assert!(elapsed >= timeout);
    assert!(elapsed < Duration::from_secs(3));
    Ok(())
}

#[tokio::test]
async fn test_connection_refused_is_internal_error() -> Result<()> {
    // 取得一個沒有人在聽的 port
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        listener.local_addr()?.port()
    };
    let config = AutotaskConfig::new(
        format!("http://127.0.0.1:{}", port),
        "INTEGRATION",
        "api-user",
        "s3cret",
    );
    let handler = CompaniesHandler::new(AutotaskClient::new(&config)?);

    let response = handler.handle().await;

    assert_eq!(response.status_code, 500);
    assert!(response.body.starts_with("Error:"));
    Ok(())
}
