#[cfg(feature = "lambda")]
use autotask_companies::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use autotask_companies::{AutotaskClient, AutotaskConfig, CompaniesHandler, HttpResponse};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::Deserialize;

/// The parts of an API Gateway proxy event worth logging. The listing
/// takes no parameters, so nothing else is read.
#[cfg(feature = "lambda")]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

#[cfg(feature = "lambda")]
async fn function_handler(
    handler: &CompaniesHandler<AutotaskClient>,
    event: LambdaEvent<ProxyRequest>,
) -> Result<HttpResponse, Error> {
    tracing::debug!(
        request_id = %event.context.request_id,
        method = ?event.payload.http_method,
        path = ?event.payload.path,
        "GET autotask/companies"
    );

    let response = handler.handle().await;
    tracing::info!("Responding with status {}", response.status_code);
    Ok(response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // cold start 時載入一次，之後所有調用共用
    let config = AutotaskConfig::from_env()?;
    config.validate()?;
    let handler = CompaniesHandler::new(AutotaskClient::new(&config)?);
    tracing::info!("Autotask companies function ready for {}", config.base_url);

    let handler = &handler;
    run(service_fn(move |event: LambdaEvent<ProxyRequest>| async move {
        function_handler(handler, event).await
    }))
    .await
}
