use autotask_companies::utils::{logger, validation::Validate};
use autotask_companies::{AutotaskClient, AutotaskConfig, CliConfig, CompaniesHandler};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting autotask-companies CLI");

    // 環境變數 + 命令列覆寫
    let config = match AutotaskConfig::from_env().and_then(|config| {
        let config = cli.apply(config);
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
    };
    tracing::debug!("Config: {:?}", config);

    let handler = CompaniesHandler::new(AutotaskClient::new(&config)?);
    let response = handler.handle().await;

    if response.status_code != 200 {
        eprintln!("❌ {} {}", response.status_code, response.body);
        std::process::exit(1);
    }

    match &cli.output {
        Some(path) => {
            tokio::fs::write(path, response.body.as_bytes()).await?;
            tracing::info!("📁 Output saved to: {}", path.display());
        }
        None => println!("{}", response.body),
    }

    Ok(())
}
