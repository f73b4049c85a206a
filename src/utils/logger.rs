use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_DIRECTIVES: &str = "autotask_companies=info,warn";
const VERBOSE_DIRECTIVES: &str = "autotask_companies=debug,info";

/// Compact lines on stderr; stdout is left for the JSON output.
pub fn init_cli_logger(verbose: bool) {
    let directives = if verbose {
        VERBOSE_DIRECTIVES
    } else {
        DEFAULT_DIRECTIVES
    };
    init_logger(directives, false);
}

/// One JSON object per event, which CloudWatch indexes field by field.
pub fn init_lambda_logger() {
    init_logger(DEFAULT_DIRECTIVES, true);
}

fn init_logger(default_directives: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    // Lambda 自帶時間戳
    let layer = if json {
        layer.without_time().json().boxed()
    } else {
        layer.with_writer(std::io::stderr).compact().boxed()
    };

    tracing_subscriber::registry().with(layer).with(filter).init();
}
