use anyhow::Context;
use clap::Parser;
use std::time::Duration;
use vendorhub::api::ApiClient;
use vendorhub::cli::Cli;
use vendorhub::config::Config;
use vendorhub::logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    config.apply_env_overrides()?;
    cli.apply(&mut config);
    config.validate()?;

    let log_path = cli.log_file.clone().unwrap_or_else(logging::default_log_path);
    logging::init_tracing(&log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.api.environment,
        "vendorhub starting"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    let client = ApiClient::from_config(&config.api).context("building API client")?;

    vendorhub::ui::run(&config, client, &cli.route, runtime.handle())?;

    runtime.shutdown_timeout(Duration::from_secs(1));
    Ok(())
}
