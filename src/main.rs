use clap::Parser;
use ptsrv::{config, server};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Short-code redirect server backed by one file per code.
#[derive(Parser)]
#[command(name = "ptsrv")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Listen address, e.g. `:4600` or `127.0.0.1:8080` (overrides PT_ADDR)
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = config::Config::from_env()?.with_listen_addr(args.addr);
    config.validate()?;

    init_tracing(&config.log_level, &config.log_format)?;

    config.print_summary();

    server::run(config).await
}

fn init_tracing(level: &str, format: &str) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_new(level)
        .map_err(|e| anyhow::anyhow!("Invalid log level '{level}': {e}"))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    if format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(true)
                    .with_target(true),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }

    Ok(())
}
