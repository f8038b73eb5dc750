use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dxviantart::{config::Config, web::WebServer};

#[derive(Parser)]
#[command(name = "dxviantart")]
#[command(version)]
#[command(about = "Link preview proxy that embeds DeviantArt images and films in chat clients")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = if cli.log_level == "trace" {
        format!("dxviantart={},reqwest=debug", cli.log_level)
    } else {
        format!("dxviantart={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting DxviantArt preview proxy v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }

    info!(
        "Upstream oEmbed endpoint: {}, request deadline: {}",
        config.upstream.oembed_endpoint,
        humantime::format_duration(config.web.request_timeout)
    );

    let server = WebServer::new(config)?;
    info!("Web server configured for {}:{}", server.host(), server.port());

    server.serve().await
}
