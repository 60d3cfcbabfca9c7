use clap::Parser;

use oxidp::cli::Cli;
use oxidp::config::loader::load_config;
use oxidp::http::HttpServer;
use oxidp::observability::logging;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    logging::init();

    let cli = Cli::parse();
    let run_mode = cli.command.run_mode();

    let config = match load_config(run_mode, cli.command.overrides()) {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "Refusing to start");
            std::process::exit(1);
        }
    };

    tracing::info!(
        mode = config.run_mode.label(),
        hostname = config.hostname.hostname.as_deref().unwrap_or("<from request>"),
        proxy = ?config.hostname.proxy_mode,
        http_port = config.hostname.http_port,
        https_port = config.hostname.https_port,
        "Configuration loaded"
    );

    let server = HttpServer::new(config);
    server.run().await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
