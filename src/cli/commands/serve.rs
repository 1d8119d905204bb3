use clap::Args;

use crate::cli::OutputFormat;
use crate::config;

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, help = "Port to listen on (overrides SMOKE_PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Host to bind (overrides SMOKE_HOST)")]
    pub host: Option<String>,
}

pub async fn handle(args: ServeArgs, _output_format: OutputFormat) -> anyhow::Result<()> {
    let mut config = config::config().clone();
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }

    crate::app::serve(&config).await
}
